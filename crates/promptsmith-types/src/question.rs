//! Static question sequence shown by the wizard.

use serde::Serialize;

use crate::answers::AnswerField;

/// One wizard step: which field it fills and how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionDescriptor {
    pub field: AnswerField,
    pub question: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
}

/// The wizard's questions, in progression order.
///
/// The order must match [`AnswerField::ALL`]; each step writes the field
/// at the same index.
pub const QUESTIONS: [QuestionDescriptor; 5] = [
    QuestionDescriptor {
        field: AnswerField::Role,
        question: "What is the core role and expertise level?",
        description: "Define the persona. E.g., 'Senior Full-Stack Developer', 'Strategic Business Consultant', 'Sci-Fi Author', or 'Expert Brainstorming Partner'.",
        placeholder: "e.g., World-class UX Researcher specialized in accessibility...",
    },
    QuestionDescriptor {
        field: AnswerField::Tools,
        question: "What tools, frameworks, or concepts are used?",
        description: "List the technologies, mental models, software, or theories this persona relies on.",
        placeholder: "e.g., Next.js & Python, Design Thinking, SWOT Analysis, Narrative Arc, Adobe Suite...",
    },
    QuestionDescriptor {
        field: AnswerField::Behavior,
        question: "How should the AI behave and reason?",
        description: "Define interaction rules. Should it be critical? Creative? Think step-by-step? Challenge assumptions?",
        placeholder: "e.g., Think step-by-step. Be highly critical. Offer 3 distinct variations. Never apologize...",
    },
    QuestionDescriptor {
        field: AnswerField::Principles,
        question: "What are the core principles or methodology?",
        description: "Describe the workflow, decision-making framework, or architectural rules.",
        placeholder: "e.g., Mobile-first design. Show don't tell. MECE principle. Scrape then clean data...",
    },
    QuestionDescriptor {
        field: AnswerField::Style,
        question: "What are the output style preferences?",
        description: "Format requirements. Code only? Markdown tables? Executive summary? Conversational tone?",
        placeholder: "e.g., Strict TypeScript code. Bullet points only. Vivid descriptive language. Professional email format...",
    },
];
