//! Instruction builders for the two generation calls.
//!
//! Both instructions are sent as a single user turn. User text is embedded
//! verbatim; nothing here escapes or rewrites it.

use promptsmith_types::answers::AnswerSet;

/// Reference persona illustrating the target structure and tone.
///
/// The model copies its layout (⭐ section headings, terse imperative rules),
/// not its content.
pub const PERSONA_REFERENCE_TEMPLATE: &str = r#"
You are a Senior Full-Stack Developer and an expert in ReactJS, NextJS, JavaScript, TypeScript, HTML, CSS, TailwindCSS, Shadcn UI, Radix, Python, FastAPI, Playwright, ETL pipelines, MongoDB, PostgreSQL, and modern full-stack architectures. You are thoughtful, give nuanced answers, and are brilliant at reasoning. You carefully provide accurate, factual, thoughtful answers, and are a genius at reasoning.

You build real estate investment platforms using a hybrid architecture: MongoDB Atlas for raw scraped data and PostgreSQL for cleaned, normalized analytics data, using FastAPI + Python for backend APIs, scrapers, and ETL pipelines.

⭐ GENERAL BEHAVIOR RULES
Follow the user's requirements carefully & to the letter.
First think step-by-step: describe your plan in very detailed pseudocode.
Confirm, then write code.
Always write correct, best-practice, DRY, bug-free, fully functional and complete code.
Focus on readability over performance.
Leave NO TODOs, placeholders, or blank sections.
Include all required imports.
Use accurate naming for components, functions, schemas, models, handlers, etc.
Be concise; minimize non-essential prose.
If you don't know something, say so instead of guessing.
If there is no correct answer, state that clearly.

⭐ TECH STACK / TOOLS (Example Section)
Frontend (Next.js 15 + TypeScript)
React, Next.js App Router
TypeScript
TailwindCSS

Backend (Python)
FastAPI
SQLModel or SQLAlchemy ORM

Database
MongoDB Atlas → Raw data
PostgreSQL → Cleaned data

⭐ ARCHITECTURE PRINCIPLES / METHODOLOGY
Scrapers ALWAYS save raw data into MongoDB.
ETL pipelines ALWAYS read from MongoDB, clean + validate, and then insert structured data into PostgreSQL.
Never overwrite or mutate raw MongoDB data.
Clean data must be normalized, deduplicated, validated by Pydantic.

⭐ OUTPUT GUIDELINES / STYLE
Follow these strict rules:
Use TypeScript everywhere.
Use early returns for clarity.
Use Tailwind classes for all styling.
Use class: instead of ternaries in class attributes whenever possible.
Use descriptive variable/function names.
Event handlers must start with handle:
handleClick, handleKeyDown, handleSubmit, etc.
Use const instead of function.
"#;

/// Structural sample for the JSON prompt. Values are placeholders.
pub const STRUCTURED_PROMPT_SAMPLE: &str = r#"{"promptDetails":{"description":"Ultra-detailed exploded technical infographic of {OBJECT_NAME}, shown in a 3/4 front isometric view...","styleTags":["Exploded View","Technical Infographic","Photoreal 3D CAD Render"]},"negativePrompt":"no people, no messy layout, no extra components","generationHints":{"aspectRatio":"2:3","detailLevel":"ultra","stylization":"low-medium","camera":{"angle":"3/4 front isometric","lens":"product render perspective"},"lighting":"soft even studio lighting","background":"smooth dark gray seamless backdrop"}}"#;

/// Dotted key paths the model is told to emit.
pub const STRUCTURED_PROMPT_KEYS: [&str; 10] = [
    "promptDetails.description",
    "promptDetails.styleTags (array)",
    "negativePrompt (string)",
    "generationHints.aspectRatio",
    "generationHints.detailLevel",
    "generationHints.stylization",
    "generationHints.camera.angle",
    "generationHints.camera.lens",
    "generationHints.lighting",
    "generationHints.background",
];

/// Build the persona synthesis instruction from a validated answer set.
pub fn build_persona_instruction(answers: &AnswerSet) -> String {
    format!(
        r#"You are an expert Persona Engineer. Your task is to generate a highly effective, professional, and strict System Persona for an AI assistant.
This assistant might be for Coding, Brainstorming, Creative Writing, Business Strategy, or any other expert role.

The user has provided the following requirements for the persona:
1. **Core Role & Expertise:** {role}
2. **Tools / Tech Stack / Concepts:** {tools}
3. **Behavioral Rules:** {behavior}
4. **Principles / Methodology / Architecture:** {principles}
5. **Output Style / Format:** {style}

**Instructions:**
- Synthesize these requirements into a cohesive, authoritative system persona.
- **Structure:** Use the visual style of the EXAMPLE below (using headers with ⭐ icons).
- **Adaptability:**
  - If the role is **coding-related**, keep sections like "TECH STACK", "ARCHITECTURE PRINCIPLES", "WHEN WRITING CODE".
  - If the role is **non-technical** (e.g., a Writer, PM, or Consultant), rename the sections to fit the context (e.g., "CORE CONCEPTS & TOOLS", "METHODOLOGY & FRAMEWORKS", "OUTPUT STYLE GUIDELINES").
- Maintain the stern, high-performance, and expert tone of the example.
- Ensure all sections are populated based on the user's input.
- If the user input for a section is vague, infer standard best practices for that specific role to fill the gaps intelligently.

**Reference Format (Structure to follow):**
{template}

**Output:**
Generate ONLY the final system persona text. Do not add any conversational filler before or after.
"#,
        role = answers.role,
        tools = answers.tools,
        behavior = answers.behavior,
        principles = answers.principles,
        style = answers.style,
        template = PERSONA_REFERENCE_TEMPLATE,
    )
}

/// Build the structured prompt instruction for a persona and an objective.
pub fn build_structured_prompt_instruction(
    persona: &str,
    objective: &str,
    max_characters: usize,
) -> String {
    format!(
        r#"You are an elite Prompt Architect. Given the following system persona and user objective, craft a compact JSON prompt (<= {max_characters} characters) that maximizes downstream model performance.

SYSTEM PERSONA:
{persona}

USER OBJECTIVE / RAW PROMPT:
{objective}

REQUIREMENTS:
- Output VALID JSON only, no markdown fences.
- Use keys: {keys}.
- Use concise but vivid language. Always reference the persona perspective.
- Never exceed {max_characters} characters.
- Use this sample as inspiration for structure (do NOT copy values): {sample}"#,
        keys = STRUCTURED_PROMPT_KEYS.join(", "),
        sample = STRUCTURED_PROMPT_SAMPLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> AnswerSet {
        AnswerSet {
            role: "UX Researcher".to_string(),
            tools: "Figma, interviews".to_string(),
            behavior: "ask clarifying questions".to_string(),
            principles: "accessibility-first".to_string(),
            style: "bulleted".to_string(),
        }
    }

    #[test]
    fn test_persona_instruction_embeds_every_answer_under_label() {
        let instruction = build_persona_instruction(&answers());

        assert!(instruction.contains("**Core Role & Expertise:** UX Researcher"));
        assert!(instruction.contains("**Tools / Tech Stack / Concepts:** Figma, interviews"));
        assert!(instruction.contains("**Behavioral Rules:** ask clarifying questions"));
        assert!(instruction.contains("**Principles / Methodology / Architecture:** accessibility-first"));
        assert!(instruction.contains("**Output Style / Format:** bulleted"));
    }

    #[test]
    fn test_persona_instruction_carries_template_and_output_rule() {
        let instruction = build_persona_instruction(&answers());

        assert!(instruction.contains("⭐ GENERAL BEHAVIOR RULES"));
        assert!(instruction.contains("non-technical"));
        assert!(instruction.contains("Generate ONLY the final system persona text"));
    }

    #[test]
    fn test_structured_instruction_embeds_inputs_and_limit() {
        let instruction =
            build_structured_prompt_instruction("PERSONA TEXT", "Redesign a checkout flow", 2500);

        assert!(instruction.contains("SYSTEM PERSONA:\nPERSONA TEXT"));
        assert!(instruction.contains("USER OBJECTIVE / RAW PROMPT:\nRedesign a checkout flow"));
        assert!(instruction.contains("(<= 2500 characters)"));
        assert!(instruction.contains("Never exceed 2500 characters."));
        assert!(instruction.contains("no markdown fences"));
        assert!(instruction.contains("do NOT copy values"));
    }

    #[test]
    fn test_structured_instruction_lists_every_key() {
        let instruction = build_structured_prompt_instruction("p", "o", 3000);
        for key in STRUCTURED_PROMPT_KEYS {
            assert!(instruction.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn test_sample_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(STRUCTURED_PROMPT_SAMPLE).unwrap();
        assert!(value["generationHints"]["camera"]["angle"].is_string());
        assert!(value["promptDetails"]["styleTags"].is_array());
    }
}
