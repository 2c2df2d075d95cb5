//! Linear wizard over the static question sequence.
//!
//! The sequencer owns the answer set and the current position. It never
//! validates: the caller gates "next" on [`WizardSequencer::can_advance`]
//! before calling [`WizardSequencer::advance`].

use promptsmith_types::answers::AnswerSet;
use promptsmith_types::question::{QUESTIONS, QuestionDescriptor};

/// Outcome of a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Position changed to the contained index.
    Moved(usize),
    /// `advance` on the last question; the completion callback ran.
    Completed,
    /// `retreat` on the first question; the exit callback ran.
    Exited,
}

/// Answers plus a 0-based position into [`QUESTIONS`].
///
/// Invariant: `position < QUESTIONS.len()`.
#[derive(Debug, Clone, Default)]
pub struct WizardSequencer {
    answers: AnswerSet,
    position: usize,
}

impl WizardSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        QUESTIONS.len()
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position == QUESTIONS.len() - 1
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn current_question(&self) -> &'static QuestionDescriptor {
        &QUESTIONS[self.position]
    }

    pub fn current_answer(&self) -> &str {
        self.answers.get(self.current_question().field)
    }

    /// Whether the UI should enable "next" for the current step.
    pub fn can_advance(&self) -> bool {
        !self.current_answer().trim().is_empty()
    }

    /// Overwrite the answer for the current question. Empty is allowed.
    pub fn update_answer(&mut self, value: impl Into<String>) {
        let field = self.current_question().field;
        self.answers.set(field, value);
    }

    /// Move forward, or hand off to `on_complete` from the last question.
    pub fn advance<F: FnOnce()>(&mut self, on_complete: F) -> Step {
        if self.position < QUESTIONS.len() - 1 {
            self.position += 1;
            Step::Moved(self.position)
        } else {
            on_complete();
            Step::Completed
        }
    }

    /// Move back, or hand off to `on_exit` from the first question.
    pub fn retreat<F: FnOnce()>(&mut self, on_exit: F) -> Step {
        if self.position > 0 {
            self.position -= 1;
            Step::Moved(self.position)
        } else {
            on_exit();
            Step::Exited
        }
    }

    /// Clear every answer and return to the first question.
    pub fn reset(&mut self) {
        self.answers = AnswerSet::default();
        self.position = 0;
    }
}
