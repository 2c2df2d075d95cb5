//! Screen-level flow around the wizard.
//!
//! A [`Session`] tracks which screen a front end should show and the
//! artifacts produced so far. It performs no I/O: the caller runs the
//! generation services and reports the outcome back.

use promptsmith_types::answers::AnswerSet;
use serde::Serialize;
use uuid::Uuid;

use crate::wizard::{Step, WizardSequencer};

/// Message shown when persona generation fails for any reason.
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Something went wrong while connecting to the architect. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    Wizard,
    Generating,
    Result,
    PromptBuilder,
    Error,
}

/// One user's pass through the wizard and the two generation steps.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    screen: Screen,
    wizard: WizardSequencer,
    persona: Option<String>,
    structured_prompt: Option<String>,
    prompt_error: Option<String>,
    error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            screen: Screen::Welcome,
            wizard: WizardSequencer::new(),
            persona: None,
            structured_prompt: None,
            prompt_error: None,
            error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn wizard(&self) -> &WizardSequencer {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut WizardSequencer {
        &mut self.wizard
    }

    pub fn persona(&self) -> Option<&str> {
        self.persona.as_deref()
    }

    pub fn structured_prompt(&self) -> Option<&str> {
        self.structured_prompt.as_deref()
    }

    pub fn prompt_error(&self) -> Option<&str> {
        self.prompt_error.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Welcome -> Wizard.
    pub fn start(&mut self) {
        if self.screen == Screen::Welcome {
            self.screen = Screen::Wizard;
        }
    }

    /// Advance the wizard. On completion, switch to `Generating` and return
    /// the answers to submit.
    pub fn next_step(&mut self) -> Option<AnswerSet> {
        if self.screen != Screen::Wizard {
            return None;
        }
        match self.wizard.advance(|| tracing::debug!("wizard completed")) {
            Step::Completed => {
                self.screen = Screen::Generating;
                self.error = None;
                Some(self.wizard.answers().clone())
            }
            _ => None,
        }
    }

    /// Step the wizard back; leaving the first question returns to Welcome.
    pub fn back_step(&mut self) -> Step {
        if self.screen != Screen::Wizard {
            return Step::Moved(self.wizard.position());
        }
        let step = self.wizard.retreat(|| tracing::debug!("wizard exited"));
        if step == Step::Exited {
            self.screen = Screen::Welcome;
        }
        step
    }

    /// Generating -> Result.
    pub fn persona_ready(&mut self, persona: String) {
        if self.screen != Screen::Generating {
            tracing::debug!(screen = ?self.screen, "ignoring persona outside generation");
            return;
        }
        self.persona = Some(persona);
        self.structured_prompt = None;
        self.prompt_error = None;
        self.screen = Screen::Result;
    }

    /// Generating -> Error. The detailed cause is the caller's to log.
    pub fn persona_failed(&mut self) {
        if self.screen != Screen::Generating {
            return;
        }
        self.error = Some(CONNECTION_FAILED_MESSAGE.to_string());
        self.screen = Screen::Error;
    }

    /// Error -> Wizard, keeping the answers and position.
    pub fn retry(&mut self) {
        if self.screen == Screen::Error {
            self.error = None;
            self.screen = Screen::Wizard;
        }
    }

    /// Result -> PromptBuilder. Returns false when there is no persona.
    pub fn open_prompt_builder(&mut self) -> bool {
        if self.screen != Screen::Result || self.persona.is_none() {
            return false;
        }
        self.screen = Screen::PromptBuilder;
        true
    }

    pub fn close_prompt_builder(&mut self) {
        if self.screen == Screen::PromptBuilder {
            self.screen = Screen::Result;
        }
    }

    /// Replace the current structured prompt.
    pub fn prompt_ready(&mut self, prompt: String) {
        self.structured_prompt = Some(prompt);
        self.prompt_error = None;
    }

    pub fn prompt_failed(&mut self, message: impl Into<String>) {
        self.structured_prompt = None;
        self.prompt_error = Some(message.into());
    }

    /// Back to Welcome with an empty wizard, from any screen.
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.persona = None;
        self.structured_prompt = None;
        self.prompt_error = None;
        self.error = None;
        self.screen = Screen::Welcome;
    }

    /// Whether a "start over" control is offered on the current screen.
    pub fn shows_reset(&self) -> bool {
        !matches!(self.screen, Screen::Generating | Screen::Welcome)
    }
}
