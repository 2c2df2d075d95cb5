//! Question-by-question collection of the answer set.

pub mod sequencer;

pub use sequencer::{Step, WizardSequencer};
