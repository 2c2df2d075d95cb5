//! Interactive terminal wizard (`psmith wizard`).
//!
//! Drives a [`Session`] through its screens with dialoguer prompts. Typing
//! `:back`, `:reset` or `:quit` at a question navigates instead of
//! answering.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};

use promptsmith_core::session::{Screen, Session};
use promptsmith_types::answers::AnswerSet;

use crate::cli::spinner;
use crate::state::AppState;

/// What the user typed at a question prompt.
#[derive(Debug, PartialEq, Eq)]
enum WizardInput {
    Back,
    Reset,
    Quit,
    Answer(String),
}

fn parse_input(raw: &str) -> WizardInput {
    match raw.trim() {
        ":back" | ":b" => WizardInput::Back,
        ":reset" => WizardInput::Reset,
        ":quit" | ":q" => WizardInput::Quit,
        _ => WizardInput::Answer(raw.to_string()),
    }
}

/// Menu entries on the result and error screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    BuildPrompt,
    Retry,
    StartOver,
    Quit,
}

impl MenuChoice {
    fn label(self) -> &'static str {
        match self {
            MenuChoice::BuildPrompt => "Build a JSON prompt from this persona",
            MenuChoice::Retry => "Try again",
            MenuChoice::StartOver => "Start over",
            MenuChoice::Quit => "Quit",
        }
    }
}

/// `first`, then "Start over" where the session offers it, then "Quit".
fn menu(session: &Session, first: MenuChoice) -> Vec<MenuChoice> {
    let mut choices = vec![first];
    if session.shows_reset() {
        choices.push(MenuChoice::StartOver);
    }
    choices.push(MenuChoice::Quit);
    choices
}

fn choose(choices: &[MenuChoice]) -> Result<MenuChoice> {
    let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
    let selection = Select::new().items(&labels).default(0).interact()?;
    Ok(choices[selection])
}

pub async fn run_wizard(state: &AppState) -> Result<()> {
    let mut session = Session::new();
    let mut pending: Option<AnswerSet> = None;
    tracing::debug!(session = %session.id(), "wizard session started");

    if !state.persona_service.is_configured() {
        println!();
        println!(
            "  {} No API key found for {}. Run {} first.",
            style("!").yellow().bold(),
            style(&state.config.generation.api_key_name).bold(),
            style("psmith secret set").yellow()
        );
    }

    loop {
        match session.screen() {
            Screen::Welcome => {
                println!();
                println!(
                    "  {} {}",
                    style("*").cyan().bold(),
                    style("Persona architect").bold()
                );
                println!(
                    "  {}",
                    style("Answer five questions to synthesize a system persona.").dim()
                );
                println!();

                let start = Confirm::new()
                    .with_prompt("Start?")
                    .default(true)
                    .interact()?;
                if !start {
                    return Ok(());
                }
                session.start();
            }

            Screen::Wizard => {
                let wizard = session.wizard();
                let question = wizard.current_question();
                println!();
                println!(
                    "  {} {}",
                    style(format!("[{}/{}]", wizard.position() + 1, wizard.total_steps())).dim(),
                    style(question.question).bold()
                );
                println!("  {}", style(question.description).dim());
                println!("  {}", style(question.placeholder).italic().dim());
                println!(
                    "  {}",
                    style(":back to go back, :reset to start over, :quit to exit").dim()
                );

                let raw: String = Input::new()
                    .with_prompt(">")
                    .with_initial_text(wizard.current_answer())
                    .allow_empty(true)
                    .interact_text()?;

                match parse_input(&raw) {
                    WizardInput::Back => {
                        session.back_step();
                    }
                    WizardInput::Reset => session.reset(),
                    WizardInput::Quit => return Ok(()),
                    WizardInput::Answer(answer) => {
                        session.wizard_mut().update_answer(answer);
                        if !session.wizard().can_advance() {
                            println!("  {} An answer is required.", style("✗").red());
                            continue;
                        }
                        pending = session.next_step();
                    }
                }
            }

            Screen::Generating => {
                let Some(answers) = pending.take() else {
                    session.persona_failed();
                    continue;
                };

                let progress = spinner("Synthesizing persona...");
                let result = state.persona_service.generate(&answers).await;
                progress.finish_and_clear();

                match result {
                    Ok(persona) => session.persona_ready(persona),
                    Err(err) => {
                        tracing::error!(code = err.code(), error = %err, "persona generation failed");
                        session.persona_failed();
                    }
                }
            }

            Screen::Result => {
                if let Some(persona) = session.persona() {
                    print_document("Persona", persona);
                }

                match choose(&menu(&session, MenuChoice::BuildPrompt))? {
                    MenuChoice::BuildPrompt => {
                        session.open_prompt_builder();
                    }
                    MenuChoice::StartOver => session.reset(),
                    _ => return Ok(()),
                }
            }

            Screen::PromptBuilder => {
                println!();
                println!(
                    "  {} Describe what you want to build ({} characters max). {}",
                    style("*").cyan().bold(),
                    state.prompt_service.max_prompt_characters(),
                    style(":back returns to the persona").dim()
                );

                let raw: String = Input::new()
                    .with_prompt("Objective")
                    .allow_empty(true)
                    .interact_text()?;

                let objective = match parse_input(&raw) {
                    WizardInput::Back => {
                        session.close_prompt_builder();
                        continue;
                    }
                    WizardInput::Reset => {
                        session.reset();
                        continue;
                    }
                    WizardInput::Quit => return Ok(()),
                    WizardInput::Answer(objective) => objective,
                };

                let persona = session.persona().unwrap_or_default().to_string();
                let progress = spinner("Building JSON prompt...");
                let result = state.prompt_service.generate(&persona, &objective).await;
                progress.finish_and_clear();

                match result {
                    Ok(prompt) => {
                        print_document("JSON prompt", &prompt);
                        println!(
                            "  {}",
                            style(character_count(
                                &prompt,
                                state.prompt_service.max_prompt_characters()
                            ))
                            .dim()
                        );
                        session.prompt_ready(prompt);
                    }
                    Err(err) => {
                        println!("  {} {}", style("✗").red().bold(), err);
                        session.prompt_failed(err.to_string());
                    }
                }
            }

            Screen::Error => {
                println!();
                println!(
                    "  {} {}",
                    style("✗").red().bold(),
                    session.error().unwrap_or_default()
                );

                match choose(&menu(&session, MenuChoice::Retry))? {
                    MenuChoice::Retry => session.retry(),
                    MenuChoice::StartOver => session.reset(),
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn print_document(title: &str, body: &str) {
    println!();
    println!("{}", style(format!("--- {title} ---")).cyan());
    println!("{body}");
    println!("{}", style("-".repeat(title.len() + 8)).cyan());
}

/// `"{used}/{limit} characters"`, counted in chars.
fn character_count(prompt: &str, limit: usize) -> String {
    format!("{}/{limit} characters", prompt.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_count_counts_chars() {
        assert_eq!(character_count("{\"a\":\"日本\"}", 3000), "10/3000 characters");
        assert_eq!(character_count("", 50), "0/50 characters");
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(parse_input(":back"), WizardInput::Back);
        assert_eq!(parse_input("  :b "), WizardInput::Back);
        assert_eq!(parse_input(":reset"), WizardInput::Reset);
        assert_eq!(parse_input(":q"), WizardInput::Quit);
    }

    #[test]
    fn test_menu_offers_start_over_after_welcome() {
        let mut session = Session::new();
        assert_eq!(
            menu(&session, MenuChoice::Retry),
            vec![MenuChoice::Retry, MenuChoice::Quit]
        );

        session.start();
        assert_eq!(
            menu(&session, MenuChoice::Retry),
            vec![MenuChoice::Retry, MenuChoice::StartOver, MenuChoice::Quit]
        );
    }

    #[test]
    fn test_answers_kept_verbatim() {
        assert_eq!(
            parse_input("  Senior PM "),
            WizardInput::Answer("  Senior PM ".to_string())
        );
        assert_eq!(parse_input(""), WizardInput::Answer(String::new()));
        assert_eq!(
            parse_input("go :back later"),
            WizardInput::Answer("go :back later".to_string())
        );
    }
}
