//! Command handler for REPL built-in commands
//!
//! Wizard commands (`/continue`, `/back`, `/analyze`, `/reset`) map to
//! wizard events and are applied by the session. The rest are handled here.

use anyhow::Result;
use colored::*;

use crate::knowledge::KnowledgeBase;
use crate::repl::display::DisplayManager;
use crate::repl::session::SessionManager;
use crate::wizard::{WizardEvent, WizardState};

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Brands,
    Symptoms,
    Continue,
    Back,
    Analyze,
    Reset,
    Status,
    History { limit: Option<usize> },
    Details { enable: bool },
    Clear,
    Exit,
    Unknown { input: String },
}

impl Command {
    /// Wizard event this command triggers, if any
    pub fn wizard_event(&self) -> Option<WizardEvent> {
        match self {
            Command::Continue => Some(WizardEvent::Continue),
            Command::Back => Some(WizardEvent::Back),
            Command::Analyze => Some(WizardEvent::Analyze),
            Command::Reset => Some(WizardEvent::Reset),
            _ => None,
        }
    }
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Command::Unknown { input: input.to_string() };
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown { input: input.to_string() };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "brands" => Command::Brands,
            "symptoms" | "list" => Command::Symptoms,
            "continue" | "next" => Command::Continue,
            "back" => Command::Back,
            "analyze" | "analyse" | "run" => Command::Analyze,
            "reset" | "new" => Command::Reset,
            "status" => Command::Status,
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "details" => {
                let enable = parts
                    .get(1)
                    .map(|s| s.to_lowercase() == "on" || s == &"1" || s == &"true")
                    .unwrap_or(true);
                Command::Details { enable }
            }
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a non-wizard command
    ///
    /// Returns true if REPL should continue, false if should exit
    pub fn execute(
        &self,
        command: Command,
        state: &WizardState,
        kb: &KnowledgeBase,
        session: &SessionManager,
        display: &mut DisplayManager,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::Brands => {
                display.show_brands(kb, state.brand.as_deref());
                Ok(true)
            }
            Command::Symptoms => {
                display.show_checklist(kb, &state.selection);
                Ok(true)
            }
            Command::Status => {
                self.show_status(state, session, display);
                Ok(true)
            }
            Command::History { limit } => {
                display.show_history(&session.get_history(limit.unwrap_or(10)));
                Ok(true)
            }
            Command::Details { enable } => {
                display.set_details(enable);
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Symptom details {}", status).cyan());
                Ok(true)
            }
            Command::Clear => {
                display.clear_screen()?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
            Command::Continue | Command::Back | Command::Analyze | Command::Reset => Ok(true),
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/brands", "List laptop brands"),
            ("/symptoms, /list", "Show the symptom checklist"),
            ("/continue, /next", "Go from brand to symptom selection"),
            ("/back", "Return to brand selection"),
            ("/analyze, /run", "Run the diagnosis"),
            ("/reset, /new", "Start a new diagnosis"),
            ("/status", "Show wizard and session status"),
            ("/history [n]", "Show last n diagnoses (default: 10)"),
            ("/details [on|off]", "Toggle symptom details in results"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Step 1: type a brand name or its number");
        println!("  - Step 2: type symptom ids or numbers to tick/untick them");
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display wizard and session status
    fn show_status(&self, state: &WizardState, session: &SessionManager, display: &DisplayManager) {
        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let duration = session.session_duration();
        let minutes = duration / 60;
        let seconds = duration % 60;
        let duration_str = if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        };

        println!(
            "  Wizard Step:      {} ({})",
            state.step.number().to_string().green(),
            state.step.title()
        );
        println!(
            "  Brand:            {}",
            state.brand.as_deref().unwrap_or("-").green()
        );
        println!(
            "  Selected:         {}",
            state.selection.len().to_string().green()
        );
        println!(
            "  Allowed Events:   {}",
            state.step.valid_events().join(", ")
        );
        println!(
            "  Diagnoses Run:    {} ({} in history)",
            session.diagnosis_count().to_string().green(),
            session.history_len()
        );
        println!(
            "  Errors:           {}",
            session.error_count().to_string().yellow()
        );
        if let Some(category) = session.most_common_category() {
            println!("  Most Common:      {}", category.as_str().green());
        }
        println!("  Session Duration: {}", duration_str.green());
        println!(
            "  Symptom Details:  {}",
            if display.shows_details() { "On".green() } else { "Off".red() }
        );
        println!();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}
