//! Interactive wizard REPL
//!
//! Drives the three-step wizard from a terminal: plain input picks a brand
//! or ticks symptoms, `/` commands navigate and inspect the session.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use std::path::PathBuf;

use crate::errors::LaptopDocError;
use crate::knowledge::KnowledgeBase;
use crate::repl::commands::{is_command, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
pub use crate::repl::session::{DiagnosisRecord, SessionManager};
use crate::wizard::{WizardEvent, WizardState, WizardStep};

/// REPL session coordinator
///
/// Owns the wizard state and replaces it only when a transition succeeds.
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
    knowledge: KnowledgeBase,
    state: WizardState,
}

impl ReplSession {
    pub fn new(knowledge: KnowledgeBase) -> Result<Self> {
        Self::build(InputHandler::new(&knowledge)?, knowledge)
    }

    /// Create REPL session with persistent input history
    pub fn with_history(knowledge: KnowledgeBase, history_path: PathBuf) -> Result<Self> {
        Self::build(InputHandler::with_history(&knowledge, history_path)?, knowledge)
    }

    fn build(input_handler: InputHandler, knowledge: KnowledgeBase) -> Result<Self> {
        Ok(ReplSession {
            input_handler,
            command_handler: CommandHandler::new(),
            session_manager: SessionManager::new(),
            display_manager: DisplayManager::new(),
            knowledge,
            state: WizardState::new(),
        })
    }

    /// Preselect a brand (from configuration)
    pub fn preselect_brand(&mut self, brand: &str) -> Result<()> {
        self.state = self
            .state
            .transition(WizardEvent::SelectBrand(brand.to_string()), &self.knowledge)?;
        Ok(())
    }

    pub fn show_welcome(&self, version: &str) {
        self.display_manager.show_banner(version);
        self.display_manager.show_step(&self.state, &self.knowledge);
    }

    /// Read a line of input from user
    pub fn read_input(&mut self) -> Result<Option<String>> {
        self.input_handler.set_step(self.state.step);
        self.input_handler.read_line()
    }

    /// Handle user input (command, brand or symptom tokens)
    ///
    /// Returns true if session should continue, false to exit
    pub fn handle_input(&mut self, input: &str) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(true);
        }

        if is_command(input) {
            let command = self.command_handler.parse(input);
            if let Some(event) = command.wizard_event() {
                self.apply(vec![event]);
                return Ok(true);
            }
            return self.command_handler.execute(
                command,
                &self.state,
                &self.knowledge,
                &self.session_manager,
                &mut self.display_manager,
            );
        }

        match events_for_input(&self.state, input, &self.knowledge) {
            Ok(events) => self.apply(events),
            Err(e) => self.report(&e),
        }
        Ok(true)
    }

    /// Apply events atomically; on failure the state is left unchanged
    fn apply(&mut self, events: Vec<WizardEvent>) {
        let before = self.state.step;
        match self.state.run(events, &self.knowledge) {
            Ok(next) => {
                let completed = !self.state.is_complete() && next.is_complete();
                self.state = next;
                if completed {
                    if let Some(result) = &self.state.result {
                        self.session_manager.record_diagnosis(result.clone());
                        self.display_manager.show_success("Diagnosis complete!");
                    }
                }
                if self.state.step != before || completed {
                    self.display_manager.show_step(&self.state, &self.knowledge);
                } else if self.state.step == WizardStep::Symptoms {
                    self.display_manager
                        .show_checklist(&self.knowledge, &self.state.selection);
                } else if let Some(brand) = &self.state.brand {
                    self.display_manager
                        .show_info(&format!("Brand set to {}. Type /continue.", brand));
                }
            }
            Err(e) => self.report(&e),
        }
    }

    /// Show an error; only input mistakes count against the session
    fn report(&mut self, error: &LaptopDocError) {
        if error.is_recoverable() {
            self.session_manager.record_error();
        } else {
            tracing::warn!("wizard error: {}", error);
        }
        self.display_manager.show_error(&error.to_string());
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    pub fn display_mut(&mut self) -> &mut DisplayManager {
        &mut self.display_manager
    }

    /// Save input history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }
}

/// Translate plain (non-command) input into wizard events
///
/// - Brand step: a brand name or its 1-based number, followed by Continue
/// - Symptoms step: symptom ids or numbers, separated by spaces or commas
/// - Result step: nothing is accepted; the user must /reset
pub fn events_for_input(
    state: &WizardState,
    input: &str,
    kb: &KnowledgeBase,
) -> crate::errors::Result<Vec<WizardEvent>> {
    let input = input.trim();
    match state.step {
        WizardStep::Brand => {
            let brand = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| kb.brands().get(i))
                .map(String::as_str)
                .unwrap_or(input);
            Ok(vec![
                WizardEvent::SelectBrand(brand.to_string()),
                WizardEvent::Continue,
            ])
        }
        WizardStep::Symptoms => input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|token| {
                kb.symptoms()
                    .resolve(token)
                    .map(|s| WizardEvent::ToggleSymptom(s.id.clone()))
                    .ok_or_else(|| LaptopDocError::UnknownSymptom(token.to_string()))
            })
            .collect(),
        WizardStep::Result => Err(LaptopDocError::InvalidTransition {
            from: state.step.to_string(),
            event: "input".to_string(),
            reason: "Diagnosis complete; type /reset to start over".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Category;

    fn session() -> ReplSession {
        ReplSession::new(KnowledgeBase::builtin()).unwrap()
    }

    #[test]
    fn test_events_for_brand_number() {
        let kb = KnowledgeBase::builtin();
        let events = events_for_input(&WizardState::new(), "3", &kb).unwrap();
        assert_eq!(
            events,
            vec![
                WizardEvent::SelectBrand("Lenovo".to_string()),
                WizardEvent::Continue
            ]
        );
    }

    #[test]
    fn test_events_for_symptom_tokens() {
        let kb = KnowledgeBase::builtin();
        let state = WizardState {
            step: WizardStep::Symptoms,
            ..WizardState::new()
        };
        let events = events_for_input(&state, "overheat, 8 crash", &kb).unwrap();
        assert_eq!(
            events,
            vec![
                WizardEvent::ToggleSymptom("overheat".to_string()),
                WizardEvent::ToggleSymptom("wifi".to_string()),
                WizardEvent::ToggleSymptom("crash".to_string()),
            ]
        );
        assert!(events_for_input(&state, "overheat smoke", &kb).is_err());
    }

    #[test]
    fn test_handle_empty_input() {
        let mut session = session();
        assert!(session.handle_input("").unwrap());
        assert!(session.handle_input("   ").unwrap());
    }

    #[test]
    fn test_handle_exit_command() {
        let mut session = session();
        assert!(!session.handle_input("/exit").unwrap());
    }

    #[test]
    fn test_full_wizard_through_input() {
        let mut session = session();
        session.handle_input("dell").unwrap();
        assert_eq!(session.state().step, WizardStep::Symptoms);

        session.handle_input("screen wifi").unwrap();
        session.handle_input("/analyze").unwrap();

        let state = session.state();
        assert!(state.is_complete());
        let result = state.result.as_ref().unwrap();
        assert_eq!(result.brand, "Dell");
        assert_eq!(result.diagnosis.primary_category, Category::Display);
        assert_eq!(session.session().diagnosis_count(), 1);
    }

    #[test]
    fn test_bad_input_keeps_state() {
        let mut session = session();
        session.handle_input("Toshiba").unwrap();
        assert_eq!(session.state(), &WizardState::new());
        assert_eq!(session.session().error_count(), 1);

        session.handle_input("hp").unwrap();
        session.handle_input("overheat smoke").unwrap();
        assert!(session.state().selection.is_empty());
    }

    #[test]
    fn test_analyze_without_symptoms_does_not_advance() {
        let mut session = session();
        session.handle_input("asus").unwrap();
        session.handle_input("/analyze").unwrap();
        assert_eq!(session.state().step, WizardStep::Symptoms);
        assert_eq!(session.session().diagnosis_count(), 0);
    }

    #[test]
    fn test_preselect_brand() {
        let mut session = session();
        session.preselect_brand("razer").unwrap();
        assert_eq!(session.state().brand.as_deref(), Some("Razer"));
        assert!(session.preselect_brand("Toshiba").is_err());
    }
}
