//! Diagnostic wizard state machine
//!
//! Three linear steps: Brand → Symptoms → Result.
//!
//! ```text
//! Transition Function: T: State × Event × KnowledgeBase → Result<State>
//!
//! Valid transitions:
//! 1. Brand    → Brand     (on: SelectBrand)
//! 2. Brand    → Symptoms  (on: Continue, brand chosen)
//! 3. Symptoms → Symptoms  (on: ToggleSymptom)
//! 4. Symptoms → Brand     (on: Back)
//! 5. Symptoms → Result    (on: Analyze, selector succeeds)
//! 6. *        → Brand     (on: Reset, everything cleared)
//! ```
//!
//! Transitions take `&self` and return a new state, so the caller still
//! holds the previous state when a transition fails.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diagnosis::{select_diagnosis, DiagnosisResult, Selection};
use crate::errors::{LaptopDocError, Result};
use crate::knowledge::KnowledgeBase;

/// Wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    /// Choose the laptop brand
    #[default]
    Brand,

    /// Tick the observed symptoms
    Symptoms,

    /// Show the diagnosis (terminal until reset)
    Result,
}

impl WizardStep {
    /// 1-based step number shown to the user
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Brand => 1,
            WizardStep::Symptoms => 2,
            WizardStep::Result => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Brand => "Select Brand",
            WizardStep::Symptoms => "Identify Symptoms",
            WizardStep::Result => "View Diagnosis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::Brand => "Choose your laptop brand to begin",
            WizardStep::Symptoms => "Select all symptoms that match your laptop's issues",
            WizardStep::Result => "Review the expert system analysis and recommendations",
        }
    }

    /// Events accepted in this step
    pub fn valid_events(&self) -> &'static [&'static str] {
        match self {
            WizardStep::Brand => &["SelectBrand", "Continue", "Reset"],
            WizardStep::Symptoms => &["ToggleSymptom", "Back", "Analyze", "Reset"],
            WizardStep::Result => &["Reset"],
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// User actions that drive the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    SelectBrand(String),
    Continue,
    ToggleSymptom(String),
    Back,
    Analyze,
    Reset,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SelectBrand(_) => "SelectBrand",
            WizardEvent::Continue => "Continue",
            WizardEvent::ToggleSymptom(_) => "ToggleSymptom",
            WizardEvent::Back => "Back",
            WizardEvent::Analyze => "Analyze",
            WizardEvent::Reset => "Reset",
        }
    }
}

/// Caller-owned wizard state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub brand: Option<String>,
    pub selection: Selection,
    pub result: Option<DiagnosisResult>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event, returning the next state
    pub fn transition(&self, event: WizardEvent, kb: &KnowledgeBase) -> Result<WizardState> {
        use WizardEvent::*;
        use WizardStep::*;

        let event_name = event.name();
        let next = match (self.step, event) {
            (_, Reset) => WizardState::new(),

            (Brand, SelectBrand(name)) => {
                let brand = kb.resolve_brand(&name)?;
                WizardState {
                    brand: Some(brand.to_string()),
                    ..self.clone()
                }
            }
            (Brand, Continue) => {
                if self.brand.is_none() {
                    return Err(self.invalid(event_name, "Select a laptop brand first"));
                }
                WizardState {
                    step: Symptoms,
                    ..self.clone()
                }
            }

            (Symptoms, ToggleSymptom(id)) => {
                let symptom = kb
                    .symptoms()
                    .find(&id)
                    .ok_or_else(|| LaptopDocError::UnknownSymptom(id.clone()))?;
                let mut next = self.clone();
                next.selection.toggle(&symptom.id);
                next
            }
            (Symptoms, Back) => WizardState {
                step: Brand,
                ..self.clone()
            },
            (Symptoms, Analyze) => {
                let diagnosis = select_diagnosis(&self.selection, kb.symptoms(), kb.rules())?;
                let brand = self.brand.clone().unwrap_or_default();
                WizardState {
                    step: Result,
                    result: Some(diagnosis.for_brand(brand)),
                    ..self.clone()
                }
            }

            (step, event) => {
                return Err(self.invalid(
                    event.name(),
                    &format!("{} is not available in step {}", event.name(), step.number()),
                ));
            }
        };

        tracing::debug!(from = %self.step, to = %next.step, event = event_name, "wizard transition");
        Ok(next)
    }

    /// Apply events in order, stopping at the first failure
    pub fn run<I>(&self, events: I, kb: &KnowledgeBase) -> Result<WizardState>
    where
        I: IntoIterator<Item = WizardEvent>,
    {
        let mut state = self.clone();
        for event in events {
            state = state.transition(event, kb)?;
        }
        Ok(state)
    }

    pub fn is_complete(&self) -> bool {
        self.step == WizardStep::Result && self.result.is_some()
    }

    fn invalid(&self, event: &str, reason: &str) -> LaptopDocError {
        LaptopDocError::InvalidTransition {
            from: self.step.to_string(),
            event: event.to_string(),
            reason: reason.to_string(),
        }
    }
}
