//! Three-step diagnostic wizard (Brand → Symptoms → Result)

pub mod state;

pub use state::{WizardEvent, WizardState, WizardStep};
