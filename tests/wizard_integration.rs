//! Wizard flow integration tests
//!
//! Exercises the Brand → Symptoms → Result flow the way the REPL drives it.

use laptopdoc::{
    repl::events_for_input, Category, DiagnosisError, KnowledgeBase, LaptopDocError, WizardEvent,
    WizardState, WizardStep,
};

fn kb() -> KnowledgeBase {
    KnowledgeBase::builtin()
}

fn toggle(id: &str) -> WizardEvent {
    WizardEvent::ToggleSymptom(id.to_string())
}

#[test]
fn test_complete_flow_and_reset() {
    let kb = kb();
    let state = WizardState::new()
        .run(
            [
                WizardEvent::SelectBrand("Apple".to_string()),
                WizardEvent::Continue,
                toggle("noise"),
                toggle("keyboard"),
                toggle("wifi"),
                WizardEvent::Analyze,
            ],
            &kb,
        )
        .unwrap();

    assert_eq!(state.step, WizardStep::Result);
    let result = state.result.clone().unwrap();
    assert_eq!(result.brand, "Apple");
    assert_eq!(result.diagnosis.primary_category, Category::Hardware);
    assert_eq!(result.diagnosis.confidence, 75);
    assert_eq!(
        result.diagnosis.symptoms,
        vec!["Strange noises", "Keyboard issues", "WiFi connectivity problems"]
    );

    let fresh = state.transition(WizardEvent::Reset, &kb).unwrap();
    assert_eq!(fresh, WizardState::new());
    assert!(fresh.result.is_none());
}

#[test]
fn test_zero_symptoms_never_reaches_result() {
    let kb = kb();
    let at_symptoms = WizardState::new()
        .run(
            [WizardEvent::SelectBrand("MSI".to_string()), WizardEvent::Continue],
            &kb,
        )
        .unwrap();

    let err = at_symptoms.transition(WizardEvent::Analyze, &kb).unwrap_err();
    assert!(matches!(
        err,
        LaptopDocError::Diagnosis(DiagnosisError::EmptySelection)
    ));
    assert!(err.is_recoverable());

    let toggled_off = at_symptoms
        .run([toggle("slow"), toggle("slow")], &kb)
        .unwrap();
    assert!(toggled_off.selection.is_empty());
    assert!(toggled_off.transition(WizardEvent::Analyze, &kb).is_err());
}

#[test]
fn test_run_stops_at_first_failure() {
    let kb = kb();
    let result = WizardState::new().run(
        [
            WizardEvent::SelectBrand("Dell".to_string()),
            WizardEvent::Analyze,
            WizardEvent::Continue,
        ],
        &kb,
    );
    assert!(matches!(
        result,
        Err(LaptopDocError::InvalidTransition { .. })
    ));
}

#[test]
fn test_back_and_forth_preserves_selection_order() {
    let kb = kb();
    let state = WizardState::new()
        .run(
            [
                WizardEvent::SelectBrand("acer".to_string()),
                WizardEvent::Continue,
                toggle("wifi"),
                WizardEvent::Back,
                WizardEvent::SelectBrand("razer".to_string()),
                WizardEvent::Continue,
                toggle("screen"),
                WizardEvent::Analyze,
            ],
            &kb,
        )
        .unwrap();

    let result = state.result.unwrap();
    assert_eq!(result.brand, "Razer");
    assert_eq!(result.diagnosis.primary_category, Category::Network);
    assert_eq!(
        result.diagnosis.all_categories,
        vec![Category::Network, Category::Display]
    );
}

#[test]
fn test_plain_input_drives_wizard() {
    let kb = kb();
    let mut state = WizardState::new();
    for input in ["lenovo", "1 6 screen"] {
        let events = events_for_input(&state, input, &kb).unwrap();
        state = state.run(events, &kb).unwrap();
    }
    state = state.transition(WizardEvent::Analyze, &kb).unwrap();

    let result = state.result.as_ref().unwrap();
    assert_eq!(result.brand, "Lenovo");
    assert_eq!(result.diagnosis.primary_category, Category::Power);

    assert!(events_for_input(&state, "overheat", &kb).is_err());
}

#[test]
fn test_result_serializes_for_output() {
    let kb = kb();
    let state = WizardState::new()
        .run(
            [
                WizardEvent::SelectBrand("HP".to_string()),
                WizardEvent::Continue,
                toggle("crash"),
                WizardEvent::Analyze,
            ],
            &kb,
        )
        .unwrap();

    let json = serde_json::to_value(state.result.as_ref().unwrap()).unwrap();
    assert_eq!(json["brand"], "HP");
    assert_eq!(json["primaryCategory"], "system");
    assert_eq!(json["allCategories"], serde_json::json!(["system"]));
    assert_eq!(json["symptoms"], serde_json::json!(["Frequent crashes/freezes"]));
}
