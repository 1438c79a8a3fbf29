//! Display manager for the wizard terminal UI
//!
//! Renders wizard steps, the symptom checklist and diagnosis results.
//! The `render_*` functions build strings so output can be tested; the
//! `show_*` methods print them.

use colored::*;
use crossterm::{
    cursor,
    execute,
    terminal::{Clear, ClearType},
};
use std::fmt::Write as _;
use std::io;

use crate::diagnosis::{DiagnosisResult, Selection};
use crate::knowledge::KnowledgeBase;
use crate::repl::session::DiagnosisRecord;
use crate::wizard::{WizardState, WizardStep};

const RULE_WIDTH: usize = 60;

/// Display manager for wizard UI
pub struct DisplayManager {
    show_details: bool,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            show_details: false,
        }
    }

    /// Include per-symptom detail in results
    pub fn with_details(mut self, enable: bool) -> Self {
        self.show_details = enable;
        self
    }

    pub fn set_details(&mut self, enable: bool) {
        self.show_details = enable;
    }

    pub fn shows_details(&self) -> bool {
        self.show_details
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str) {
        let width = 64;
        let rule = "=".repeat(width).cyan();
        let title = format!("  laptopdoc {} - Smart Diagnostic Tool", version);

        println!("\n{}", rule);
        println!("{}", title.bold().cyan());
        println!("{}", "  Identify laptop issues step by step".dimmed());
        println!("{}\n", rule);
        println!(
            "Follow the prompts (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Show the header and body of the current step
    pub fn show_step(&self, state: &WizardState, kb: &KnowledgeBase) {
        print!("{}", render_step_header(state.step));
        match state.step {
            WizardStep::Brand => print!("{}", render_brands(kb, state.brand.as_deref())),
            WizardStep::Symptoms => print!("{}", render_checklist(kb, &state.selection)),
            WizardStep::Result => {
                if let Some(result) = &state.result {
                    print!("{}", render_result(result, self.show_details));
                }
            }
        }
    }

    pub fn show_brands(&self, kb: &KnowledgeBase, selected: Option<&str>) {
        print!("{}", render_brands(kb, selected));
    }

    pub fn show_checklist(&self, kb: &KnowledgeBase, selection: &Selection) {
        print!("{}", render_checklist(kb, selection));
    }

    pub fn show_result(&self, result: &DiagnosisResult) {
        print!("{}", render_result(result, self.show_details));
    }

    pub fn show_history(&self, records: &[&DiagnosisRecord]) {
        if records.is_empty() {
            println!("{}", "No diagnoses in history yet.".yellow());
            return;
        }

        self.show_section(&format!("Diagnosis History (last {}):", records.len()));
        for (i, record) in records.iter().enumerate() {
            let index = records.len() - i;
            println!(
                "  {}. {} {}",
                index.to_string().cyan(),
                record.result.summary(),
                record.timestamp.format("%H:%M:%S").to_string().dimmed()
            );
        }
        println!();
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    pub fn show_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message.green());
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(RULE_WIDTH).cyan());
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Step indicator, e.g. "[✓] [2] [3]  Identify Symptoms"
pub fn render_step_header(step: WizardStep) -> String {
    let mut out = String::from("\n");
    for s in [WizardStep::Brand, WizardStep::Symptoms, WizardStep::Result] {
        let marker = if s.number() < step.number() {
            "[✓]".green().to_string()
        } else if s == step {
            format!("[{}]", s.number()).bold().cyan().to_string()
        } else {
            format!("[{}]", s.number()).dimmed().to_string()
        };
        let _ = write!(out, "{} ", marker);
    }
    let _ = writeln!(out, " {}", step.title().bold());
    let _ = writeln!(out, "{}", step.description().dimmed());
    out
}

/// Numbered brand list, marking the current choice
pub fn render_brands(kb: &KnowledgeBase, selected: Option<&str>) -> String {
    let mut out = String::new();
    for (i, brand) in kb.brands().iter().enumerate() {
        let marker = if Some(brand.as_str()) == selected {
            "●".green()
        } else {
            "○".dimmed()
        };
        let _ = writeln!(out, "  {} {:>2}. {}", marker, i + 1, brand);
    }
    out
}

/// Symptom checkboxes with category badges
pub fn render_checklist(kb: &KnowledgeBase, selection: &Selection) -> String {
    let mut out = String::new();
    for (i, symptom) in kb.symptoms().iter().enumerate() {
        let checkbox = if selection.contains(&symptom.id) {
            "[x]".green().bold()
        } else {
            "[ ]".normal()
        };
        let _ = writeln!(
            out,
            "  {} {:>2}. {:<30} {:<10} {}",
            checkbox,
            i + 1,
            symptom.label,
            symptom.id.dimmed(),
            format!("({})", symptom.category).cyan()
        );
    }
    let _ = writeln!(out, "\n  {} selected", selection.len());
    out
}

/// Full diagnosis report
pub fn render_result(result: &DiagnosisResult, show_details: bool) -> String {
    let diagnosis = &result.diagnosis;
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "Diagnosis Complete".bold().green());
    let _ = writeln!(
        out,
        "Analyzed {} symptom(s) for {} laptop",
        diagnosis.symptoms.len(),
        result.brand
    );

    if show_details {
        for label in &diagnosis.symptoms {
            let _ = writeln!(out, "  {} {}", "-".dimmed(), label.dimmed());
        }
    }

    let _ = writeln!(
        out,
        "\n{}",
        format!("Possible Issues (Confidence: {}%)", diagnosis.confidence)
            .bold()
            .cyan()
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH).cyan());
    for d in &diagnosis.diagnoses {
        let _ = writeln!(out, "  {} {}", "•".cyan(), d);
    }

    let _ = writeln!(out, "\n{}", "Recommended Actions".bold().cyan());
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH).cyan());
    for (i, rec) in diagnosis.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", (i + 1).to_string().cyan(), rec);
    }

    let categories: Vec<&str> = diagnosis.all_categories.iter().map(|c| c.as_str()).collect();
    let _ = writeln!(out, "\n{}", "Forward Chaining Analysis".bold().cyan());
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH).cyan());
    let _ = writeln!(out, "  Symptoms Detected");
    let _ = writeln!(out, "    ↓ {}", categories.join(", "));
    let _ = writeln!(
        out,
        "  Primary Category: {}",
        diagnosis.primary_category.as_str().bold()
    );
    let _ = writeln!(out, "    ↓");
    let _ = writeln!(out, "  Diagnosis Generated");
    out
}
