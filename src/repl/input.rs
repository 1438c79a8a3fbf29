//! Input handler for the wizard REPL using rustyline
//!
//! Line editing, persistent history, a per-step prompt and tab completion
//! of brand names, symptom ids and `/` commands.

use anyhow::{Context as _, Result};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::path::PathBuf;

use crate::knowledge::KnowledgeBase;
use crate::wizard::WizardStep;

/// Slash commands offered for completion
const COMMANDS: &[&str] = &[
    "/help", "/brands", "/symptoms", "/continue", "/back", "/analyze", "/reset", "/status",
    "/history", "/details", "/clear", "/exit",
];

/// Completion words for the current wizard step
pub struct WizardHelper {
    step: WizardStep,
    brands: Vec<String>,
    symptom_ids: Vec<String>,
}

impl WizardHelper {
    pub fn new(kb: &KnowledgeBase) -> Self {
        WizardHelper {
            step: WizardStep::Brand,
            brands: kb.brands().to_vec(),
            symptom_ids: kb.symptoms().iter().map(|s| s.id.clone()).collect(),
        }
    }

    /// Candidates for the word ending at `pos`
    ///
    /// Returns the byte offset where the word starts and the matches.
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let head = &line[..pos];
        let start = head
            .rfind(|c: char| c.is_whitespace() || c == ',')
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &head[start..];

        if start == 0 && word.starts_with('/') {
            let matches = COMMANDS
                .iter()
                .filter(|c| c.starts_with(word))
                .map(|c| c.to_string())
                .collect();
            return (start, matches);
        }

        let pool: &[String] = match self.step {
            WizardStep::Brand if start == 0 => &self.brands,
            WizardStep::Symptoms => &self.symptom_ids,
            _ => &[],
        };
        let needle = word.to_lowercase();
        let matches = pool
            .iter()
            .filter(|w| w.to_lowercase().starts_with(&needle))
            .cloned()
            .collect();
        (start, matches)
    }
}

impl Completer for WizardHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for WizardHelper {
    type Hint = String;
}

impl Highlighter for WizardHelper {}

impl Validator for WizardHelper {}

impl Helper for WizardHelper {}

/// Input handler managing readline interface and command history
pub struct InputHandler {
    editor: Editor<WizardHelper, DefaultHistory>,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    pub fn new(kb: &KnowledgeBase) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(WizardHelper::new(kb)));

        Ok(InputHandler {
            editor,
            history_path: None,
            prompt: prompt_for(WizardStep::Brand),
        })
    }

    /// Create input handler with persistent history
    pub fn with_history(kb: &KnowledgeBase, history_file: PathBuf) -> Result<Self> {
        let mut handler = Self::new(kb)?;
        if history_file.exists() {
            if let Err(e) = handler.editor.load_history(&history_file) {
                tracing::debug!("could not load input history: {}", e);
            }
        }
        handler.history_path = Some(history_file);
        Ok(handler)
    }

    /// Switch prompt and completion to a wizard step
    pub fn set_step(&mut self, step: WizardStep) {
        self.prompt = prompt_for(step);
        if let Some(helper) = self.editor.helper_mut() {
            helper.step = step;
        }
    }

    /// Read a line of input from user
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input, empty for a blank line
    /// - Ok(None) for EOF (Ctrl-D)
    /// - Err on interrupt (Ctrl-C) or other errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => Err(anyhow::anyhow!("Interrupted")),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Save history to disk, creating the parent directory
    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        self.editor.save_history(path)?;
        Ok(())
    }
}

/// Prompt shown for a wizard step
pub fn prompt_for(step: WizardStep) -> String {
    let label = match step {
        WizardStep::Brand => "brand",
        WizardStep::Symptoms => "symptoms",
        WizardStep::Result => "result",
    };
    format!("laptopdoc [{}/3 {}]> ", step.number(), label)
}
