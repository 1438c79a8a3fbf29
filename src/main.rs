//! laptopdoc - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use laptopdoc::{
    cli::{Args, Commands, Verbosity},
    config::Config,
    diagnosis::{select_diagnosis, Selection},
    knowledge::KnowledgeBase,
    logging,
    repl::{display, DisplayManager, ReplSession},
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(msg) = args.validate() {
        anyhow::bail!(msg);
    }

    // The target file may not exist yet, so skip loading it
    if let Some(Commands::Config { init: true }) = &args.command {
        return init_config(&args);
    }

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let verbosity = args.verbosity(&config.display.default_verbosity);

    if !config.display.color_output {
        colored::control::set_override(false);
    }
    logging::init(verbosity, config.display.color_output);
    tracing::debug!(verbosity = verbosity.as_str(), "starting laptopdoc {}", VERSION);

    let knowledge_path = args.knowledge.clone().or_else(|| config.knowledge_path());
    let kb = KnowledgeBase::load(knowledge_path.as_deref())
        .context("Failed to load knowledge base")?;

    match &args.command {
        Some(Commands::Start) => run_wizard(&config, kb, verbosity)?,
        Some(Commands::Diagnose {
            brand,
            symptoms,
            json,
        }) => {
            let brand = brand
                .as_deref()
                .or(config.wizard.default_brand.as_deref())
                .context("No brand given. Use --brand or set wizard.default_brand")?;
            run_diagnose(&kb, brand, symptoms, *json || config.wants_json(), verbosity)?;
        }
        Some(Commands::Brands) => list_brands(&kb),
        Some(Commands::Symptoms) => list_symptoms(&kb),
        Some(Commands::Config { .. }) => show_config(&args, &config)?,
        None => {
            println!("laptopdoc v{} - Smart Diagnostic Tool", VERSION);
            println!("\nUsage:");
            println!("  laptopdoc start                         Interactive wizard");
            println!("  laptopdoc diagnose -b <BRAND> -s <ID>   One-shot diagnosis");
            println!("  laptopdoc brands                        List laptop brands");
            println!("  laptopdoc symptoms                      List symptoms");
            println!("  laptopdoc config [--init]               Show or create configuration");
            println!("\nExample:");
            println!("  laptopdoc diagnose --brand Dell -s power -s battery");
            println!();
        }
    }

    Ok(())
}

/// Run the interactive three-step wizard
fn run_wizard(config: &Config, kb: KnowledgeBase, verbosity: Verbosity) -> Result<()> {
    let mut repl = ReplSession::with_history(kb, config.history_file())?;
    repl.display_mut().set_details(verbosity.show_details());

    if let Some(brand) = &config.wizard.default_brand {
        if let Err(e) = repl.preselect_brand(brand) {
            tracing::debug!("default brand rejected: {}", e);
            DisplayManager::new()
                .show_warning(&format!("Ignoring configured default brand: {}", e));
        }
    }

    repl.show_welcome(VERSION);

    loop {
        match repl.read_input() {
            Ok(Some(input)) => {
                if !repl.handle_input(&input)? {
                    break;
                }
            }
            Ok(None) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(e) => {
                tracing::debug!("input interrupted: {}", e);
                println!("{}", "Interrupted. Type /exit to quit.".yellow());
            }
        }
    }

    if let Err(e) = repl.save() {
        tracing::warn!("failed to save input history: {}", e);
    }
    Ok(())
}

/// One-shot diagnosis from command-line flags
fn run_diagnose(
    kb: &KnowledgeBase,
    brand: &str,
    tokens: &[String],
    json: bool,
    verbosity: Verbosity,
) -> Result<()> {
    let brand = kb.resolve_brand(brand)?;

    let selection: Selection = tokens
        .iter()
        .map(|token| match kb.symptoms().resolve(token) {
            Some(symptom) => symptom.id.clone(),
            None => {
                tracing::warn!(token = token.as_str(), "unknown symptom, ignoring");
                token.clone()
            }
        })
        .collect();

    let result = select_diagnosis(&selection, kb.symptoms(), kb.rules())?.for_brand(brand);

    if json {
        println!("{}", result.to_json()?);
    } else {
        let display = DisplayManager::new().with_details(verbosity.show_details());
        display.show_result(&result);
    }
    Ok(())
}

fn list_brands(kb: &KnowledgeBase) {
    println!("{}", "Laptop Brands".bold().cyan());
    print!("{}", display::render_brands(kb, None));
}

fn list_symptoms(kb: &KnowledgeBase) {
    println!("{}", "Known Symptoms".bold().cyan());
    print!("{}", display::render_checklist(kb, &Selection::new()));
}

/// Write the default configuration unless one already exists
fn init_config(args: &Args) -> Result<()> {
    let path = args
        .config
        .clone()
        .or_else(Config::default_path)
        .context("Could not determine home directory")?;

    if path.exists() {
        anyhow::bail!("Configuration already exists at {}", path.display());
    }

    Config::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    DisplayManager::new().show_success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Print the effective configuration
fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = args
        .config
        .clone()
        .or_else(|| Config::default_path().filter(|p| p.exists()))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());

    println!("{} {}", "Configuration source:".bold(), source);
    println!();
    print!(
        "{}",
        toml::to_string_pretty(config).context("Failed to serialize configuration")?
    );
    Ok(())
}
