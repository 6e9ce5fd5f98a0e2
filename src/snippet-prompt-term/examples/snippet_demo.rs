//! Interactive snippet prompt demo.
//!
//! ```text
//! cargo run -p snippet-prompt-term --example snippet_demo
//! cargo run -p snippet-prompt-term --example snippet_demo -- --definition deploy.toml --inline
//! ```
//!
//! Logs go to `snippet-prompt.log`; set `SNIPPET_PROMPT_LOG=debug` for
//! transition logs.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use snippet_prompt::prelude::*;
use snippet_prompt_term::{PromptError, TerminalOptions, run_snippet_prompt_with};

#[derive(Debug, Parser)]
#[command(name = "snippet_demo", about = "Fill in a command template interactively")]
struct Args {
    /// Prompt definition (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    definition: Option<PathBuf>,

    /// Draw below the cursor instead of on the alternate screen
    #[arg(long)]
    inline: bool,

    /// Color palette
    #[arg(long, default_value = "dark", value_parser = clap::builder::PossibleValuesParser::new(Palette::available().iter().copied()))]
    theme: String,

    /// Log file
    #[arg(long, default_value = "snippet-prompt.log")]
    log_file: PathBuf,
}

/// Keeps the log writer alive until exit.
struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

fn setup_file_logging(path: &PathBuf) -> Result<LogGuard> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_env("SNIPPET_PROMPT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(LogGuard { _guard: guard })
}

fn load_definition(path: &PathBuf) -> Result<PromptConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let spec = if path.extension().is_some_and(|ext| ext == "json") {
        PromptSpec::from_json_str(&source)?
    } else {
        PromptSpec::from_toml_str(&source)?
    };
    Ok(spec.into())
}

fn builtin_config() -> PromptConfig {
    PromptConfig::new(
        "Deploy a service",
        "kubectl --context {{cluster}} -n {{namespace}} \\\n  set image deploy/{{service}} {{service}}={{image}}",
    )
    .field(FieldSpec::select(
        "cluster",
        [
            OptionSpec::pair("Staging (eu-west)", "staging-euw"),
            OptionSpec::pair("Production (eu-west)", "prod-euw"),
        ],
    ))
    .field(FieldSpec::text("namespace").with_initial("default"))
    .field(FieldSpec::text("service").with_label("service name"))
    .field(FieldSpec::text("image").with_label("image:tag"))
    .validate(|values: &ValueMap| {
        if values["service"].is_empty() {
            return Err("Service name is required".to_string());
        }
        if !values["image"].contains(':') {
            return Err("Image must include a tag, e.g. api:1.4.2".to_string());
        }
        Ok(())
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = setup_file_logging(&args.log_file)?;

    let config = match &args.definition {
        Some(path) => load_definition(path)?,
        None => builtin_config(),
    };
    let config = config.theme(Theme::from_palette(&Palette::from_name(&args.theme)));

    let options = TerminalOptions::new().alternate_screen(!args.inline);
    match run_snippet_prompt_with(config, options) {
        Ok(values) => {
            tracing::info!("Submitted {} values", values.len());
            for (name, value) in &values {
                println!("{} = {}", name, value);
            }
            Ok(())
        }
        Err(PromptError::Interrupted) => {
            eprintln!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
