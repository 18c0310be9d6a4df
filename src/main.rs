//! Command line entry point: translate a key using a settings file.
//!
//! ```text
//! i18n-translator <SETTINGS> <KEY> [--count N] [--locale L]
//! ```

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use i18n_translator::config::load_settings;
use i18n_translator::{
    JsonFileLoader,
    PluralizationRules,
    TracingSink,
    Translate,
    TranslationError,
    TranslationManager,
};
use tracing_subscriber::EnvFilter;

/// Translate a message key using the catalogues named in a settings file.
#[derive(Parser, Debug)]
#[command(name = "i18n-translator", version, about)]
struct Args {
    /// Settings file path
    settings: PathBuf,
    /// Message key to translate
    key: String,
    /// Plural count used to pick a message variant
    #[arg(long)]
    count: Option<u64>,
    /// Locale overriding the configured default
    #[arg(long)]
    locale: Option<String>,
}

/// Loads the settings, builds the manager and translates the key.
fn run(args: &Args) -> Result<String, TranslationError> {
    let settings = load_settings(&args.settings)?;
    let mut manager = TranslationManager::new(PluralizationRules::new(), Arc::new(JsonFileLoader))
        .with_logger(Arc::new(TracingSink));
    manager.configure(&settings)?;

    let translator = manager.translator(args.locale.as_deref())?;
    translator.translate(&args.key, &HashMap::new(), args.count, None)
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(message) => {
            let mut stdout = std::io::stdout().lock();
            if writeln!(stdout, "{message}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
