use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use seigae::adapters::JsonFileStore;
use seigae::cli::{self, Cli};
use seigae::config::Settings;
use seigae::services::SeatingService;
use seigae::telemetry::init_tracing;
use seigae::DomainError;
use tracing::error;

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.log_json, if args.verbose { "debug" } else { "info" });

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = %e.code(), error = %e, "Command failed");
            let _ = writeln!(io::stderr(), "error[{}]: {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<(), DomainError> {
    let mut settings = Settings::from_env()?;
    args.apply_overrides(&mut settings);

    let store = JsonFileStore::new(settings.store_path.clone());
    let service = SeatingService::from_settings(store, &settings);
    let mut out = io::stdout().lock();
    cli::run(&service, &settings, args.command, &mut out)
}
