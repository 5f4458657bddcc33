use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::App;

mod cli;

fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(&app);

    match run(&app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(app: &App) {
    let filter = match app.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(app.log_filter())),
        _ => EnvFilter::new(app.log_filter()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(app: &App) -> Result<()> {
    let bytes = std::fs::read(&app.input).with_context(|| format!("failed to read {}", app.input.display()))?;
    debug!(input = %app.input.display(), size = bytes.len(), "archive loaded");

    let diagnostic_path = app.input.to_string_lossy();
    let parser = app.fragment_parser();
    let table = tabarc::invoke(&bytes, &app.archive_args(), &diagnostic_path, parser.as_ref())?;

    let mut stdout = io::stdout().lock();
    if app.pretty {
        serde_json::to_writer_pretty(&mut stdout, &table)?;
    } else {
        serde_json::to_writer(&mut stdout, &table)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Archive failures go out as their JSON record, anything else as text.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<tabarc::Error>() {
        Some(err) => match serde_json::to_string(&err.record()) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("error: {err}"),
        },
        None => eprintln!("error: {err:#}"),
    }
}
