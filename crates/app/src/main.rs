//! Courier - command-line API tester
//!
//! Composes requests, substitutes `{{variables}}` from the selected
//! environment, sends them, and keeps templates and history in the data
//! directory.

mod cli;
mod commands;
mod context;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use courier_infrastructure::{Settings, SettingsOverrides};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::context::CliContext;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "info,courier=debug,courier_application=debug,courier_infrastructure=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let overrides = SettingsOverrides {
        data_dir: cli.data_dir,
        environment: cli.environment,
    };
    let settings = Settings::load(&overrides).context("failed to load settings")?;
    let mut ctx = CliContext::open(&settings, overrides.environment.is_some())?;

    match cli.command {
        Commands::Send(args) => commands::send::run(&mut ctx, args).await,
        Commands::Env(args) => {
            commands::environment::run(&mut ctx, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Template(args) => commands::template::run(&mut ctx, args).await,
        Commands::History(args) => commands::history::run(&mut ctx, args).await,
    }
}
