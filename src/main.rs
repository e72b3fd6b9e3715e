mod cli;
mod config;
mod download;
mod error;
mod extract;
mod fetch;
mod pipeline;
mod progress;
mod ui;
mod wallpaper;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use crate::cli::{Cli, Commands, ConfigCommands, RunArgs};
use crate::config::ApodConfig;
use crate::error::ApodError;
use crate::fetch::HttpFetcher;
use crate::pipeline::RunOptions;
use crate::ui::prelude::*;
use crate::wallpaper::AppleScript;

fn main() {
    let cli = Cli::parse();
    ui::set_debug_mode(cli.debug);
    ui::init(cli.output, !cli.no_color);

    if let Err(err) = real_main(cli) {
        std::process::exit(report(&err));
    }
}

fn real_main(cli: Cli) -> Result<()> {
    let config_path = ApodConfig::resolve_path(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => handle_run(&config_path, args),
        Commands::Config { command } => handle_config(&config_path, command),
    }
}

fn handle_run(config_path: &Path, args: RunArgs) -> Result<()> {
    let mut config = ApodConfig::load(config_path)?;
    if let Some(dir) = args.dir {
        config.download_dir = Some(dir);
    }
    if let Some(attempts) = args.attempts {
        config.probe_attempts = attempts;
    }
    if let Some(delay) = args.delay {
        config.probe_delay_secs = delay;
    }
    emit(
        Level::Debug,
        "apod.config.loaded",
        &format!("Using configuration from {}", config_path.display()),
        None,
    );

    let fetcher = HttpFetcher::new(config.timeout())?;
    let setter = AppleScript {
        interpreter: config.interpreter.clone(),
    };
    let outcome = pipeline::run(
        &config,
        RunOptions {
            no_set: args.no_set,
        },
        &fetcher,
        &setter,
    )?;
    emit(
        Level::Debug,
        "apod.run.finished",
        "Run finished",
        Some(serde_json::json!({ "image": outcome.image, "applied": outcome.applied })),
    );
    Ok(())
}

fn handle_config(config_path: &Path, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = ApodConfig::load(config_path)?;
            match get_output_format() {
                OutputFormat::Json => emit(
                    Level::Info,
                    "apod.config.show",
                    &config_path.display().to_string(),
                    Some(serde_json::to_value(&config).context("serializing config")?),
                ),
                OutputFormat::Text => {
                    print!(
                        "{}",
                        toml::to_string_pretty(&config).context("serializing config to toml")?
                    );
                }
            }
        }
        ConfigCommands::Init => {
            if config_path.exists() {
                emit(
                    Level::Warn,
                    "apod.config.exists",
                    &format!("{} already exists; leaving it untouched", config_path.display()),
                    None,
                );
            } else {
                ApodConfig::default().save(config_path)?;
                emit(
                    Level::Success,
                    "apod.config.created",
                    &format!("Wrote {}", config_path.display()),
                    None,
                );
            }
        }
        ConfigCommands::Path => println!("{}", config_path.display()),
    }
    Ok(())
}

/// Render a fatal error and pick the exit status.
fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApodError>() {
        Some(ApodError::NoImage) => {
            emit(Level::Info, "apod.extract.none", &err.to_string(), None);
            ApodError::NoImage.exit_code()
        }
        Some(apod_err) => {
            emit(Level::Error, "apod.error", &format!("{err:#}"), None);
            apod_err.exit_code()
        }
        None => {
            emit(Level::Error, "apod.error", &format!("{err:#}"), None);
            1
        }
    }
}
