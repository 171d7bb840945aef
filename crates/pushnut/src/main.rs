//! `pushnut` - push sample apps to Cloud Foundry and time every phase.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use pushnut::catalog::SAMPLE_APPS;
use pushnut::cf::CfCli;
use pushnut::cli::{exit_with_error, Cli, Command, ConfigCommand, PushCommand};
use pushnut::push::{cleanup_apps, run_target};
use pushnut::{init_logging, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    if let Err(err) = run(cli).await {
        exit_with_error(format!("{err:#}"));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Push(push_cmd) => handle_push(&config, &push_cmd).await,
        Command::Apps => handle_apps(),
        Command::Cleanup(cleanup_cmd) => {
            let cf = CfCli::from_config(&config.cf);
            cleanup_apps(&cf, cleanup_cmd.dry_run, &mut std::io::stdout())
                .await
                .context("cleanup failed")?;
            Ok(())
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_push(config: &Config, cmd: &PushCommand) -> anyhow::Result<()> {
    let settings = config.push_settings(
        cmd.delete.as_deref(),
        cmd.summary.as_deref(),
        cmd.output.as_deref(),
    );
    let target = cmd.target()?;
    let cf = CfCli::from_config(&config.cf);
    run_target(
        &cf,
        target,
        &settings,
        config.push.app_name_length,
        &mut std::io::stdout(),
    )
    .await?;
    Ok(())
}

fn handle_apps() -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{:<12} {:<12} ALIASES", "APP", "CAPTION")?;
    for app in SAMPLE_APPS {
        writeln!(
            out,
            "{:<12} {:<12} {}",
            app.command,
            app.caption,
            app.aliases.join(", ")
        )?;
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Push]");
                println!("  Delete:             {}", config.push.delete);
                println!("  Summary:            {}", config.push.summary);
                println!(
                    "  Output:             {}",
                    if config.push.output.is_empty() {
                        "(none)"
                    } else {
                        config.push.output.as_str()
                    }
                );
                println!("  App name length:    {}", config.push.app_name_length);
                println!();
                println!("[cf]");
                println!("  Binary:             {}", config.cf.binary);
                println!("  Push timeout (s):   {}", config.cf.push_timeout_secs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
