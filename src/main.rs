use anyhow::Result;
use boardcast::app::run_transcribe_command;
use boardcast::cli::{Cli, Commands, ConfigAction};
use boardcast::config::Config;
use boardcast::diagnostics::run_checks;
use clap::{CommandFactory, Parser};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => match cli.asset {
            Some(asset) => {
                let config = load_config(cli.config.as_deref())?;
                run_transcribe_command(
                    config,
                    asset,
                    cli.image,
                    cli.interval,
                    cli.workers,
                    cli.output,
                    cli.quiet,
                )
                .await?;
            }
            None => {
                Cli::command().print_help()?;
                std::process::exit(2);
            }
        },
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            eprintln!("boardcast {}", boardcast::version_string());
            if run_checks(&config) {
                eprintln!("All checks passed.");
            } else {
                eprintln!("Some checks failed, see above.");
                std::process::exit(1);
            }
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                let config = load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Init => {
                let path = cli
                    .config
                    .clone()
                    .unwrap_or_else(Config::default_path);
                if path.exists() {
                    eprintln!("Config already exists at {}", path.display());
                } else {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, toml::to_string_pretty(&Config::default())?)?;
                    eprintln!("Wrote default config to {}", path.display());
                }
            }
        },
    }

    Ok(())
}

/// Load config from an explicit path or the default location, with
/// environment overrides applied on top.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(p)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config.with_env_overrides())
}
