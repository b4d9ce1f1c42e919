use coderefine::*;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // init does not need a valid config and must work when the file is broken.
    let needs_config = matches!(
        &cli.command,
        Commands::Review { .. } | Commands::Serve { .. } | Commands::Config { .. }
    );

    let config = if needs_config {
        config::load_config()?
    } else {
        config::load_config().unwrap_or_default()
    };

    let rt = Runtime::new()?;

    rt.block_on(async {
        match cli.command {
            Commands::Review {
                ref path,
                ref language,
                ref format,
                json,
            } => {
                let options = commands::ReviewOptions::from_cli(
                    &cli,
                    path.as_deref(),
                    language.as_deref(),
                    format,
                    json,
                );
                let is_json = options.format.is_json();
                if let Err(e) = commands::review::run(&options, &config).await {
                    if is_json {
                        let _ =
                            commands::json::output_json_error::<llm::ReviewReport>(&e);
                        std::process::exit(1);
                    }
                    report_error_and_exit(&e, config.ui.colored);
                }
                Ok(())
            }
            Commands::Serve { ref bind, port } => {
                let options = commands::ServeOptions::from_cli(&cli, bind.as_deref(), port);
                if let Err(e) = commands::serve::run(&options, &config).await {
                    report_error_and_exit(&e, config.ui.colored);
                }
                Ok(())
            }
            Commands::Init { force } => {
                if let Err(e) = commands::init::run(force, config.ui.colored) {
                    report_error_and_exit(&e, config.ui.colored);
                }
                Ok(())
            }
            Commands::Config { action } => {
                if let Err(e) = commands::config::run(action, &config, config.ui.colored).await {
                    report_error_and_exit(&e, config.ui.colored);
                }
                Ok(())
            }
        }
    })
}

/// Prints the error with its suggestion (when available) and exits non-zero.
fn report_error_and_exit(e: &error::RefineError, colored: bool) -> ! {
    ui::error(&e.to_string(), colored);
    if let Some(suggestion) = e.suggestion() {
        println!();
        println!("{}", ui::info(suggestion, colored));
    }
    std::process::exit(1);
}
