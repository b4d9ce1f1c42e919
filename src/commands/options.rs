//! Command option structs.
//!
//! One struct per command, constructed from parsed CLI arguments so command
//! implementations take a single parameter instead of a flag list.

use super::format::OutputFormat;
use crate::cli::Cli;
use crate::config::AppConfig;

/// Review command options.
///
/// Constructed from CLI parameters and passed to `commands::review::run()`.
#[derive(Debug, Clone)]
pub struct ReviewOptions<'a> {
    /// File to review; `None` or `"-"` reads stdin.
    pub path: Option<&'a str>,

    /// Language hint override (`--language`).
    pub language: Option<&'a str>,

    /// Output format.
    pub format: OutputFormat,

    /// Whether verbose mode is enabled.
    pub verbose: bool,

    /// Provider override (`--provider`).
    pub provider_override: Option<&'a str>,
}

impl<'a> ReviewOptions<'a> {
    /// Constructs options from CLI parameters.
    pub fn from_cli(
        cli: &'a Cli,
        path: Option<&'a str>,
        language: Option<&'a str>,
        format: &str,
        json: bool,
    ) -> Self {
        Self {
            path,
            language,
            format: OutputFormat::from_cli(format, json),
            verbose: cli.verbose,
            provider_override: cli.provider.as_deref(),
        }
    }

    /// Effective colored setting, combining output format and config.
    ///
    /// JSON/Markdown always disable colors; text follows `ui.colored`.
    pub fn effective_colored(&self, config: &AppConfig) -> bool {
        self.format.effective_colored(config.ui.colored)
    }
}

/// Serve command options.
///
/// Constructed from CLI parameters and passed to `commands::serve::run()`.
#[derive(Debug, Clone)]
pub struct ServeOptions<'a> {
    /// Bind address override (`--bind`).
    pub bind: Option<&'a str>,

    /// Port override (`--port`).
    pub port: Option<u16>,

    /// Provider override (`--provider`).
    pub provider_override: Option<&'a str>,
}

impl<'a> ServeOptions<'a> {
    /// Constructs options from CLI parameters.
    pub fn from_cli(cli: &'a Cli, bind: Option<&'a str>, port: Option<u16>) -> Self {
        Self {
            bind,
            port,
            provider_override: cli.provider.as_deref(),
        }
    }

    /// Effective bind address (CLI flag wins over config).
    pub fn effective_bind(&self, config: &AppConfig) -> String {
        self.bind
            .map(str::to_string)
            .unwrap_or_else(|| config.server.bind.clone())
    }

    /// Effective port (CLI flag wins over config).
    pub fn effective_port(&self, config: &AppConfig) -> u16 {
        self.port.unwrap_or(config.server.port)
    }
}
