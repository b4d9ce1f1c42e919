use clap::{builder::styling, Parser, Subcommand};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser)]
#[command(name = "coderefine")]
#[command(author, version, about = "AI-powered code review and enhancement", long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override default LLM provider (used by review/serve)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review source code from a file or stdin
    Review {
        /// Path to the file to review ("-" or omitted reads stdin)
        path: Option<String>,

        /// Language of the submitted code (default: inferred from extension)
        #[arg(short, long)]
        language: Option<String>,

        /// Output format: text | json | markdown
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Shortcut for --format json
        #[arg(long)]
        json: bool,
    },

    /// Serve the single-page browser UI
    Serve {
        /// Address to bind
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate configuration and test the provider connection
    Validate,

    /// Print the configuration file path
    Path,
}
