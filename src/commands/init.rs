use std::fs;

use crate::config;
use crate::error::{RefineError, Result};
use crate::ui;

/// Default configuration template written by `coderefine init`.
const CONFIG_TEMPLATE: &str = r#"# coderefine configuration
#
# API keys may also come from the environment:
#   GEMINI_API_KEY, OPENAI_API_KEY

[llm]
default_provider = "gemini"

[llm.providers.gemini]
# api_key = "AIza..."
model = "gemini-1.5-flash"

[llm.providers.openai]
# api_key = "sk-..."
model = "gpt-4o-mini"
# endpoint = "https://api.openai.com"  # any OpenAI-compatible base URL

[review]
default_language = "python"
max_code_bytes = 262144
# custom_prompt = "Focus on security issues"

[server]
bind = "127.0.0.1"
port = 8787

[ui]
colored = true

[network]
request_timeout = 120
connect_timeout = 10
max_retries = 3
"#;

/// Initializes the configuration file.
pub fn run(force: bool, colored: bool) -> Result<()> {
    let config_dir = config::get_config_dir()
        .ok_or_else(|| RefineError::Config("Failed to determine config directory".to_string()))?;

    let config_file = config_dir.join("config.toml");

    if config_file.exists() && !force {
        ui::warning(
            &format!("Config file already exists: {}", config_file.display()),
            colored,
        );
        println!();
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    fs::create_dir_all(&config_dir)?;
    ui::success(
        &format!("Created config directory: {}", config_dir.display()),
        colored,
    );

    fs::write(&config_file, CONFIG_TEMPLATE)?;
    ui::success(
        &format!("Created config file: {}", config_file.display()),
        colored,
    );

    // The file may hold an API key; keep it private.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&config_file)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&config_file, perms)?;
        ui::success("Set file permissions to 600", colored);
    }

    println!();
    println!("{}", ui::info("Next steps:", colored));
    println!("  1. Set your API key (GEMINI_API_KEY, or api_key in the config file)");
    println!("  2. Run: coderefine review <file>");
    println!("  3. Or open the browser UI: coderefine serve");
    println!();

    Ok(())
}
