use crate::cli::ConfigAction;
use crate::config;
use crate::config::AppConfig;
use crate::error::{RefineError, Result};
use crate::llm::provider::create_provider;
use crate::ui;

/// Runs the config command.
pub async fn run(action: ConfigAction, app_config: &AppConfig, colored: bool) -> Result<()> {
    match action {
        ConfigAction::Validate => validate(app_config, colored).await,
        ConfigAction::Path => {
            let path = config::get_config_path()
                .ok_or_else(|| RefineError::Config("Failed to determine config path".to_string()))?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Validates configuration consistency and the provider connection.
async fn validate(app_config: &AppConfig, colored: bool) -> Result<()> {
    ui::step("1/2", "Validating configuration", colored);
    app_config.validate()?;
    ui::success("Configuration is valid", colored);

    ui::step("2/2", "Testing provider connection", colored);
    let provider = create_provider(app_config, None)?;

    let spinner = ui::Spinner::new(&format!("Pinging provider '{}'...", provider.name()));
    let result = provider.validate().await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            ui::success(
                &format!("Provider '{}' responded successfully", provider.name()),
                colored,
            );
            Ok(())
        }
        Err(e) => {
            ui::error(
                &format!("Provider '{}' validation failed", provider.name()),
                colored,
            );
            Err(e)
        }
    }
}
