use super::options::ServeOptions;
use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::provider::create_provider;
use crate::ui;
use crate::web::WebServer;

/// Runs the serve command: start the single-page review UI.
pub async fn run(options: &ServeOptions<'_>, config: &AppConfig) -> Result<()> {
    let provider = create_provider(config, options.provider_override)?;

    let bind = options.effective_bind(config);
    let port = options.effective_port(config);

    ui::success(
        &format!("CodeRefine UI ready at http://{}:{}", bind, port),
        config.ui.colored,
    );
    println!(
        "{}",
        ui::info(
            &format!("Reviews run through provider '{}'", provider.name()),
            config.ui.colored
        )
    );

    let server = WebServer::new(provider, config.clone());
    server.run(&bind, port).await
}
