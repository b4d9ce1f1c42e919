mod app;
mod llm;
mod network;

pub use app::{AppConfig, ReviewConfig, ServerConfig, UiConfig};
pub use llm::{ApiStyle, LLMConfig, ProviderConfig};
pub use network::NetworkConfig;
