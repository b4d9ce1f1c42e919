use thiserror::Error;

pub type Result<T> = std::result::Result<T, RefineError>;

#[derive(Error, Debug)]
pub enum RefineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM provider error: {0}")]
    Llm(String),

    #[error("LLM API error ({status}): {message}")]
    LlmApi { status: u16, message: String },

    #[error("{provider} refused to answer (finish reason: {reason})")]
    LlmContentBlocked { provider: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for errors that fit no other variant.
    #[error("{0}")]
    Other(String),
}

impl RefineError {
    /// Returns a one-line remediation hint for common failures, if any.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            RefineError::Config(msg) if msg.contains("API key not found") => {
                if msg.contains("Gemini") {
                    Some(
                        "Add 'api_key = \"AIza...\"' to [llm.providers.gemini] in ~/.config/coderefine/config.toml, or set GEMINI_API_KEY",
                    )
                } else if msg.contains("OpenAI") {
                    Some(
                        "Add 'api_key = \"sk-...\"' to [llm.providers.openai] in ~/.config/coderefine/config.toml, or set OPENAI_API_KEY",
                    )
                } else {
                    Some("Set api_key in ~/.config/coderefine/config.toml")
                }
            }
            RefineError::Config(msg) if msg.contains("not found in config") => Some(
                "Check your ~/.config/coderefine/config.toml or use the built-in providers: gemini, openai",
            ),
            RefineError::Network(_) => {
                Some("Check your network connection, proxy settings, or API endpoint configuration")
            }
            RefineError::Llm(msg) if msg.contains("timeout") => {
                Some("The API request timed out. Check network or try again later")
            }
            RefineError::Llm(msg) if msg.contains("connection failed") => {
                Some("Cannot connect to API server. Check endpoint URL, network, or DNS settings")
            }
            RefineError::LlmApi { status: 401, .. } => {
                Some("Check if your API key is valid and has not expired")
            }
            RefineError::LlmApi { status: 429, .. } => {
                Some("Rate limit exceeded. Wait a moment and try again, or upgrade your API plan")
            }
            RefineError::LlmApi { status, .. } if *status == 500 || *status == 503 => {
                Some("API service is temporarily unavailable. Try again in a few moments")
            }
            RefineError::LlmContentBlocked { .. } => {
                Some("The model declined this input. Try trimming the code or rephrasing")
            }
            RefineError::InvalidInput(msg) if msg.contains("empty") => {
                Some("Paste or pipe some source code first")
            }
            _ => None,
        }
    }
}
