use serde::Serialize;

use crate::error::{RefineError, Result};

/// Unified JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorJson {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorJson {
    /// Builds an `ErrorJson` from a `RefineError`.
    pub fn from_error(err: &RefineError) -> Self {
        Self {
            code: error_to_code(err),
            message: err.to_string(),
            suggestion: err.suggestion().map(String::from),
        }
    }
}

/// Generic JSON output envelope.
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorJson>,
}

/// Prints a JSON-formatted error envelope.
pub fn output_json_error<T: Serialize>(err: &RefineError) -> Result<()> {
    let output = JsonOutput::<T> {
        success: false,
        data: None,
        error: Some(ErrorJson::from_error(err)),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Maps an error variant to its JSON code string.
pub fn error_to_code(err: &RefineError) -> String {
    match err {
        RefineError::InvalidInput(_) => "INVALID_INPUT",
        RefineError::Config(_) => "CONFIG_ERROR",
        RefineError::ConfigParse(_) => "CONFIG_ERROR",
        RefineError::Llm(_) => "LLM_ERROR",
        RefineError::LlmApi { .. } => "LLM_API_ERROR",
        RefineError::LlmContentBlocked { .. } => "LLM_CONTENT_BLOCKED",
        RefineError::Network(_) => "NETWORK_ERROR",
        RefineError::Io(_) => "IO_ERROR",
        _ => "UNKNOWN_ERROR",
    }
    .to_string()
}
