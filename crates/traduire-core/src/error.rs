//! Error kinds for a single translation attempt

use thiserror::Error;

/// Why a translate call failed. Every kind is terminal for the action
/// that triggered it; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Empty source text, or text that could not be encoded for a query
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The constructed request URL did not parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport failure or non-success HTTP status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Body was not JSON, or lacked `responseData.translatedText`
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type TranslateResult<T> = std::result::Result<T, TranslateError>;
