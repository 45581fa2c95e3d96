//! Error types for the Vibrance HTTP client

use thiserror::Error;

/// Message shown to callers for every failure that is not their fault
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Errors that can occur when logging in to or scraping the Vibrance site
#[derive(Error, Debug)]
pub enum VibranceError {
    /// The upstream login form rejected the credentials
    ///
    /// Carries the upstream's own error text, trimmed.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The upstream could not be reached or answered with a non-success status
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// The profile page is missing an element the extractors depend on
    #[error("Unexpected profile page structure: missing {0}")]
    UnexpectedDocumentStructure(&'static str),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl VibranceError {
    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, VibranceError::InvalidCredentials(_))
    }

    /// HTTP status class a JSON front end should answer with
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }

    /// Message that is safe to show to the end user
    ///
    /// Only the upstream's login message is passed through; everything else
    /// collapses to [`INTERNAL_ERROR_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            VibranceError::InvalidCredentials(message) => message.clone(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_is_client_error() {
        let err = VibranceError::InvalidCredentials("Incorrect password".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Incorrect password");
        assert_eq!(err.to_string(), "Incorrect password");
    }

    #[test]
    fn test_structure_error_hides_details() {
        let err = VibranceError::UnexpectedDocumentStructure("personal details table");
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(err.to_string().contains("personal details table"));
    }

    #[test]
    fn test_client_init_is_server_error() {
        let err = VibranceError::ClientInit("bad config".to_string());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
    }
}
