//! Error types for the CLI

use thiserror::Error;
use vibrance_http_client::VibranceError;

/// Exit code for failures caused by the user's input
pub const EXIT_CLIENT_ERROR: i32 = 2;
/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// A required credential was not supplied
    #[error("Missing required parameter '{0}'.")]
    MissingParameter(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login or scraping failed
    #[error(transparent)]
    Vibrance(#[from] VibranceError),

    /// JSON rendering failed
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Whether the user can fix this by changing their input
    pub fn is_client_error(&self) -> bool {
        match self {
            CliError::MissingParameter(_) => true,
            CliError::Vibrance(e) => e.is_client_error(),
            _ => false,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_client_error() {
            EXIT_CLIENT_ERROR
        } else {
            EXIT_FAILURE
        }
    }

    /// Message to print for the user
    ///
    /// Upstream failures are reduced to a generic message unless `verbose`.
    pub fn user_message(&self, verbose: bool) -> String {
        match self {
            CliError::Vibrance(e) if !verbose => e.public_message(),
            _ => self.to_string(),
        }
    }
}
