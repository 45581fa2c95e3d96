//! Configuration resolution from CLI args and the environment

use crate::cli::{Args, Command, OutputFormat};
use crate::error::CliError;
use std::io::{BufRead, Write};
use std::time::Duration;
use vibrance_http_client::{Credentials, VibranceClient};
use zeroize::Zeroizing;

/// Environment variable the password is read from
pub const PASSWORD_ENV: &str = "VIBRANCE_PASSWORD";

/// Resolved runtime configuration
pub struct Config {
    /// What to fetch
    pub command: Command,
    /// Login credentials (password zeroized on drop)
    pub credentials: Credentials,
    /// Base URL override
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Output format
    pub format: OutputFormat,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, prompting for any missing credential
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let username = match args.username.clone() {
            Some(username) => username,
            None => prompt_username()?,
        };
        let password = match std::env::var(PASSWORD_ENV) {
            Ok(password) => Zeroizing::new(password),
            Err(_) => prompt_password()?,
        };

        Self::resolve(args, username, password)
    }

    /// Validate credentials and assemble the config
    fn resolve(
        args: Args,
        username: String,
        password: Zeroizing<String>,
    ) -> Result<Self, CliError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CliError::MissingParameter("username"));
        }
        if password.is_empty() {
            return Err(CliError::MissingParameter("password"));
        }

        Ok(Config {
            command: args.command,
            credentials: Credentials::new(username, password.as_str()),
            base_url: args.base_url,
            timeout: args.timeout,
            format: args.format,
            quiet: args.quiet,
        })
    }

    /// Build a client for the configured site
    pub fn client(&self) -> Result<VibranceClient, CliError> {
        let mut builder = VibranceClient::builder()
            .timeout(self.timeout)
            .user_agent(concat!("vibrance-cli/", env!("CARGO_PKG_VERSION")));

        if let Some(base_url) = &self.base_url {
            builder = builder
                .base_url(base_url.as_str())
                .map_err(|e| CliError::Config(e.to_string()))?;
        }

        Ok(builder.build()?)
    }
}

/// Prompt user for their login name on stderr, keeping stdout for records
fn prompt_username() -> Result<String, CliError> {
    read_username(std::io::stdin().lock(), std::io::stderr())
}

fn read_username(mut input: impl BufRead, mut prompt: impl Write) -> Result<String, CliError> {
    write!(prompt, "Username: ").and_then(|_| prompt.flush()).ok();

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| CliError::Config(format!("Failed to read username: {}", e)))?;
    Ok(line.trim().to_string())
}

/// Prompt user for their password without echoing it
fn prompt_password() -> Result<Zeroizing<String>, CliError> {
    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| CliError::Config(format!("Failed to read password: {}", e)))?;
    Ok(Zeroizing::new(password))
}
