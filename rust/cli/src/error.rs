//! Error types for the CLI application.

use std::fmt;

use cardroom_engine::errors::ConfigError;

/// Everything that can go wrong before or during a table session,
/// propagated with `?` up to the exit-code boundary in `main`.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (deck file reads, stdin)
    Io(std::io::Error),

    /// Bad deck file or unusable game options
    Config(ConfigError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error)
    }
}
