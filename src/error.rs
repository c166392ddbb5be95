use thiserror::Error;

/// Errors raised while driving the browser or persisting results
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No WebDriver session could be created
    #[error("failed to connect to WebDriver at {url}: {reason}")]
    Connect { url: String, reason: String },

    /// A WebDriver command failed
    #[error("{context}: {source}")]
    Command {
        context: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    /// No element matched a lookup (possibly after waiting)
    #[error("no element found for {0}")]
    NotFound(String),

    /// Navigating a browsing context failed
    #[error("failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid operator input
    #[error("invalid input: {0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// Wraps a WebDriver command error with a short description of the command
    pub fn command(context: impl Into<String>, source: fantoccini::error::CmdError) -> Self {
        Self::Command {
            context: context.into(),
            source,
        }
    }
}

impl From<regex::Error> for ScrapeError {
    fn from(e: regex::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
