//! Error types for balance and price resolution

use thiserror::Error;

/// Failure of a single upstream provider call.
///
/// The balance resolver treats every variant the same way (move on to the
/// next provider); the kind only shows up in logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream reported an error: {0}")]
    UpstreamDomain(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Transport(_) => "transport",
            ProviderError::UpstreamDomain(_) => "upstream",
            ProviderError::MalformedResponse(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else if err.is_timeout() {
            ProviderError::Transport(format!("request timed out: {}", err))
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::MalformedResponse(err.to_string())
    }
}

/// Errors surfaced to callers of the resolvers and the aggregator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),
}
