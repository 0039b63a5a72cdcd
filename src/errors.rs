use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a pipeline run. All variants propagate to the
/// CLI boundary unrecovered; there is no retry or partial-result mode.
#[derive(Debug, Error)]
pub enum Error {
    /// No EDGAR registrant matched the query string.
    #[error("no EDGAR registrant matched \"{0}\"")]
    CompanyNotFound(String),

    /// The registrant exists but has no 8-K in its recent filing index.
    #[error("no recent 8-K filing found for {0}")]
    NoRecentFiling(String),

    /// Transport or HTTP failure talking to EDGAR or the model endpoint.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The model's completion failed JSON decoding or schema validation.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// Missing or unusable environment configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn upstream(err: impl std::fmt::Display) -> Self {
        Error::Upstream(err.to_string())
    }
}
