use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A required setting is missing. Raised once at startup.
    #[error("{0}")]
    Configuration(String),

    /// The gateway could not be reached, rejected the credential, or failed
    /// on its side.
    #[error("Gateway request failed: {0}")]
    Gateway(String),

    /// The gateway answered, but not with the shape that was asked for.
    #[error("Malformed response from gateway: {0}")]
    MalformedResponse(String),
}

impl From<anyhow::Error> for AnalysisError {
    fn from(err: anyhow::Error) -> AnalysisError {
        return AnalysisError::Gateway(format!("{err:#}"));
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> AnalysisError {
        return AnalysisError::MalformedResponse(err.to_string());
    }
}
