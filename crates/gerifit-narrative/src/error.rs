use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("API key not configured: set {0}")]
    MissingCredential(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ureq::Error> for NarrativeError {
    fn from(e: ureq::Error) -> Self {
        NarrativeError::Invocation(e.to_string())
    }
}
