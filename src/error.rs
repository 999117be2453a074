use thiserror::Error;

/// Failures surfaced by a prediction call.
///
/// Unparseable model output is not represented here: it degrades to a
/// result with absent fields (see [`crate::parser::ParseStatus`]).
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("unknown country: {0:?} has no entry in the party catalog")]
    UnknownCountry(String),

    #[error("API key not found in environment variable: {0}")]
    MissingCredential(String),

    #[error("malformed response from remote model: {0}")]
    MalformedRemoteResponse(String),

    #[error("remote model returned {status}: {body}")]
    RemoteStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unknown LLM provider: {0}")]
    UnknownProvider(String),

    #[error("HTTP request to remote model failed: {0}")]
    Http(#[from] reqwest::Error),
}
