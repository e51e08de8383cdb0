use thiserror::Error;

/// Errors raised while moving a model between its typed form and a raw
/// attribute bag.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to decode attributes into model: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode model into attributes: {0}")]
    Encode(#[source] serde_json::Error),
}
