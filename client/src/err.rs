use restorm_model::ModelError;
use thiserror::Error;

/// Error taxonomy of the transport and builder layer.
///
/// Configuration and identity errors surface before any network attempt;
/// transport errors reject the operation with no retry. Nothing here is
/// ever swallowed silently, and a failed call never populates the cache.
#[derive(Debug, Error)]
pub enum Error {
    /// No base URL configured at call time.
    #[error("no base URL configured; call `HttpClient::configure` or set `ClientOptions::base_url`")]
    MissingBaseUrl,

    /// The configured base URL does not parse.
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An operation that needs an identifier was attempted without one.
    #[error("{0} requires an id")]
    MissingId(&'static str),

    /// A parent-scoped relation was built from an instance with no id.
    #[error("relation access on `{resource}` requires a parent id")]
    MissingParentId { resource: &'static str },

    /// A scope name with no entry in the model's scope table.
    #[error("unknown scope `{name}` on resource `{resource}`")]
    UnknownScope {
        resource: &'static str,
        name: String,
    },

    /// Network-level failure from the underlying HTTP client.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("`{url}` returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("failed to decode response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Payload shape did not match what the operation expects.
    #[error("unexpected payload from `{path}`: expected {expected}")]
    UnexpectedPayload {
        path: String,
        expected: &'static str,
    },

    /// A resolve-then-mutate operation found no current related entity.
    #[error("no record found at `{0}`")]
    NotFound(String),

    /// Model (de)serialization failure.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result alias used across the crate.
pub type RestResult<T> = Result<T, Error>;
