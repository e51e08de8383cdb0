//! Fluent REST data access: relation-aware query building over a
//! configurable HTTP transport.
//!
//! The crate is organized into focused modules:
//!
//! - `query`: filter/include/sort/pagination accumulation and
//!   query-string serialization
//! - `url_builder`: resource path composition
//! - `options`: transport configuration, interceptors and the pluggable
//!   request handler seam
//! - `cache`: TTL-bounded response cache
//! - `client`: the HTTP transport and its interceptor pipeline
//! - `relation`: chainable relation/query builders with typed terminal
//!   operations
//! - `ops`: ActiveRecord-style entry points for every [`Model`]
//!
//! # Example
//! ```ignore
//! let client = HttpClient::configure(ClientOptions::new("https://api.example.com"))?;
//!
//! let users = User::where_(&client, json!({ "name": "Cedric" }))
//!     .include("medias")
//!     .scope("active")?
//!     .all()
//!     .await?;
//!
//! let thumbnails = User::entry(&client, 1)
//!     .has_many::<Media>("medias")
//!     .id(2)
//!     .has_many::<Thumbnail>("thumbnails")
//!     .include("size")
//!     .all()
//!     .await?;
//! ```

pub mod cache;
pub mod client;
pub mod err;
pub mod ops;
pub mod options;
pub mod query;
pub mod relation;

mod url_builder;

pub use cache::CacheEntry;
pub use client::HttpClient;
pub use err::{Error, RestResult};
pub use ops::ModelOps;
pub use options::{
    CacheOptions, ClientOptions, ErrorInterceptor, Headers, HttpRequest, Method, RequestHandler,
    RequestInterceptor, RequestOptions, ResponseInterceptor,
};
pub use query::{Direction, UrlQueryBuilder};
pub use relation::{
    Anchor, BelongsToManyRelation, BelongsToRelation, HasManyRelation, HasOneRelation, Relation,
};

// The model contract lives in its own crate; re-export the common surface.
pub use restorm_model::{
    lookup_scope, Model, ModelError, ModelId, Related, RelatedList, Scope, ScopeTable,
};

pub mod prelude {
    pub use crate::{
        CacheOptions, ClientOptions, Direction, Error, HttpClient, Method, Model, ModelId,
        ModelOps, Related, RelatedList, RequestOptions, RestResult, Scope, ScopeTable,
    };
    pub use serde_json::json;
}
