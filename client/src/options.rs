//! Transport configuration: options, interceptors and the pluggable
//! request handler.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::err::RestResult;

pub use reqwest::Method;

/// Header map carried by options and requests.
pub type Headers = HashMap<String, String>;

/// Fully composed request descriptor handed to the request interceptor
/// and the dispatch path. Interceptors may replace any field.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    pub body: Option<Value>,
}

/// Per-call request options, merged over the client defaults
/// (per-call values win).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Headers,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Observes or rewrites the outgoing request descriptor.
pub type RequestInterceptor = Arc<dyn Fn(HttpRequest) -> HttpRequest + Send + Sync>;

/// Transforms the resolved response payload before it is cached/returned.
pub type ResponseInterceptor = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Observes failures before they propagate. Cannot suppress propagation.
pub type ErrorInterceptor = Arc<dyn Fn(&crate::err::Error) + Send + Sync>;

/// Pluggable transport backend.
///
/// When configured, the client delegates dispatch to this handler instead
/// of performing a network call. Primary seam for tests and non-HTTP
/// backends.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, request: HttpRequest) -> RestResult<Value>;
}

/// Response cache settings. Disabled by default with a 5 minute TTL.
#[derive(Debug, Clone, Copy)]
pub struct CacheOptions {
    pub enabled: bool,
    pub ttl: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Client-wide configuration.
///
/// Constructed fluently and handed to [`crate::HttpClient::new`] for an
/// isolated instance, or [`crate::HttpClient::configure`] for the
/// process-wide default (last write wins when configured repeatedly).
#[derive(Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub headers: Headers,
    pub request_interceptor: Option<RequestInterceptor>,
    pub response_interceptor: Option<ResponseInterceptor>,
    pub error_interceptor: Option<ErrorInterceptor>,
    pub request_handler: Option<Arc<dyn RequestHandler>>,
    pub cache: CacheOptions,
}

impl Default for ClientOptions {
    fn default() -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            base_url: String::new(),
            headers,
            request_interceptor: None,
            response_interceptor: None,
            error_interceptor: None,
            request_handler: None,
            cache: CacheOptions::default(),
        }
    }
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().base_url(base_url)
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn request_interceptor(
        mut self,
        interceptor: impl Fn(HttpRequest) -> HttpRequest + Send + Sync + 'static,
    ) -> Self {
        self.request_interceptor = Some(Arc::new(interceptor));
        self
    }

    pub fn response_interceptor(
        mut self,
        interceptor: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.response_interceptor = Some(Arc::new(interceptor));
        self
    }

    pub fn error_interceptor(
        mut self,
        interceptor: impl Fn(&crate::err::Error) + Send + Sync + 'static,
    ) -> Self {
        self.error_interceptor = Some(Arc::new(interceptor));
        self
    }

    pub fn request_handler(mut self, handler: Arc<dyn RequestHandler>) -> Self {
        self.request_handler = Some(handler);
        self
    }

    pub fn cache(mut self, cache: CacheOptions) -> Self {
        self.cache = cache;
        self
    }
}

impl Debug for ClientOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("request_interceptor", &self.request_interceptor.is_some())
            .field("response_interceptor", &self.response_interceptor.is_some())
            .field("error_interceptor", &self.error_interceptor.is_some())
            .field("request_handler", &self.request_handler.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}
