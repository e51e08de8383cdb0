//! The HTTP transport: configuration, interceptor pipeline, caching and
//! dispatch.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::cache::{CacheEntry, ResponseCache};
use crate::err::{Error, RestResult};
use crate::options::{ClientOptions, HttpRequest, Method, RequestOptions};

/// Process-wide default client, installed by [`HttpClient::configure`].
static DEFAULT_CLIENT: Lazy<RwLock<Option<Arc<HttpClient>>>> = Lazy::new(|| RwLock::new(None));

/// HTTP transport for the relation builders.
///
/// Holds the client configuration (base URL, default headers,
/// interceptors, pluggable request handler) and a TTL-bounded response
/// cache. Construct isolated instances with [`HttpClient::new`]; tests
/// should prefer that over mutating the process default.
pub struct HttpClient {
    options: ClientOptions,
    base: Option<Url>,
    http: reqwest::Client,
    cache: ResponseCache,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Build a client from the given options.
    ///
    /// A non-empty base URL is validated here; an empty one is allowed and
    /// only rejected when a call is attempted.
    pub fn new(options: ClientOptions) -> RestResult<Self> {
        let base = match options.base_url.trim_end_matches('/') {
            "" => None,
            trimmed => Some(Url::parse(trimmed).map_err(|source| Error::InvalidBaseUrl {
                url: options.base_url.clone(),
                source,
            })?),
        };
        let cache = ResponseCache::new(options.cache.ttl);
        Ok(Self {
            base,
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            cache,
            options,
        })
    }

    /// Install (or replace, last write wins) the process-wide default
    /// client and return it.
    pub fn configure(options: ClientOptions) -> RestResult<Arc<Self>> {
        let client = Arc::new(Self::new(options)?);
        let mut slot = DEFAULT_CLIENT
            .write()
            .expect("default client lock poisoned");
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// The process-wide default client, if one was configured.
    pub fn global() -> RestResult<Arc<Self>> {
        DEFAULT_CLIENT
            .read()
            .expect("default client lock poisoned")
            .clone()
            .ok_or(Error::MissingBaseUrl)
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Execute a request against `path` (relative to the base URL,
    /// query string included).
    ///
    /// GET responses are served from and stored into the cache when
    /// caching is enabled; writes bypass the cache entirely. A configured
    /// error interceptor observes every failure before it propagates.
    pub async fn call(&self, path: &str, options: RequestOptions) -> RestResult<Value> {
        let result = self.dispatch(path, options).await;
        if let Err(error) = &result {
            if let Some(interceptor) = &self.options.error_interceptor {
                interceptor(error);
            }
        }
        result
    }

    async fn dispatch(&self, path: &str, options: RequestOptions) -> RestResult<Value> {
        let base = self.base.as_ref().ok_or(Error::MissingBaseUrl)?;
        let method = options.method.unwrap_or(Method::GET);
        let cacheable = self.options.cache.enabled && method == Method::GET;

        if cacheable {
            if let Some(hit) = self.cache.fetch(path) {
                return Ok(hit);
            }
        }

        // per-call headers win over the defaults
        let mut headers = self.options.headers.clone();
        headers.extend(options.headers);

        let mut request = HttpRequest {
            url: format!("{}/{}", base.as_str().trim_end_matches('/'), path),
            method,
            headers,
            body: options.body,
        };
        if let Some(interceptor) = &self.options.request_interceptor {
            request = interceptor(request);
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");

        let mut payload = match &self.options.request_handler {
            Some(handler) => handler.handle(request).await?,
            None => self.send(request).await?,
        };
        if let Some(interceptor) = &self.options.response_interceptor {
            payload = interceptor(payload);
        }

        if cacheable {
            trace!(path, "caching response payload");
            self.cache.store(path, payload.clone());
        }
        Ok(payload)
    }

    /// Real network dispatch through reqwest. Bodies are serialized as
    /// JSON when the content type says so; success bodies parse as JSON,
    /// with an empty body mapping to `null`.
    async fn send(&self, request: HttpRequest) -> RestResult<Value> {
        let mut builder = self.http.request(request.method, request.url.as_str());
        let json_body = request
            .headers
            .iter()
            .any(|(k, v)| k.eq_ignore_ascii_case("content-type") && v.starts_with("application/json"));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = if json_body {
                builder.json(body)
            } else {
                builder.body(body.to_string())
            };
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                url: request.url,
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Inspect a cache entry without touching its freshness.
    pub fn get_cache(&self, path: &str) -> Option<CacheEntry> {
        self.cache.get(path)
    }

    /// Drop a single cache entry (manual invalidation).
    pub fn delete_cache(&self, path: &str) {
        self.cache.remove(path);
    }

    /// Drop every cache entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
