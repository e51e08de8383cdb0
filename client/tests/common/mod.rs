//! Shared test fixtures: a scripted mock transport and a small model zoo.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use restorm_client::{
    CacheOptions, ClientOptions, Error, HttpClient, HttpRequest, Model, ModelId, RequestHandler,
    RestResult, Scope, ScopeTable,
};

/// Records every request and replies with scripted payloads in order.
/// Replies `null` once the script runs dry.
pub struct MockHandler {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Value>>,
}

impl MockHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    pub fn queue(&self, payload: Value) {
        self.responses.lock().unwrap().push_back(payload);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RequestHandler for MockHandler {
    async fn handle(&self, request: HttpRequest) -> RestResult<Value> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Value::Null))
    }
}

/// Counts invocations and fails every request with a 500.
pub struct FailingHandler {
    pub calls: AtomicUsize,
}

impl FailingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestHandler for FailingHandler {
    async fn handle(&self, request: HttpRequest) -> RestResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Status {
            url: request.url,
            status: 500,
            body: "boom".to_string(),
        })
    }
}

pub const BASE: &str = "http://api.test";

pub fn client_with(handler: Arc<dyn RequestHandler>) -> Arc<HttpClient> {
    let options = ClientOptions::new(BASE).request_handler(handler);
    Arc::new(HttpClient::new(options).unwrap())
}

pub fn cached_client_with(handler: Arc<dyn RequestHandler>, ttl: Duration) -> Arc<HttpClient> {
    let options = ClientOptions::new(BASE)
        .request_handler(handler)
        .cache(CacheOptions { enabled: true, ttl });
    Arc::new(HttpClient::new(options).unwrap())
}

// ---------------------------------------------------------------------------
// Example models
// ---------------------------------------------------------------------------

fn active() -> Value {
    json!({ "status": "active" })
}

static USER_SCOPES: ScopeTable = &[("active", Scope::Filter(active))];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub medias: restorm_client::RelatedList<Media>,
}

impl Model for User {
    fn resource() -> &'static str {
        "users"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }

    fn scopes() -> ScopeTable {
        USER_SCOPES
    }
}

fn of_kind(args: &[Value]) -> Value {
    json!({ "kind": args.first().cloned().unwrap_or(Value::Null) })
}

static MEDIA_SCOPES: ScopeTable = &[("of_kind", Scope::With(of_kind))];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
}

impl Model for Media {
    fn resource() -> &'static str {
        "medias"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }

    fn scopes() -> ScopeTable {
        MEDIA_SCOPES
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub size: String,
}

impl Model for Thumbnail {
    fn resource() -> &'static str {
        "thumbnails"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub title: String,
}

impl Model for Post {
    fn resource() -> &'static str {
        "posts"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Model for Comment {
    fn resource() -> &'static str {
        "comments"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default)]
    pub bio: String,
}

impl Model for Profile {
    fn resource() -> &'static str {
        "profiles"
    }

    fn id(&self) -> Option<ModelId> {
        self.id.clone()
    }

    fn set_id(&mut self, id: ModelId) {
        self.id = Some(id);
    }
}
