//! Relation and query builders.
//!
//! A [`Relation`] accumulates query state against a resource path and
//! finalizes the URL only when a terminal operation runs. Cardinality is
//! a type-level marker: [`HasManyRelation`] exposes list-shaped terminal
//! operations, [`HasOneRelation`] the single-entity resolve-then-mutate
//! ones. `belongsTo`/`belongsToMany` are aliases; the mechanics are
//! identical, only the exposed cardinality differs.
//!
//! Builders are moved by terminal operations, so one builder can never
//! leak filters into a subsequent chain; each chain starts fresh from the
//! model entry points or an [`Anchor`].

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use restorm_model::{lookup_scope, Model, ModelId};

use crate::client::HttpClient;
use crate::err::{Error, RestResult};
use crate::options::{Method, RequestOptions};
use crate::query::{Direction, UrlQueryBuilder};
use crate::url_builder::UrlBuilder;

mod anchor;
mod has_many;
mod has_one;

pub use anchor::Anchor;

/// List cardinality marker (`hasMany` / `belongsToMany`).
#[derive(Debug)]
pub enum Many {}

/// Single-entity cardinality marker (`hasOne` / `belongsTo`).
#[derive(Debug)]
pub enum One {}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Many {}
    impl Sealed for super::One {}
}

/// Type-level relation cardinality.
pub trait Cardinality: sealed::Sealed {}

impl Cardinality for Many {}
impl Cardinality for One {}

/// Chainable query builder scoped to a resource path.
#[derive(Debug)]
pub struct Relation<M: Model, C: Cardinality> {
    client: Arc<HttpClient>,
    path: String,
    query: UrlQueryBuilder,
    _model: PhantomData<fn() -> M>,
    _cardinality: PhantomData<fn() -> C>,
}

/// Builder over a REST collection.
pub type HasManyRelation<M> = Relation<M, Many>;

/// Builder over a single related entity.
pub type HasOneRelation<M> = Relation<M, One>;

/// Alias of [`HasOneRelation`]; the inverse direction shares its mechanics.
pub type BelongsToRelation<M> = Relation<M, One>;

/// Alias of [`HasManyRelation`].
pub type BelongsToManyRelation<M> = Relation<M, Many>;

impl<M: Model, C: Cardinality> Relation<M, C> {
    /// Builder rooted at the model's own resource (`users`).
    pub fn root(client: Arc<HttpClient>) -> Self {
        Self::at(client, M::resource().to_string())
    }

    /// Builder at an explicit, already-nested path
    /// (`users/1/medias`). Used by [`Anchor`] for relation traversal.
    pub(crate) fn at(client: Arc<HttpClient>, path: String) -> Self {
        Self {
            client,
            path,
            query: UrlQueryBuilder::new(),
            _model: PhantomData,
            _cardinality: PhantomData,
        }
    }

    /// The resource path this builder targets, without query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Alias of [`filter`](Self::filter).
    pub fn where_(self, filters: Value) -> Self {
        self.filter(filters)
    }

    /// Merge a filter object into the query state (last write wins per key).
    pub fn filter(mut self, filters: Value) -> Self {
        self.query = self.query.filter(filters);
        self
    }

    /// Request one included relation in the response payload.
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.query = self.query.include(relation);
        self
    }

    /// Request several included relations.
    pub fn includes<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query = self.query.includes(relations);
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.query = self.query.order_by(field, direction);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.query = self.query.limit(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.query = self.query.offset(n);
        self
    }

    pub fn page(mut self, n: u64) -> Self {
        self.query = self.query.page(n);
        self
    }

    pub fn per_page(mut self, n: u64) -> Self {
        self.query = self.query.per_page(n);
        self
    }

    /// Apply a named scope from the model's scope table.
    pub fn scope(self, name: &str) -> RestResult<Self> {
        self.scope_with(name, &[])
    }

    /// Apply a parameterized scope from the model's scope table.
    ///
    /// Scopes compose with `where_`/`filter` in any order; the produced
    /// filter object merges into the shared query state.
    pub fn scope_with(mut self, name: &str, args: &[Value]) -> RestResult<Self> {
        let scope = lookup_scope(M::scopes(), name).ok_or_else(|| Error::UnknownScope {
            resource: M::resource(),
            name: name.to_string(),
        })?;
        self.query = self.query.filter(scope.apply(args));
        Ok(self)
    }

    /// Look up with `where_filters` merged in; return the first match, or
    /// POST `create_data` (defaulting to the filters) when nothing
    /// matches.
    ///
    /// The lookup round-trip keeps the operation idempotent without
    /// relying on server-side upsert support. Cardinality only changes
    /// the shape of the lookup payload, and both shapes resolve to the
    /// same first-match rule.
    pub async fn first_or_create(
        mut self,
        where_filters: Value,
        create_data: Option<Value>,
    ) -> RestResult<M> {
        self.query = self.query.filter(where_filters.clone());
        let url = self.url();
        let payload = self.get(&url).await?;
        if let Some(existing) = first_record(payload) {
            return wrap(existing);
        }
        let body = create_data.unwrap_or(where_filters);
        let created = self.write(Method::POST, &self.path, body).await?;
        wrap(created)
    }

    /// Same lookup as [`first_or_create`](Self::first_or_create); PATCH
    /// the match with `update_data`, or POST the merged
    /// `where_filters` + `update_data` when nothing matches.
    pub async fn update_or_create(
        mut self,
        where_filters: Value,
        update_data: Value,
    ) -> RestResult<M> {
        self.query = self.query.filter(where_filters.clone());
        let url = self.url();
        let payload = self.get(&url).await?;
        if let Some(existing) = first_record(payload) {
            let id = record_id(&existing)?;
            let url = format!("{}/{}", self.path, id);
            let updated = self.write(Method::PATCH, &url, update_data).await?;
            return wrap(updated);
        }
        let body = merge_objects(where_filters, update_data);
        let created = self.write(Method::POST, &self.path, body).await?;
        wrap(created)
    }

    /// Finalize the URL for the accumulated query state.
    fn url(&self) -> String {
        UrlBuilder::new(&self.path)
            .query(self.query.to_query_string())
            .build()
    }

    /// Finalize the URL for a single record under this path.
    fn url_for(&self, id: &ModelId) -> String {
        UrlBuilder::new(&self.path)
            .push(id)
            .query(self.query.to_query_string())
            .build()
    }

    async fn get(&self, url: &str) -> RestResult<Value> {
        self.client.call(url, RequestOptions::default()).await
    }

    async fn write(&self, method: Method, url: &str, body: Value) -> RestResult<Value> {
        self.client
            .call(url, RequestOptions::default().method(method).body(body))
            .await
    }

    async fn delete_at(&self, url: &str) -> RestResult<()> {
        self.client
            .call(url, RequestOptions::default().method(Method::DELETE))
            .await?;
        Ok(())
    }
}

/// Rehydrate a raw payload into a typed model instance.
fn wrap<M: Model>(payload: Value) -> RestResult<M> {
    Ok(M::from_attributes(payload)?)
}

/// Rehydrate a list payload. `null` reads as an empty list.
fn wrap_list<M: Model>(path: &str, payload: Value) -> RestResult<Vec<M>> {
    match payload {
        Value::Array(items) => items.into_iter().map(wrap).collect(),
        Value::Null => Ok(Vec::new()),
        _ => Err(Error::UnexpectedPayload {
            path: path.to_string(),
            expected: "a JSON array",
        }),
    }
}

/// First record out of a lookup payload: the head of an array, or the
/// object itself when the backend answered with a single record.
fn first_record(payload: Value) -> Option<Value> {
    match payload {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(_) => Some(payload),
        _ => None,
    }
}

/// Identifier of a raw record payload.
fn record_id(record: &Value) -> RestResult<ModelId> {
    ModelId::of_attributes(record).ok_or(Error::MissingId("resolved related entity"))
}

/// Shallow-merge two filter/payload objects; `overlay` wins per key.
fn merge_objects(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}
