//! Parent-scoped path handles.

use std::marker::PhantomData;
use std::sync::Arc;

use restorm_model::{Model, ModelId};

use crate::client::HttpClient;
use crate::err::RestResult;
use crate::options::RequestOptions;

use super::{wrap, HasManyRelation, HasOneRelation, Relation};

/// Handle on a single identified record, e.g. `users/1`.
///
/// Anchors are where relation chains nest: each `has_many`/`has_one`
/// call appends a relation key to the anchored path, and a further
/// [`HasManyRelation::id`](super::Relation::id) re-anchors one level
/// deeper (`users/1/medias/2/thumbnails`). An anchor can only be built
/// from a known identifier, so a parent-scoped path is never
/// constructible without one.
#[derive(Debug)]
pub struct Anchor<M: Model> {
    client: Arc<HttpClient>,
    path: String,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Anchor<M> {
    /// Anchor at the model's own collection: `users/{id}`.
    pub fn new(client: Arc<HttpClient>, id: &ModelId) -> Self {
        Self::under(client, M::resource(), id)
    }

    /// Anchor below an already-nested collection path.
    pub(crate) fn under(client: Arc<HttpClient>, collection: &str, id: &ModelId) -> Self {
        Self {
            client,
            path: format!("{}/{}", collection, id),
            _model: PhantomData,
        }
    }

    /// The anchored record path, e.g. `users/1`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// GET the anchored record itself.
    pub async fn get(self) -> RestResult<M> {
        let payload = self
            .client
            .call(&self.path, RequestOptions::default())
            .await?;
        wrap(payload)
    }

    /// hasMany relation under this record, keyed by the relation name:
    /// `users/1` + `medias` → `users/1/medias`.
    pub fn has_many<R: Model>(&self, key: &str) -> HasManyRelation<R> {
        Relation::at(Arc::clone(&self.client), format!("{}/{}", self.path, key))
    }

    /// hasOne relation under this record.
    pub fn has_one<R: Model>(&self, key: &str) -> HasOneRelation<R> {
        Relation::at(Arc::clone(&self.client), format!("{}/{}", self.path, key))
    }

    /// hasMany relation with an explicit resource-name override instead
    /// of a relation key.
    pub fn has_many_as<R: Model>(&self, resource: &str) -> HasManyRelation<R> {
        self.has_many(resource)
    }

    /// belongsTo is mechanically a hasOne.
    pub fn belongs_to<R: Model>(&self, key: &str) -> HasOneRelation<R> {
        self.has_one(key)
    }

    /// belongsToMany is mechanically a hasMany.
    pub fn belongs_to_many<R: Model>(&self, key: &str) -> HasManyRelation<R> {
        self.has_many(key)
    }
}
