//! Convenience entry points layered over the relation builders.
//!
//! [`ModelOps`] gives every [`Model`] the ActiveRecord-style static
//! surface (`User::all`, `User::where_`, `User::find`, …); instance
//! mutation uses the classic `save` / `update_attributes` / `destroy`
//! vocabulary, resolving identity and resource path from the instance
//! itself. Builders are cheap monomorphized values, so entry points
//! construct one per chain rather than caching per model type.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use restorm_model::{Model, ModelId};

use crate::client::HttpClient;
use crate::err::{Error, RestResult};
use crate::options::{Method, RequestOptions};
use crate::query::Direction;
use crate::relation::{Anchor, HasManyRelation, Relation};

#[async_trait]
pub trait ModelOps: Model {
    /// Fresh query builder over this model's collection.
    fn query(client: &Arc<HttpClient>) -> HasManyRelation<Self> {
        Relation::root(Arc::clone(client))
    }

    /// Anchor at `{resource}/{id}` for relation traversal.
    fn entry(client: &Arc<HttpClient>, id: impl Into<ModelId>) -> Anchor<Self> {
        Anchor::new(Arc::clone(client), &id.into())
    }

    /// Anchor at this instance's record; fails fast when the instance has
    /// no identifier yet.
    fn anchor(&self, client: &Arc<HttpClient>) -> RestResult<Anchor<Self>> {
        let id = self.id().ok_or(Error::MissingParentId {
            resource: Self::resource(),
        })?;
        Ok(Anchor::new(Arc::clone(client), &id))
    }

    fn where_(client: &Arc<HttpClient>, filters: Value) -> HasManyRelation<Self> {
        Self::query(client).where_(filters)
    }

    fn filter(client: &Arc<HttpClient>, filters: Value) -> HasManyRelation<Self> {
        Self::query(client).filter(filters)
    }

    fn include(client: &Arc<HttpClient>, relation: &str) -> HasManyRelation<Self> {
        Self::query(client).include(relation)
    }

    fn order_by(client: &Arc<HttpClient>, field: &str, direction: Direction) -> HasManyRelation<Self> {
        Self::query(client).order_by(field, direction)
    }

    async fn all(client: &Arc<HttpClient>) -> RestResult<Vec<Self>> {
        Self::query(client).all().await
    }

    async fn find(client: &Arc<HttpClient>, id: impl Into<ModelId> + Send) -> RestResult<Self> {
        Self::query(client).find(id).await
    }

    async fn create(client: &Arc<HttpClient>, data: Value) -> RestResult<Self> {
        Self::query(client).create(data).await
    }

    async fn update(
        client: &Arc<HttpClient>,
        id: impl Into<ModelId> + Send,
        data: Value,
    ) -> RestResult<Self> {
        Self::query(client).update(id, data).await
    }

    async fn delete(client: &Arc<HttpClient>, id: impl Into<ModelId> + Send) -> RestResult<()> {
        Self::query(client).delete(id).await
    }

    async fn first_or_create(
        client: &Arc<HttpClient>,
        where_filters: Value,
        create_data: Option<Value>,
    ) -> RestResult<Self> {
        Self::query(client)
            .first_or_create(where_filters, create_data)
            .await
    }

    async fn update_or_create(
        client: &Arc<HttpClient>,
        where_filters: Value,
        update_data: Value,
    ) -> RestResult<Self> {
        Self::query(client)
            .update_or_create(where_filters, update_data)
            .await
    }

    /// Persist this instance: POST to the collection when it has no id
    /// yet, PATCH its record otherwise. The server's representation is
    /// merged back in either way (ids included).
    async fn save(&mut self, client: &Arc<HttpClient>) -> RestResult<()> {
        let body = self.attributes().map_err(Error::Model)?;
        let payload = match self.id() {
            Some(id) => {
                let path = format!("{}/{}", Self::resource(), id);
                client
                    .call(&path, RequestOptions::default().method(Method::PATCH).body(body))
                    .await?
            }
            None => {
                client
                    .call(
                        Self::resource(),
                        RequestOptions::default().method(Method::POST).body(body),
                    )
                    .await?
            }
        };
        if payload.is_object() {
            self.merge_attributes(&payload).map_err(Error::Model)?;
        }
        Ok(())
    }

    /// Overlay the given attributes, PATCH the record, and merge the
    /// server's response back. Requires an identifier.
    async fn update_attributes(&mut self, client: &Arc<HttpClient>, data: Value) -> RestResult<()> {
        let id = self.id().ok_or(Error::MissingId("update"))?;
        self.merge_attributes(&data).map_err(Error::Model)?;
        let body = self.attributes().map_err(Error::Model)?;
        let path = format!("{}/{}", Self::resource(), id);
        let payload = client
            .call(&path, RequestOptions::default().method(Method::PATCH).body(body))
            .await?;
        if payload.is_object() {
            self.merge_attributes(&payload).map_err(Error::Model)?;
        }
        Ok(())
    }

    /// DELETE this instance's record. Requires an identifier.
    async fn destroy(&self, client: &Arc<HttpClient>) -> RestResult<()> {
        let id = self.id().ok_or(Error::MissingId("delete"))?;
        let path = format!("{}/{}", Self::resource(), id);
        client
            .call(&path, RequestOptions::default().method(Method::DELETE))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<T: Model> ModelOps for T {}
