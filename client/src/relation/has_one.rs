//! Terminal operations of single-entity relations.
//!
//! A hasOne relation's identity is not known to the caller in advance, so
//! mutations resolve the current related entity with a GET first and then
//! address it by the discovered id.

use serde_json::Value;

use restorm_model::Model;

use crate::err::{Error, RestResult};
use crate::options::Method;

use super::{first_record, record_id, wrap, One, Relation};

impl<M: Model> Relation<M, One> {
    /// GET the relation URL and wrap the single related entity, or `None`
    /// when there is none.
    pub async fn first(self) -> RestResult<Option<M>> {
        let url = self.url();
        let payload = self.get(&url).await?;
        match first_record(payload) {
            Some(record) => Ok(Some(wrap(record)?)),
            None => Ok(None),
        }
    }

    /// POST a payload to the relation path and wrap the created entity.
    pub async fn create(self, payload: Value) -> RestResult<M> {
        let created = self.write(Method::POST, &self.path, payload).await?;
        wrap(created)
    }

    /// Resolve the current related entity, then PATCH it by its id.
    ///
    /// Exactly one GET followed by exactly one PATCH; the relation path
    /// itself is never patched directly.
    pub async fn update(self, payload: Value) -> RestResult<M> {
        let existing = self.resolve().await?;
        let url = format!("{}/{}", self.path, record_id(&existing)?);
        let updated = self.write(Method::PATCH, &url, payload).await?;
        wrap(updated)
    }

    /// Resolve the current related entity, then DELETE it by its id.
    pub async fn delete(self) -> RestResult<()> {
        let existing = self.resolve().await?;
        let url = format!("{}/{}", self.path, record_id(&existing)?);
        self.delete_at(&url).await
    }

    /// GET the relation URL and return the raw current entity.
    async fn resolve(&self) -> RestResult<Value> {
        let url = self.url();
        let payload = self.get(&url).await?;
        first_record(payload).ok_or_else(|| Error::NotFound(self.path.clone()))
    }
}
