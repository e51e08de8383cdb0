//! Terminal operations of list-shaped relations.

use serde_json::Value;

use restorm_model::{Model, ModelId};

use crate::err::RestResult;
use crate::options::Method;

use super::{first_record, wrap, wrap_list, Anchor, Many, Relation};

impl<M: Model> Relation<M, Many> {
    /// Handle on a single record under this path: `users/1/medias` + id 2
    /// anchors at `users/1/medias/2`, from where deeper relations chain.
    pub fn id(self, id: impl Into<ModelId>) -> Anchor<M> {
        Anchor::under(self.client, &self.path, &id.into())
    }

    /// GET the composed URL and map every element into a model instance.
    pub async fn all(self) -> RestResult<Vec<M>> {
        let url = self.url();
        let payload = self.get(&url).await?;
        wrap_list(&url, payload)
    }

    /// GET with `limit=1`; the first element wrapped, or `None` when the
    /// result is empty.
    pub async fn first(mut self) -> RestResult<Option<M>> {
        self.query = self.query.limit(1);
        let url = self.url();
        let payload = self.get(&url).await?;
        match first_record(payload) {
            Some(record) => Ok(Some(wrap(record)?)),
            None => Ok(None),
        }
    }

    /// GET a single record by id, honoring accumulated query state
    /// (e.g. includes).
    pub async fn find(self, id: impl Into<ModelId>) -> RestResult<M> {
        let url = self.url_for(&id.into());
        let payload = self.get(&url).await?;
        wrap(payload)
    }

    /// POST a payload to the collection and wrap the created record.
    pub async fn create(self, payload: Value) -> RestResult<M> {
        let created = self.write(Method::POST, &self.path, payload).await?;
        wrap(created)
    }

    /// PATCH a record by id and wrap the updated representation.
    pub async fn update(self, id: impl Into<ModelId>, payload: Value) -> RestResult<M> {
        let id: ModelId = id.into();
        let url = format!("{}/{}", self.path, id);
        let updated = self.write(Method::PATCH, &url, payload).await?;
        wrap(updated)
    }

    /// DELETE a record by id.
    pub async fn delete(self, id: impl Into<ModelId>) -> RestResult<()> {
        let id: ModelId = id.into();
        let url = format!("{}/{}", self.path, id);
        self.delete_at(&url).await
    }

    /// Offset/limit pagination plus `page`/`per_page` markers, then the
    /// list GET. Pages are 1-based.
    pub async fn paginate(mut self, page: u64, per_page: u64) -> RestResult<Vec<M>> {
        self.query = self
            .query
            .offset(page.saturating_sub(1).saturating_mul(per_page))
            .limit(per_page)
            .page(page)
            .per_page(per_page);
        self.all().await
    }
}
