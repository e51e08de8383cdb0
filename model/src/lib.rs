//! Model contract for the restorm data-access layer.
//!
//! A [`Model`] maps a Rust type onto a REST collection: it declares the
//! resource name, knows how to read and write its identifier, and optionally
//! carries a table of named filter presets ([`Scope`]s). Hydration from and
//! back to wire payloads always routes through serde, so field-level casting
//! (nested relations, value objects) is expressed with ordinary `Deserialize`
//! impls and the [`Related`]/[`RelatedList`] wrappers.
//!
//! The query/relation builders that consume this contract live in the
//! `restorm-client` crate.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

mod error;
mod id;
mod relations;
mod scope;

pub use error::ModelError;
pub use id::ModelId;
pub use relations::{Related, RelatedList};
pub use scope::{lookup_scope, Scope, ScopeTable};

/// Contract every REST-mapped type implements.
///
/// Identifiers are externally assigned; a freshly constructed instance has
/// none until the server hands one back.
///
/// # Example
/// ```
/// use restorm_model::{Model, ModelId, Scope, ScopeTable};
/// use serde::{Deserialize, Serialize};
/// use serde_json::{json, Value};
///
/// fn active() -> Value {
///     json!({ "status": "active" })
/// }
///
/// static USER_SCOPES: ScopeTable = &[("active", Scope::Filter(active))];
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct User {
///     #[serde(skip_serializing_if = "Option::is_none")]
///     id: Option<ModelId>,
///     #[serde(default)]
///     name: String,
/// }
///
/// impl Model for User {
///     fn resource() -> &'static str {
///         "users"
///     }
///
///     fn id(&self) -> Option<ModelId> {
///         self.id.clone()
///     }
///
///     fn set_id(&mut self, id: ModelId) {
///         self.id = Some(id);
///     }
///
///     fn scopes() -> ScopeTable {
///         USER_SCOPES
///     }
/// }
/// ```
pub trait Model: Serialize + DeserializeOwned + Debug + Send + Sync + Sized + 'static {
    /// REST collection this model maps to, e.g. `"users"`.
    fn resource() -> &'static str;

    /// Current identifier, if the instance has been persisted or loaded.
    fn id(&self) -> Option<ModelId>;

    /// Install an identifier, typically after the server assigned one.
    fn set_id(&mut self, id: ModelId);

    /// Named filter presets. Empty by default.
    fn scopes() -> ScopeTable {
        &[]
    }

    /// Rehydrate an instance from a raw response payload.
    ///
    /// Routed through serde so declared field casts apply; never a bare
    /// field copy.
    fn from_attributes(attrs: Value) -> Result<Self, ModelError> {
        serde_json::from_value(attrs).map_err(ModelError::Decode)
    }

    /// Serialize the instance into a plain attribute bag.
    fn attributes(&self) -> Result<Value, ModelError> {
        serde_json::to_value(self).map_err(ModelError::Encode)
    }

    /// Overlay the given attributes onto this instance, key by key.
    ///
    /// Used by `save`-style operations to merge the server's representation
    /// back in. Unknown keys on either side survive the merge.
    fn merge_attributes(&mut self, attrs: &Value) -> Result<(), ModelError> {
        let mut current = self.attributes()?;
        match (&mut current, attrs) {
            (Value::Object(cur), Value::Object(new)) => {
                for (key, value) in new {
                    cur.insert(key.clone(), value.clone());
                }
            }
            _ => return Ok(()),
        }
        *self = Self::from_attributes(current)?;
        Ok(())
    }
}
