use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Externally assigned record identifier.
///
/// REST backends are split between numeric and string ids, so both wire
/// shapes deserialize transparently. Ids are never generated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelId {
    Int(i64),
    Str(String),
}

impl ModelId {
    /// Pull an identifier out of a raw payload value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(ModelId::Int),
            Value::String(s) => Some(ModelId::Str(s.clone())),
            _ => None,
        }
    }

    /// Extract the `id` attribute of a raw object payload, if present.
    pub fn of_attributes(attrs: &Value) -> Option<Self> {
        attrs.get("id").and_then(Self::from_value)
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ModelId::Int(n) => Display::fmt(n, f),
            ModelId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ModelId {
    fn from(id: i64) -> Self {
        ModelId::Int(id)
    }
}

impl From<i32> for ModelId {
    fn from(id: i32) -> Self {
        ModelId::Int(id.into())
    }
}

impl From<u32> for ModelId {
    fn from(id: u32) -> Self {
        ModelId::Int(id.into())
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        ModelId::Str(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        ModelId::Str(id)
    }
}
