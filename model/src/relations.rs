//! Relation field wrappers for nested payloads.
//!
//! When a response arrives with included relations
//! (`GET users/1?include=medias`), the nested objects should land as typed
//! model instances, not raw JSON. Declaring a field as [`Related<T>`] or
//! [`RelatedList<T>`] routes the nested payload through `T`'s own serde
//! impl during hydration. Assignment is idempotent: setting an
//! already-typed value is a plain move.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// Single nested related entity (hasOne/belongsTo side).
///
/// Deserializes from either the related object or `null`; absent fields
/// default to empty via `#[serde(default)]` on the declaring struct.
///
/// # Example
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Media {
///     #[serde(default)]
///     thumbnail: Related<Thumbnail>,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Related<T>(Option<T>);

impl<T> Related<T> {
    pub fn new(value: T) -> Self {
        Self(Some(value))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn set(&mut self, value: impl Into<Related<T>>) {
        *self = value.into();
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.0.take()
    }

    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> From<T> for Related<T> {
    fn from(value: T) -> Self {
        Self(Some(value))
    }
}

impl<T> From<Option<T>> for Related<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> Deref for Related<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Option<T> {
        &self.0
    }
}

impl<T> DerefMut for Related<T> {
    fn deref_mut(&mut self) -> &mut Option<T> {
        &mut self.0
    }
}

/// Collection of nested related entities (hasMany/belongsToMany side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelatedList<T>(Vec<T>);

impl<T> RelatedList<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self(items)
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    pub fn set(&mut self, items: impl Into<RelatedList<T>>) {
        *self = items.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for RelatedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for RelatedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> Deref for RelatedList<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T> DerefMut for RelatedList<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> IntoIterator for RelatedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> std::vec::IntoIter<T> {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RelatedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> std::slice::Iter<'a, T> {
        self.0.iter()
    }
}
