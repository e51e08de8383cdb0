//! Query parameter accumulation and serialization.

use serde_json::Value;

/// Sort direction for [`UrlQueryBuilder::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Accumulates filters, includes, sort directives and pagination into a
/// canonical parameter list.
///
/// Purely accumulative: no method here can fail. Serialization is
/// deterministic for a given call sequence: filters keep insertion order
/// with last write winning per key, includes and sort tokens keep
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct UrlQueryBuilder {
    filters: Vec<(String, Value)>,
    includes: Vec<String>,
    sort: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    page: Option<u64>,
    per_page: Option<u64>,
}

impl UrlQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`filter`](Self::filter).
    pub fn where_(self, filters: Value) -> Self {
        self.filter(filters)
    }

    /// Merge the key-value pairs of a JSON object into the filters.
    /// Non-object values are ignored.
    pub fn filter(mut self, filters: Value) -> Self {
        if let Value::Object(map) = filters {
            for (key, value) in map {
                match self.filters.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => self.filters.push((key, value)),
                }
            }
        }
        self
    }

    /// Append one relation name to the includes.
    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.includes.push(relation.into());
        self
    }

    /// Append several relation names to the includes.
    pub fn includes<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(relations.into_iter().map(Into::into));
        self
    }

    /// Append a sort token; descending fields get a `-` prefix.
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        let token = match direction {
            Direction::Asc => field.to_string(),
            Direction::Desc => format!("-{field}"),
        };
        self.sort.push(token);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn page(mut self, n: u64) -> Self {
        self.page = Some(n);
        self
    }

    pub fn per_page(mut self, n: u64) -> Self {
        self.per_page = Some(n);
        self
    }

    /// Clear all accumulated state.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Flatten into ordered key-value pairs ready for query-string
    /// serialization: filters first, then `include`/`sort` comma-joined,
    /// then pagination fields (snake_case on the wire), each only if set.
    pub fn to_pairs(&self) -> Vec<(String, Value)> {
        let mut pairs = self.filters.clone();
        if !self.includes.is_empty() {
            pairs.push(("include".to_string(), Value::from(self.includes.join(","))));
        }
        if !self.sort.is_empty() {
            pairs.push(("sort".to_string(), Value::from(self.sort.join(","))));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), Value::from(limit)));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), Value::from(offset)));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), Value::from(page)));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), Value::from(per_page)));
        }
        pairs
    }

    /// Serialize to `key=value&...`. Empty when nothing accumulated.
    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, plain(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.to_pairs().is_empty()
    }
}

/// Render a JSON value the way it reads in a query string: strings
/// without quotes, everything else via its JSON form.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
