//! Resource path composition.

use std::fmt::Display;

/// Builds the relative resource path of a request: slash-joined segments
/// plus an optional query string. The client prepends the base URL at
/// dispatch time.
#[derive(Debug)]
pub struct UrlBuilder {
    parts: Vec<String>,
    query: String,
}

impl UrlBuilder {
    pub fn new(base: &str) -> Self {
        Self {
            parts: vec![base.trim_matches('/').to_string()],
            query: String::new(),
        }
    }

    /// Append a path segment (an id, a relation key, a resource name).
    pub fn push(mut self, segment: impl Display) -> Self {
        let segment = segment.to_string();
        let trimmed = segment.trim_matches('/');
        if !trimmed.is_empty() {
            self.parts.push(trimmed.to_string());
        }
        self
    }

    /// Attach an already-serialized query string. Empty strings are
    /// harmless.
    pub fn query(mut self, query_string: String) -> Self {
        self.query = query_string;
        self
    }

    pub fn build(self) -> String {
        let path = self.parts.join("/");
        if self.query.is_empty() {
            path
        } else {
            format!("{}?{}", path, self.query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_segments_with_single_slashes() {
        let url = UrlBuilder::new("users/").push(1).push("/medias").build();
        assert_eq!(url, "users/1/medias");
    }

    #[test]
    fn appends_query_string_when_present() {
        let url = UrlBuilder::new("users").query("a=1&b=2".to_string()).build();
        assert_eq!(url, "users?a=1&b=2");
    }

    #[test]
    fn empty_query_leaves_bare_path() {
        let url = UrlBuilder::new("users").query(String::new()).build();
        assert_eq!(url, "users");
    }
}
