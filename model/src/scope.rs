use serde_json::Value;

/// A named, reusable filter preset declared on a model.
///
/// Scopes are a static capability table rather than runtime-attached
/// methods: the relation builder looks a scope up by name and merges the
/// filter object it produces into the accumulated query state.
#[derive(Debug, Clone, Copy)]
pub enum Scope {
    /// A fixed filter object.
    Filter(fn() -> Value),
    /// A filter object parameterized by caller-supplied arguments.
    With(fn(&[Value]) -> Value),
}

impl Scope {
    /// Produce the filter object for this scope.
    ///
    /// `args` are ignored by [`Scope::Filter`] presets.
    pub fn apply(&self, args: &[Value]) -> Value {
        match self {
            Scope::Filter(preset) => preset(),
            Scope::With(build) => build(args),
        }
    }
}

/// Scope table of a model: name to preset, in declaration order.
pub type ScopeTable = &'static [(&'static str, Scope)];

/// Find a scope by name in a model's table.
pub fn lookup_scope(table: ScopeTable, name: &str) -> Option<&'static Scope> {
    table
        .iter()
        .find(|(scope_name, _)| *scope_name == name)
        .map(|(_, scope)| scope)
}
