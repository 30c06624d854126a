//! Namespace scope carried through conversion.
//!
//! A scope is an explicit value: each element derives its own scope from its
//! parent's, so the reader and writer never consult shared state.

use crate::node::XML_NAMESPACE;

#[derive(Debug, Clone, Default)]
pub(crate) struct NamespaceScope {
    default: Option<String>,
    /// Prefix bindings; later entries shadow earlier ones.
    prefixes: Vec<(String, String)>,
}

impl NamespaceScope {
    /// The inherited default namespace.
    pub(crate) fn default_namespace(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Replace the default namespace. An empty URI undeclares it.
    pub(crate) fn set_default(&mut self, uri: Option<&str>) {
        self.default = uri.filter(|u| !u.is_empty()).map(str::to_owned);
    }

    /// Bind `prefix` to `uri`.
    pub(crate) fn bind(&mut self, prefix: &str, uri: &str) {
        self.prefixes.push((prefix.to_owned(), uri.to_owned()));
    }

    /// URI bound to `prefix`.
    pub(crate) fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.prefixes
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// A prefix currently bound to `uri`, skipping shadowed bindings.
    pub(crate) fn prefix_for(&self, uri: &str) -> Option<&str> {
        if uri == XML_NAMESPACE {
            return Some("xml");
        }
        self.prefixes
            .iter()
            .rev()
            .filter(|(_, u)| u == uri)
            .map(|(p, _)| p.as_str())
            .find(|p| self.resolve(p) == Some(uri))
    }

    /// The first `nsN` prefix not bound in this scope.
    pub(crate) fn fresh_prefix(&self) -> String {
        (0..)
            .map(|n| format!("ns{n}"))
            .find(|p| self.resolve(p).is_none())
            .unwrap_or_default()
    }
}
