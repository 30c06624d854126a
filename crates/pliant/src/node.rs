//! The owned tree node.

use indexmap::IndexMap;

use crate::{Error, Result, Value};

/// A named element with ordered attributes, ordered children, optional text
/// and an optional namespace.
///
/// A node exclusively owns its attributes and children. Nodes are built
/// through the access methods in [`access`](crate::access) and read through
/// the accessors below or the indexer ([`Node::index`]).
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) attributes: IndexMap<String, Value>,
    pub(crate) children: Vec<Node>,
    pub(crate) text: Option<String>,
}

impl Node {
    /// Create a root node with no namespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self::unchecked(name))
    }

    /// Create a root node in the given namespace. An empty URI means no
    /// namespace, as `xmlns=""` does.
    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Result<Self> {
        let mut node = Self::new(name)?;
        node.set_namespace(Some(namespace.into()));
        Ok(node)
    }

    /// Create a node whose name has already been validated.
    pub(crate) fn unchecked(name: String) -> Self {
        Self {
            name,
            namespace: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Move the node into a namespace, or out of any with `None` or an empty
    /// URI.
    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.namespace = namespace.filter(|uri| !uri.is_empty());
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<Value>) {
        self.text = Some(text.into().into_string());
    }

    /// Attribute value as a string slice.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(Value::as_str)
    }

    /// Attribute value parsed into `T`. `None` when missing or unparsable.
    pub fn attr_as<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.attributes.get(key).and_then(|v| v.parse().ok())
    }

    /// Whether an attribute with this key exists.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// First child with the given name, without creating one.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable variant of [`Node::find`].
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Total number of elements in this subtree, including `self`.
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(Node::element_count).sum::<usize>()
    }

    /// Append a child and return a reference to it.
    pub(crate) fn push_child(&mut self, child: Node) -> &mut Node {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }
}

/// Structural equality: attributes and children are compared in order.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.namespace == other.namespace
            && self.text == other.text
            && self.attributes.len() == other.attributes.len()
            && self.attributes.iter().eq(other.attributes.iter())
            && self.children == other.children
    }
}

impl Eq for Node {}

/// The namespace bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric() || matches!(c, '-' | '.' | '\u{B7}')
}

fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if is_name_start(c)) && chars.all(is_name_char)
}

/// Check an element name. Names are local (no prefix); namespaces are carried
/// separately.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if is_ncname(name) {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_owned()))
    }
}

/// Check an attribute key: either a local name or `{uri}local`.
///
/// `xmlns` is rejected; namespace declarations are generated on output.
pub(crate) fn validate_attribute_key(key: &str) -> Result<()> {
    let valid = match split_clark(key) {
        Some((uri, local)) => !uri.is_empty() && is_ncname(local),
        None => is_ncname(key) && key != "xmlns",
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName(key.to_owned()))
    }
}

/// Split a `{uri}local` key into its parts.
pub(crate) fn split_clark(key: &str) -> Option<(&str, &str)> {
    key.strip_prefix('{')?.split_once('}')
}
