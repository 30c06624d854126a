//! Dynamic member access.
//!
//! Every way of touching a node by an arbitrary name goes through one of
//! three access kinds:
//!
//! | Kind                  | Method                          | Effect                                   |
//! |-----------------------|---------------------------------|------------------------------------------|
//! | [`Access::Read`]      | [`Node::child`]                 | first child with that name, created once |
//! | [`Access::Write`]     | [`Node::set`]                   | attribute set or overwritten             |
//! | [`Access::Invoke`]    | [`Node::invoke`] / [`Node::append`] | new child appended every time        |
//!
//! Attribute names and child names are separate: reading `child("Foo")` never
//! looks at an attribute `Foo`, and `set("Foo", ..)` never touches a child.
//!
//! # Example
//!
//! ```
//! use pliant::Node;
//!
//! let mut store = Node::new("Store")?;
//! store.set("Name", "Acme Store")?;
//! store.child("Location")?.set("Address", "West Avenue")?;
//!
//! let products = store.child("Products")?;
//! products.set("Count", 2)?;
//! products.invoke("Product")?.set("Name", "Acme Floor Cleaner")?;
//! products.invoke("Product")?.set("Name", "Acme Bun")?;
//!
//! assert_eq!(store.index("Products")?.at(0)?.index("Product")?.len(), 2);
//! # Ok::<(), pliant::Error>(())
//! ```

use tracing::trace;

use crate::node::{validate_attribute_key, validate_name};
use crate::{AttributeSlot, Node, Record, Result, Value};

/// One access against a node, by name.
#[derive(Debug, Clone)]
pub enum Access<'n> {
    /// Get the first child with this name, creating it if missing.
    Read(&'n str),
    /// Set an attribute.
    Write(&'n str, Value),
    /// Append a new child, optionally with attributes from a record.
    Invoke(&'n str, Option<Record>),
}

/// Outcome of [`resolve`].
#[derive(Debug)]
pub enum Resolved<'a> {
    /// An existing child, or one created by this read.
    Child(&'a mut Node),
    /// The attribute was written.
    AttributeWritten,
    /// A freshly appended child.
    Appended(&'a mut Node),
}

impl<'a> Resolved<'a> {
    /// The node produced by the access, if it produced one.
    pub fn into_node(self) -> Option<&'a mut Node> {
        match self {
            Resolved::Child(node) | Resolved::Appended(node) => Some(node),
            Resolved::AttributeWritten => None,
        }
    }
}

/// Resolve an access against `node`.
///
/// Nothing is mutated when the name is invalid.
pub fn resolve<'a>(node: &'a mut Node, access: Access<'_>) -> Result<Resolved<'a>> {
    match access {
        Access::Read(name) => read_child(node, name).map(Resolved::Child),
        Access::Write(name, value) => {
            write_attribute(node, name, value)?;
            Ok(Resolved::AttributeWritten)
        }
        Access::Invoke(name, record) => invoke_child(node, name, record).map(Resolved::Appended),
    }
}

fn read_child<'a>(node: &'a mut Node, name: &str) -> Result<&'a mut Node> {
    if let Some(index) = node.children.iter().position(|c| c.name == name) {
        return Ok(&mut node.children[index]);
    }

    validate_name(name)?;
    trace!(parent = %node.name, child = name, "creating child on read");
    Ok(node.push_child(Node::unchecked(name.to_owned())))
}

fn write_attribute(node: &mut Node, name: &str, value: Value) -> Result<()> {
    validate_attribute_key(name)?;
    node.attributes.insert(name.to_owned(), value);
    Ok(())
}

fn invoke_child<'a>(node: &'a mut Node, name: &str, record: Option<Record>) -> Result<&'a mut Node> {
    validate_name(name)?;

    let mut child = Node::unchecked(name.to_owned());
    if let Some(record) = record {
        for (key, _) in &record {
            validate_attribute_key(key)?;
        }
        child.attributes.extend(record.into_iter_fields());
    }

    trace!(parent = %node.name, child = name, index = node.children.len(), "appending child");
    Ok(node.push_child(child))
}

impl Node {
    /// Bare read: the first child named `name`, created and appended if there
    /// is none.
    ///
    /// Repeated reads return the same child, so chained calls build a path:
    /// `root.child("a")?.child("b")?`.
    pub fn child(&mut self, name: &str) -> Result<&mut Node> {
        read_child(self, name)
    }

    /// Scalar write: set or overwrite the attribute `name`. Returns `self` so
    /// writes can be chained.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Node> {
        write_attribute(self, name, value.into())?;
        Ok(self)
    }

    /// Invocation: always append a new child named `name`.
    pub fn invoke(&mut self, name: &str) -> Result<&mut Node> {
        invoke_child(self, name, None)
    }

    /// Invocation with a record: append a new child named `name` whose
    /// attributes are the record's fields, in field order.
    pub fn invoke_with(&mut self, name: &str, record: impl Into<Record>) -> Result<&mut Node> {
        invoke_child(self, name, Some(record.into()))
    }

    /// Append a new child named `name`. Same as [`Node::invoke`].
    pub fn append(&mut self, name: &str) -> Result<&mut Node> {
        invoke_child(self, name, None)
    }

    /// Create the attribute `name` with an empty value and return a pending
    /// slot for it. An existing value is kept until the slot is assigned.
    pub fn declare_attribute(&mut self, name: &str) -> Result<AttributeSlot<'_>> {
        validate_attribute_key(name)?;
        self.attributes.entry(name.to_owned()).or_default();
        Ok(AttributeSlot::new(self, name.to_owned()))
    }
}
