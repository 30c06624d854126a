//! Schema-less dynamic XML trees.
//!
//! Build a tree of named elements, attributes and text by name, without
//! declaring any schema, then convert it to XML and back.
//!
//! - [`Node::child`] gets or creates a single child (path building)
//! - [`Node::set`] writes an attribute
//! - [`Node::invoke`] / [`Node::append`] always append a new child
//! - [`Node::declare_attribute`] returns an [`AttributeSlot`] to fill later
//! - [`Node::index`] queries children by name, position, predicate or all
//! - [`Node::to_text`] and [`Node::from_text`] convert to and from XML,
//!   keeping attribute order, child order, text and namespaces
//!
//! # Example
//!
//! ```
//! use pliant::{assign_content, Node, Record};
//!
//! let mut store = Node::new("Store")?;
//! store.set("Name", "Acme Store")?;
//! store.child("Location")?.set("Address", "West Avenue, Heaven Street Road, LA")?;
//!
//! let products = store.child("Products")?;
//! products.set("Count", 2)?;
//! products.invoke_with("Product", Record::new().field("Name", "Acme Floor Cleaner").field("Price", 20))?;
//! products.invoke_with("Product", Record::new().field("Name", "Acme Bun").field("Price", 22))?;
//!
//! let owner = store.child("Owner")?;
//! owner.set("FirstName", "Jack")?;
//! assign_content(owner, "this is some internal content for owner");
//!
//! let xml = store.to_text("xml")?;
//! let clone = Node::from_text(&xml)?;
//! assert_eq!(clone, store);
//! assert_eq!(clone.index("Products")?.at(0)?.index("Product")?.len(), 2);
//! # Ok::<(), pliant::Error>(())
//! ```

pub mod access;
mod convert;
mod error;
mod namespace;
mod node;
mod record;
mod slot;
mod value;
mod view;

pub use access::{resolve, Access, Resolved};
pub use convert::{Format, WriteOptions};
pub use error::{Error, Result};
pub use node::{Node, XML_NAMESPACE};
pub use record::Record;
pub use slot::{assign_content, AttributeSlot, ContentTarget};
pub use value::Value;
pub use view::{Children, Key};
