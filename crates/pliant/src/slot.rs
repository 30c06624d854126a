//! Deferred attribute references and content assignment targets.

use crate::{Node, Value};

/// A reference to one attribute key on one node.
///
/// Returned by [`Node::declare_attribute`]. The slot holds no value of its
/// own: reading and writing go straight to the owner's attribute entry. It
/// starts out pending and stops being pending once a value is assigned
/// through it.
#[derive(Debug)]
pub struct AttributeSlot<'a> {
    owner: &'a mut Node,
    key: String,
    pending: bool,
}

impl<'a> AttributeSlot<'a> {
    pub(crate) fn new(owner: &'a mut Node, key: String) -> Self {
        Self {
            owner,
            key,
            pending: true,
        }
    }

    /// The attribute key this slot refers to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value of the referenced attribute.
    pub fn value(&self) -> Option<&Value> {
        self.owner.attributes.get(&self.key)
    }

    /// Whether no value has been assigned through this slot yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Assign the referenced attribute.
    pub fn set(&mut self, value: impl Into<Value>) {
        self.set_content(value.into());
    }

    /// The node owning the attribute.
    pub fn owner(&self) -> &Node {
        &*self.owner
    }

    /// Give back the owning node, ending the slot.
    pub fn into_owner(self) -> &'a mut Node {
        self.owner
    }
}

/// Something that can receive content through [`assign_content`].
///
/// A [`Node`] takes the value as its text; an [`AttributeSlot`] stores it in
/// the attribute it refers to.
pub trait ContentTarget {
    fn set_content(&mut self, value: Value);
}

impl ContentTarget for Node {
    fn set_content(&mut self, value: Value) {
        self.text = Some(value.into_string());
    }
}

impl ContentTarget for AttributeSlot<'_> {
    fn set_content(&mut self, value: Value) {
        self.owner.attributes.insert(self.key.clone(), value);
        self.pending = false;
    }
}

/// Assign content to a node or an attribute slot.
pub fn assign_content<T: ContentTarget + ?Sized>(target: &mut T, value: impl Into<Value>) {
    target.set_content(value.into());
}
