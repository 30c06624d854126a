//! Indexed views over children.

use std::fmt;

use crate::{Error, Node, Result};

/// An indexer key.
///
/// Keys convert from `()` and `None` (all children), names, and positions:
///
/// ```
/// use pliant::{Key, Node};
///
/// let mut root = Node::new("root")?;
/// root.invoke("a")?;
/// root.invoke("b")?.set("n", 6)?;
/// root.invoke("a")?;
///
/// assert_eq!(root.index(())?.len(), 3);
/// assert_eq!(root.index("a")?.len(), 2);
/// assert_eq!(root.index(1usize)?.first().map(|n| n.name()), Some("b"));
///
/// let big = |n: &Node| n.attr_as::<i32>("n").is_some_and(|v| v > 5);
/// assert_eq!(root.index(Key::Filter(&big))?.len(), 1);
/// # Ok::<(), pliant::Error>(())
/// ```
#[derive(Clone, Copy)]
pub enum Key<'k> {
    /// Every child.
    All,
    /// Children with exactly this name.
    Name(&'k str),
    /// The child at this position among all children (a member, on a view).
    Position(usize),
    /// Children for which the predicate holds.
    Filter(&'k dyn Fn(&Node) -> bool),
}

impl fmt::Debug for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::All => f.write_str("All"),
            Key::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Key::Position(index) => f.debug_tuple("Position").field(index).finish(),
            Key::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

impl From<()> for Key<'_> {
    fn from(_: ()) -> Self {
        Key::All
    }
}

impl<'k> From<Option<&'k str>> for Key<'k> {
    fn from(name: Option<&'k str>) -> Self {
        name.map_or(Key::All, Key::Name)
    }
}

impl<'k> From<&'k str> for Key<'k> {
    fn from(name: &'k str) -> Self {
        Key::Name(name)
    }
}

impl<'k> From<&'k String> for Key<'k> {
    fn from(name: &'k String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Position(index)
    }
}

/// An ordered snapshot of nodes produced by an indexer query.
///
/// The view borrows the tree it was taken from, so the tree cannot change
/// while the view is alive. Query again to see later mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Children<'a> {
    /// Select from `candidates` by `key`.
    pub(crate) fn select(candidates: &'a [Node], key: Key<'_>) -> Result<Self> {
        let nodes = match key {
            Key::All => candidates.iter().collect(),
            Key::Name(name) => candidates.iter().filter(|n| n.name == name).collect(),
            Key::Position(index) => vec![candidates.get(index).ok_or(Error::OutOfRange {
                index,
                len: candidates.len(),
            })?],
            Key::Filter(predicate) => candidates.iter().filter(|n| predicate(*n)).collect(),
        };
        Ok(Self { nodes })
    }

    /// Number of nodes in the view.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&'a Node> {
        self.nodes.get(index).copied()
    }

    /// Node at `index`, or [`Error::OutOfRange`].
    pub fn at(&self, index: usize) -> Result<&'a Node> {
        self.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.nodes.len(),
        })
    }

    /// First node in the view.
    pub fn first(&self) -> Option<&'a Node> {
        self.get(0)
    }

    /// Iterate nodes in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a Node> + '_ {
        self.nodes.iter().copied()
    }

    /// Query the members' children by `key`, flattened in member order, so
    /// `model.index("class")?.index(0usize)?.index("property")?` reaches the
    /// properties of the first class.
    ///
    /// A position picks a member of this view rather than a child, giving a
    /// one-node view or [`Error::OutOfRange`].
    pub fn index<'k>(&self, key: impl Into<Key<'k>>) -> Result<Children<'a>> {
        let key = key.into();
        if let Key::Position(index) = key {
            return Ok(Self {
                nodes: vec![self.at(index)?],
            });
        }

        let mut nodes = Vec::new();
        for member in self.iter() {
            nodes.extend(Children::select(&member.children, key)?.nodes);
        }
        Ok(Self { nodes })
    }

    /// The nodes as a slice.
    pub fn as_slice(&self) -> &[&'a Node] {
        &self.nodes
    }
}

impl<'a> IntoIterator for Children<'a> {
    type Item = &'a Node;
    type IntoIter = std::vec::IntoIter<&'a Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, 'v> IntoIterator for &'v Children<'a> {
    type Item = &'a Node;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

impl Node {
    /// Indexer read: a snapshot of the children matching `key`.
    ///
    /// - `()` or `None`: all children in order
    /// - a name: children with exactly that name, in order
    /// - a position: the child at that position among all children, or
    ///   [`Error::OutOfRange`]
    /// - [`Key::Filter`]: children satisfying the predicate, in order
    pub fn index<'k>(&self, key: impl Into<Key<'k>>) -> Result<Children<'_>> {
        Children::select(&self.children, key.into())
    }

    /// The child at `index` among all children, or [`Error::OutOfRange`].
    pub fn at(&self, index: usize) -> Result<&Node> {
        self.children.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.children.len(),
        })
    }

    /// Mutable variant of [`Node::at`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Node> {
        let len = self.children.len();
        self.children.get_mut(index).ok_or(Error::OutOfRange { index, len })
    }
}
