//! XML to node tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::namespace::NamespaceScope;
use crate::node::validate_name;
use crate::{Error, Node, Result, Value};

/// An element being read.
struct Frame {
    node: Node,
    scope: NamespaceScope,
    /// Everything before the first child, verbatim.
    text: String,
    /// Whether `text` holds CDATA or non-whitespace text.
    significant: bool,
    /// Non-whitespace text after the first child.
    tail: String,
}

impl Frame {
    fn new(node: Node, scope: NamespaceScope) -> Self {
        Self {
            node,
            scope,
            text: String::new(),
            significant: false,
            tail: String::new(),
        }
    }

    /// Finish the element. Leaves keep their text verbatim (an element written
    /// as `<a></a>` has empty text). Elements with children keep the text
    /// before the first child verbatim unless it is only indentation.
    fn finish(mut self) -> Node {
        if self.node.children.is_empty() {
            self.node.text = Some(self.text);
        } else if self.significant {
            self.text.push_str(&self.tail);
            self.node.text = Some(self.text);
        } else if !self.tail.is_empty() {
            self.node.text = Some(self.tail);
        }
        self.node
    }

    fn push_text(&mut self, text: &str, cdata: bool) {
        let blank = !cdata && text.trim().is_empty();
        if self.node.children.is_empty() {
            self.text.push_str(text);
            self.significant |= !blank;
        } else if !blank {
            self.tail.push_str(text);
        }
    }
}

/// Parse a whole document into a tree. Nothing is returned unless the whole
/// document is well formed.
pub(super) fn parse_document(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::malformed(position(&reader), e.to_string()))?;

        match event {
            Event::Start(e) => {
                check_single_root(&reader, &root)?;
                let parent = stack.last().map(|f| &f.scope);
                let frame = open_element(&reader, &e, parent)?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                check_single_root(&reader, &root)?;
                let parent = stack.last().map(|f| &f.scope);
                let node = open_element(&reader, &e, parent)?.node;
                match stack.last_mut() {
                    Some(parent) => {
                        parent.node.children.push(node);
                    }
                    None => root = Some(node),
                }
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag against its start.
                let Some(frame) = stack.pop() else {
                    return Err(Error::malformed(position(&reader), "unexpected end tag"));
                };
                let node = frame.finish();
                match stack.last_mut() {
                    Some(parent) => parent.node.children.push(node),
                    None => root = Some(node),
                }
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::malformed(position(&reader), e.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.push_text(&text, false),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(Error::malformed(
                            position(&reader),
                            "text outside the root element",
                        ))
                    }
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|e| Error::malformed(position(&reader), e.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.push_text(text, true),
                    None => {
                        return Err(Error::malformed(
                            position(&reader),
                            "CDATA outside the root element",
                        ))
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed(position(&reader), "unclosed element"));
    }

    let root = root.ok_or_else(|| Error::malformed(position(&reader), "no root element found"))?;
    debug!(root = root.name(), elements = root.element_count(), "parsed xml");
    Ok(root)
}

fn position<R>(reader: &Reader<R>) -> u64 {
    reader.buffer_position() as u64
}

fn check_single_root<R>(reader: &Reader<R>, root: &Option<Node>) -> Result<()> {
    match root {
        Some(_) => Err(Error::malformed(position(reader), "content after the root element")),
        None => Ok(()),
    }
}

/// Build the node for a start or empty tag, resolving its namespaces against
/// the parent's scope.
fn open_element<R>(reader: &Reader<R>, start: &BytesStart<'_>, parent: Option<&NamespaceScope>) -> Result<Frame> {
    let malformed = |message: String| Error::malformed(position(reader), message);

    let mut scope = parent.cloned().unwrap_or_default();
    let mut attributes: Vec<(String, Value)> = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| malformed(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref()).map_err(|e| malformed(e.to_string()))?;
        let value = attr.unescape_value().map_err(|e| malformed(e.to_string()))?;

        if key == "xmlns" {
            scope.set_default(Some(value.as_ref()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            if value.is_empty() {
                return Err(malformed(format!("empty namespace bound to prefix {prefix:?}")));
            }
            scope.bind(prefix, &value);
        } else {
            attributes.push((key.to_owned(), Value::from(value.into_owned())));
        }
    }

    let raw_name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| malformed(e.to_string()))?
        .to_owned();
    let (namespace, local) = match raw_name.split_once(':') {
        Some((prefix, local)) => {
            let uri = scope
                .resolve(prefix)
                .ok_or_else(|| malformed(format!("unbound prefix {prefix:?} on element {raw_name:?}")))?;
            (Some(uri.to_owned()), local)
        }
        None => (scope.default_namespace().map(str::to_owned), raw_name.as_str()),
    };
    validate_name(local).map_err(|_| malformed(format!("invalid element name {raw_name:?}")))?;

    let mut node = Node::unchecked(local.to_owned());
    node.namespace = namespace;

    for (key, value) in attributes {
        // Unprefixed attributes are in no namespace, whatever the default is.
        let key = match key.split_once(':') {
            Some((prefix, local)) => {
                let uri = scope
                    .resolve(prefix)
                    .ok_or_else(|| malformed(format!("unbound prefix {prefix:?} on attribute {key:?}")))?;
                format!("{{{uri}}}{local}")
            }
            None => key,
        };
        if node.attributes.insert(key.clone(), value).is_some() {
            return Err(malformed(format!("duplicate attribute {key:?}")));
        }
    }

    Ok(Frame::new(node, scope))
}
