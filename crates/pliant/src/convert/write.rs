//! Node tree to XML.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

use super::WriteOptions;
use crate::namespace::NamespaceScope;
use crate::node::split_clark;
use crate::{Error, Node, Result};

pub(super) fn write_document<W: Write>(root: &Node, writer: W, options: WriteOptions) -> Result<()> {
    let mut xml_writer = match options.indent {
        Some(width) => Writer::new_with_indent(writer, b' ', width),
        None => Writer::new(writer),
    };

    if options.declaration {
        emit(&mut xml_writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    }

    write_element(&mut xml_writer, root, &NamespaceScope::default())?;

    debug!(root = root.name(), elements = root.element_count(), "wrote xml");
    Ok(())
}

/// Write a single element and its children.
///
/// `inherited` is the scope in effect at the parent; the element declares
/// only what differs from it.
fn write_element<W: Write>(writer: &mut Writer<W>, node: &Node, inherited: &NamespaceScope) -> Result<()> {
    let mut scope = inherited.clone();
    let mut elem = BytesStart::new(node.name());

    if node.namespace() != scope.default_namespace() {
        elem.push_attribute(("xmlns", node.namespace().unwrap_or("")));
        scope.set_default(node.namespace());
    }

    // Namespace declarations go before the attributes that use them.
    let mut attributes = Vec::with_capacity(node.attributes.len());
    for (key, value) in node.attributes() {
        let qualified = match split_clark(key) {
            Some((uri, local)) => {
                let prefix = match scope.prefix_for(uri) {
                    Some(prefix) => prefix.to_owned(),
                    None => {
                        let prefix = scope.fresh_prefix();
                        elem.push_attribute((format!("xmlns:{prefix}").as_str(), uri));
                        scope.bind(&prefix, uri);
                        prefix
                    }
                };
                format!("{prefix}:{local}")
            }
            None => key.to_owned(),
        };
        attributes.push((qualified, value.as_str()));
    }
    for (key, value) in &attributes {
        elem.push_attribute((key.as_str(), *value));
    }

    if node.text().is_none() && node.children().is_empty() {
        return emit(writer, Event::Empty(elem));
    }

    emit(writer, Event::Start(elem))?;

    match node.text() {
        // Blank text ahead of children would read back as indentation.
        Some(text) if !node.children.is_empty() && text.trim().is_empty() => {
            emit(writer, Event::CData(BytesCData::new(text)))?;
        }
        // Written even when empty so an indenting writer keeps `<a></a>` on
        // one line.
        Some(text) => emit(writer, Event::Text(BytesText::new(text)))?,
        None => {}
    }

    for child in node.children() {
        write_element(writer, child, &scope)?;
    }

    emit(writer, Event::End(BytesEnd::new(node.name())))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Io(std::io::Error::other(e)))
}
