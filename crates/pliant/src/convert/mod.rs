//! Conversion between node trees and markup text.
//!
//! XML is read and written through `quick-xml`; this module maps its events
//! onto [`Node`] trees and back.

mod read;
mod write;

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use crate::{Error, Node, Result};

/// Target format for [`Node::to_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        if tag.eq_ignore_ascii_case("xml") {
            Ok(Format::Xml)
        } else {
            Err(Error::UnsupportedFormat(tag.to_owned()))
        }
    }
}

/// Options for XML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Emit `<?xml version="1.0" encoding="utf-8"?>` first.
    pub declaration: bool,
}

impl WriteOptions {
    /// Single-line output without declaration.
    pub fn compact() -> Self {
        Self::default()
    }

    /// Two-space indentation with an XML declaration.
    pub fn pretty() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }

    /// Set the indentation width.
    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// Toggle the XML declaration.
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

impl Node {
    /// Convert the tree to text in the format named by `format`.
    ///
    /// Only `"xml"` is supported; any other tag fails with
    /// [`Error::UnsupportedFormat`] before anything is written.
    pub fn to_text(&self, format: &str) -> Result<String> {
        match format.parse::<Format>()? {
            Format::Xml => self.to_xml_string(),
        }
    }

    /// Compact XML.
    pub fn to_xml_string(&self) -> Result<String> {
        self.to_xml_string_with(WriteOptions::compact())
    }

    /// XML with the given options.
    pub fn to_xml_string_with(&self, options: WriteOptions) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output, options)?;
        String::from_utf8(output).map_err(|e| Error::Io(std::io::Error::other(e)))
    }

    /// Write XML to a writer.
    pub fn write_xml<W: Write>(&self, writer: W, options: WriteOptions) -> Result<()> {
        write::write_document(self, writer, options)
    }

    /// Build a tree from XML text.
    pub fn from_text(xml: &str) -> Result<Node> {
        read::parse_document(xml)
    }

    /// Build a tree from UTF-8 XML bytes.
    pub fn from_xml_bytes(xml: &[u8]) -> Result<Node> {
        let xml = std::str::from_utf8(xml)
            .map_err(|e| Error::malformed(e.valid_up_to() as u64, e.to_string()))?;
        Self::from_text(xml)
    }

    /// Build a tree from a reader holding a whole XML document.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Node> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_xml_bytes(&bytes)
    }
}

impl FromStr for Node {
    type Err = Error;

    fn from_str(xml: &str) -> Result<Self> {
        Node::from_text(xml)
    }
}

/// Compact XML.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml_string().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}
