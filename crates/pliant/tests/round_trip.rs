use proptest::collection::vec;
use proptest::prelude::*;

use pliant::{Error, Node, WriteOptions};

#[derive(Debug, Clone)]
struct Shape {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Shape>,
}

impl Shape {
    fn build(&self) -> Node {
        let mut node = Node::new(self.name.as_str()).unwrap();
        self.fill(&mut node);
        node
    }

    fn fill(&self, node: &mut Node) {
        for (key, value) in &self.attributes {
            node.set(key, value.as_str()).unwrap();
        }
        if let Some(text) = &self.text {
            node.set_text(text.as_str());
        }
        for child in &self.children {
            child.fill(node.invoke(&child.name).unwrap());
        }
    }
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_.-]{0,8}"
}

fn attribute_name_strategy() -> impl Strategy<Value = String> {
    name_strategy().prop_filter("xmlns is reserved", |name| name != "xmlns")
}

// Any text, with blank runs common enough to land on elements with children.
fn text_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        "[ -~\t\n]{0,20}",
        "[ \t\n]{0,4}",
    ])
}

fn leaf_strategy() -> impl Strategy<Value = Shape> {
    (
        name_strategy(),
        vec((attribute_name_strategy(), "[ -~]{0,12}"), 0..4),
        text_strategy(),
    )
        .prop_map(|(name, attributes, text)| Shape {
            name,
            attributes,
            text,
            children: Vec::new(),
        })
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        (leaf_strategy(), vec(inner, 0..4)).prop_map(|(mut shape, children)| {
            shape.children = children;
            shape
        })
    })
}

proptest! {
    #[test]
    fn built_trees_round_trip(shape in shape_strategy()) {
        let tree = shape.build();
        let xml = tree.to_text("xml").unwrap();
        let parsed = Node::from_text(&xml).unwrap();

        prop_assert_eq!(&parsed, &tree);
        prop_assert_eq!(parsed.to_text("xml").unwrap(), xml);
    }

    #[test]
    fn pretty_output_round_trips(shape in shape_strategy()) {
        let tree = shape.build();
        let xml = tree.to_xml_string_with(WriteOptions::pretty()).unwrap();
        prop_assert_eq!(Node::from_text(&xml).unwrap(), tree);
    }
}

#[test]
fn text_ahead_of_children_round_trips() {
    for text in ["  padded  ", "", " \n\t", "x\n"] {
        let mut root = Node::new("a").unwrap();
        root.set_text(text);
        root.invoke("b").unwrap().invoke("c").unwrap();

        for options in [WriteOptions::compact(), WriteOptions::pretty()] {
            let xml = root.to_xml_string_with(options).unwrap();
            let back = Node::from_text(&xml).unwrap();
            assert_eq!(back.text(), Some(text), "text {text:?} through {xml:?}");
            assert_eq!(back, root);
        }
    }
}

#[test]
fn namespaced_document_round_trips() {
    let data = r#"<Store Name="Acme Store" xmlns="http://example.com/store/v1-0">
<Location Address= "West Avenue" />
<Products Count="1"  xmlns="http://example.com/products/v1-0">
    <Product Name ="Acme Bun" />
</Products>
<Owner>Content</Owner>
</Store>"#;

    let first = Node::from_text(data).unwrap();
    let text = first.to_text("xml").unwrap();
    let second = Node::from_text(&text).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        text,
        concat!(
            r#"<Store xmlns="http://example.com/store/v1-0" Name="Acme Store">"#,
            r#"<Location Address="West Avenue"/>"#,
            r#"<Products xmlns="http://example.com/products/v1-0" Count="1">"#,
            r#"<Product Name="Acme Bun"/>"#,
            r#"</Products>"#,
            r#"<Owner>Content</Owner>"#,
            r#"</Store>"#,
        )
    );
}

#[test]
fn built_namespaces_round_trip() {
    let mut root = Node::with_namespace("feed", "urn:feed").unwrap();
    root.invoke("entry").unwrap().set_namespace(Some("urn:feed".into()));
    let foreign = root.invoke("meta").unwrap();
    foreign.set_namespace(Some("urn:meta".into()));
    foreign.set("{urn:attr}id", 7).unwrap();
    foreign.invoke("plain").unwrap();

    let parsed = Node::from_text(&root.to_text("xml").unwrap()).unwrap();
    assert_eq!(parsed, root);
    assert_eq!(parsed.at(1).unwrap().at(0).unwrap().namespace(), None);
}

#[test]
fn failed_parse_returns_no_tree() {
    let result = Node::from_text("<Store><Products></Store>");
    assert!(matches!(result, Err(Error::MalformedMarkup { .. })));
}
