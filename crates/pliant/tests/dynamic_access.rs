use pliant::{assign_content, Error, Key, Node, Record};

fn create_store() -> Node {
    let mut store = Node::new("Store").unwrap();
    store.set("Name", "Acme Store").unwrap();
    store
        .child("Location")
        .unwrap()
        .set("Address", "West Avenue, Heaven Street Road, LA")
        .unwrap();
    store.child("Products").unwrap().set("Count", 2).unwrap();

    store.child("Owner").unwrap().set("FirstName", "Jack").unwrap();
    store.child("Owner").unwrap().set("SecondName", "Jack").unwrap();
    assign_content(store.child("Owner").unwrap(), "this is some internal content for owner");

    let p1 = store.child("Products").unwrap().invoke("Product").unwrap();
    p1.set("Name", "Acme Floor Cleaner").unwrap();
    p1.set("Price", 20).unwrap();

    let p2 = store.child("Products").unwrap().invoke("Product").unwrap();
    p2.set("Name", "Acme Bun").unwrap();
    p2.set("Price", 22).unwrap();

    store
}

fn items(count: usize) -> Node {
    let mut root = Node::new("MyObject").unwrap();
    for i in 0..count {
        let item = root.append("Item").unwrap();
        item.set("CountNumber", i).unwrap();
    }
    root
}

#[test]
fn store_has_expected_shape() {
    let store = create_store();

    let top: Vec<_> = store.index(None::<&str>).unwrap().iter().map(Node::name).collect();
    assert_eq!(top, ["Location", "Products", "Owner"]);

    let products = store.index("Products").unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products.at(0).unwrap().index("Product").unwrap().len(), 2);
    assert_eq!(products.at(0).unwrap().attr("Count"), Some("2"));
}

#[test]
fn null_key_returns_all_children() {
    let store = create_store();
    let products = store.find("Products").unwrap().index(()).unwrap();
    assert_eq!(products.len(), 2);
}

#[test]
fn named_children() {
    let store = create_store();
    let owner = store.index("Owner").unwrap();
    assert_eq!(owner.first().and_then(|o| o.attr("FirstName")), Some("Jack"));
    assert_eq!(
        owner.first().and_then(Node::text),
        Some("this is some internal content for owner")
    );
}

#[test]
fn store_xml_survives_round_trip() {
    let store = create_store();
    let xml = store.to_text("xml").unwrap();
    let clone = Node::from_text(&xml).unwrap();
    let xml_copy = clone.to_text("xml").unwrap();

    assert_eq!(xml, xml_copy);
    assert_eq!(clone, store);
}

#[test]
fn append_adds_elements_by_name() {
    let root = items(10);
    assert_eq!(root.index("Item").unwrap().len(), 10);
}

#[test]
fn declared_attributes_take_assigned_values() {
    let mut root = Node::new("MyObject").unwrap();
    for i in 0..10 {
        let mut slot = root.declare_attribute(&format!("Attrib{i}")).unwrap();
        assign_content(&mut slot, "somevalue");
    }

    assert_eq!(root.attr("Attrib1"), Some("somevalue"));
    assert_eq!(root.attr("Attrib8"), Some("somevalue"));
    assert_eq!(root.attributes().len(), 10);
    assert_eq!(root.child_count(), 0);
}

#[test]
fn integer_index() {
    let root = items(10);
    assert_eq!(root.at(3).unwrap().attr_as::<i32>("CountNumber"), Some(3));
    assert_eq!(root.at(9).unwrap().attr_as::<i32>("CountNumber"), Some(9));
    assert!(matches!(root.at(10), Err(Error::OutOfRange { index: 10, len: 10 })));
}

#[test]
fn elements_and_attributes_across_mixed_indices() {
    let mut root = Node::new("MyObject").unwrap();

    let mut attrib1 = root.append("element").unwrap().declare_attribute("attribute1").unwrap();
    assign_content(&mut attrib1, "hello1");
    let mut attrib2 = root.append("element").unwrap().declare_attribute("attribute1").unwrap();
    assign_content(&mut attrib2, "hello2");

    assert_eq!(root.at(0).unwrap().attr("attribute1"), Some("hello1"));
    assert_eq!(root.at(1).unwrap().attr("attribute1"), Some("hello2"));
}

#[test]
fn filter_index() {
    let root = items(10);
    let filter = |obj: &Node| obj.attr_as::<i32>("CountNumber").is_some_and(|n| n > 5);
    let result = root.index(Key::Filter(&filter)).unwrap();
    assert_eq!(result.len(), 4);
}

#[test]
fn nested_traversal() {
    let mut model = Node::new("model").unwrap();

    let c1 = model.invoke("class").unwrap();
    c1.set("name", "Class1").unwrap();
    let p = c1.invoke("property").unwrap();
    p.set("name", "Property1").unwrap();
    p.set("type", "string").unwrap();
    let p = c1.invoke("property").unwrap();
    p.set("name", "Property1").unwrap();
    p.set("type", "string").unwrap();

    let c2 = model.invoke("class").unwrap();
    c2.invoke("property").unwrap().set("name", "Property1").unwrap().set("type", "string").unwrap();
    c2.set("name", "Class2").unwrap();
    c2.invoke("property").unwrap().set("name", "Property1").unwrap().set("type", "string").unwrap();

    assert_eq!(model.index("class").unwrap().len(), 2);
    assert_eq!(model.index("class").unwrap().at(0).unwrap().index("property").unwrap().len(), 2);
    assert_eq!(
        model.index("class").unwrap().index(0usize).unwrap().index("property").unwrap().len(),
        2
    );
    assert_eq!(model.index("class").unwrap().index("property").unwrap().len(), 4);
}

#[test]
fn named_parameters() {
    let mut model = Node::new("model").unwrap();

    let c1 = model.invoke_with("class", [("name", "Class1")]).unwrap();
    c1.invoke_with("property", [("name", "Property1"), ("type", "string")]).unwrap();
    c1.invoke_with("property", [("name", "Property2"), ("type", "string")]).unwrap();
    let c2 = model.invoke_with("class", [("name", "Class2")]).unwrap();
    c2.invoke_with("property", Record::new().field("name", "Property1").field("type", "string"))
        .unwrap();
    c2.invoke_with("property", Record::new().field("name", "Property2").field("type", "string"))
        .unwrap();

    let classes = model.index("class").unwrap();
    assert_eq!(classes.len(), 2);
    let properties = classes.at(0).unwrap().index("property").unwrap();
    assert_eq!(properties.len(), 2);
    assert_eq!(properties.at(1).unwrap().attr("name"), Some("Property2"));
    assert_eq!(classes.at(1).unwrap().attr("name"), Some("Class2"));
}

#[cfg(feature = "serde")]
#[test]
fn named_parameters_from_structs() {
    #[derive(serde::Serialize)]
    struct Property<'a> {
        name: &'a str,
        r#type: &'a str,
    }

    let mut model = Node::new("model").unwrap();
    let class = model.invoke("class").unwrap();
    for name in ["Property1", "Property2"] {
        let record = Record::from_serialize(&Property { name, r#type: "string" }).unwrap();
        class.invoke_with("property", record).unwrap();
    }

    let property = model.at(0).unwrap().at(1).unwrap();
    let attrs: Vec<_> = property.attributes().map(|(k, v)| (k, v.as_str())).collect();
    assert_eq!(attrs, [("name", "Property2"), ("type", "string")]);
}

#[test]
fn path_building_is_stable() {
    let mut root = Node::new("root").unwrap();
    root.child("a").unwrap().child("b").unwrap().set("c", 1).unwrap();
    root.child("a").unwrap().child("b").unwrap().set("d", 2).unwrap();

    assert_eq!(root.child_count(), 1);
    let b = root.at(0).unwrap().at(0).unwrap();
    assert_eq!(b.attr("c"), Some("1"));
    assert_eq!(b.attr("d"), Some("2"));
}
