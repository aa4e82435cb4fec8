use bsonic::{doc, Bson, Document, ValueAccessError};

#[test]
fn insertion_and_lookup() {
    let mut doc = Document::new();
    assert!(doc.is_empty());

    doc.insert("a", 1);
    doc.insert("b", "two");

    assert_eq!(doc.len(), 2);
    assert!(doc.contains_key("a"));
    assert_eq!(doc.get("a"), Some(&Bson::I32(1)));
    assert_eq!(doc.get("missing"), None);
    assert_eq!(doc.position("b"), Some(1));
}

#[test]
fn typed_accessors() {
    let doc = doc! {
        "float": 2.5,
        "string": "s",
        "bool": false,
        "i32": 3,
        "i64": 4i64,
        "doc": { "x": 1 },
        "arr": [1],
    };

    assert_eq!(doc.get_f64("float"), Ok(2.5));
    assert_eq!(doc.get_str("string"), Ok("s"));
    assert_eq!(doc.get_bool("bool"), Ok(false));
    assert_eq!(doc.get_i32("i32"), Ok(3));
    assert_eq!(doc.get_i64("i64"), Ok(4));
    assert!(doc.get_document("doc").is_ok());
    assert!(doc.get_array("arr").is_ok());

    assert_eq!(doc.get_str("missing"), Err(ValueAccessError::NotPresent));
    assert_eq!(doc.get_i32("string"), Err(ValueAccessError::UnexpectedType));
}

#[test]
fn mutation() {
    let mut doc = doc! { "a": 1, "b": 2 };

    if let Some(value) = doc.get_mut("a") {
        *value = Bson::I32(10);
    }
    assert_eq!(doc.get_i32("a"), Ok(10));

    let old = doc.insert("b", 20);
    assert_eq!(old, Some(Bson::I32(2)));

    assert_eq!(doc.remove("a"), Some(Bson::I32(10)));
    assert_eq!(doc.remove("a"), None);
    assert_eq!(doc.len(), 1);

    doc.clear();
    assert!(doc.is_empty());
}

#[test]
fn keys_and_values_iterate_in_order() {
    let doc = doc! { "one": 1, "two": 2, "three": 3 };

    let keys: Vec<_> = doc.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["one", "two", "three"]);

    let values: Vec<_> = doc.values().cloned().collect();
    assert_eq!(values, vec![Bson::I32(1), Bson::I32(2), Bson::I32(3)]);
}

#[test]
fn collecting_pairs_builds_a_document() {
    let doc: Document = vec![
        ("a".to_owned(), Bson::I32(1)),
        ("b".to_owned(), Bson::Boolean(true)),
    ]
    .into_iter()
    .collect();

    assert_eq!(doc, doc! { "a": 1, "b": true });
}

#[test]
fn display_formats_like_a_shell_document() {
    assert_eq!(format!("{}", doc! {}), "{}");
    assert_eq!(
        format!("{}", doc! { "a": 1, "s": "x", "n": null }),
        "{ a: 1, s: \"x\", n: null }"
    );
}
