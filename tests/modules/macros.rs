use bsonic::{bson, doc, Bson};

#[test]
fn standalone_values() {
    assert_eq!(bson!(null), Bson::Null);
    assert_eq!(bson!(true), Bson::Boolean(true));
    assert_eq!(bson!("hi"), Bson::String("hi".to_owned()));
    assert_eq!(bson!(5), Bson::I32(5));
    assert_eq!(bson!(5i64), Bson::I64(5));
    assert_eq!(bson!(2.5), Bson::FloatingPoint(2.5));
}

#[test]
fn arrays() {
    assert_eq!(bson!([]), Bson::Array(vec![]));

    let arr = bson!([1, "two", [3], { "four": 4 }, null]);
    assert_eq!(
        arr,
        Bson::Array(vec![
            Bson::I32(1),
            Bson::String("two".to_owned()),
            Bson::Array(vec![Bson::I32(3)]),
            Bson::Document(doc! { "four": 4 }),
            Bson::Null,
        ])
    );
}

#[test]
fn documents_preserve_declaration_order() {
    let doc = doc! {
        "first": 1,
        "second": "foo",
        "alphanumeric": "bar",
    };

    let keys: Vec<_> = doc.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["first", "second", "alphanumeric"]);
}

#[test]
fn nested_documents() {
    let doc = doc! {
        "outer": {
            "inner": { "deep": true },
            "list": [1, 2],
        },
        "null": null,
    };

    let outer = doc.get_document("outer").unwrap();
    let inner = outer.get_document("inner").unwrap();
    assert_eq!(inner.get_bool("deep"), Ok(true));
    assert_eq!(
        outer.get_array("list"),
        Ok(&vec![Bson::I32(1), Bson::I32(2)])
    );
    assert!(doc.is_null("null"));
}

#[test]
fn expressions_as_values() {
    let x = 21;
    let doc = doc! {
        "computed": x * 2,
        "wrapped": (-20),
    };

    assert_eq!(doc.get_i32("computed"), Ok(42));
    assert_eq!(doc.get_i32("wrapped"), Ok(-20));
}

#[test]
fn trailing_commas_are_allowed() {
    let doc = doc! {
        "a": [1, 2,],
        "b": { "c": 3, },
    };

    assert_eq!(doc.get_array("a").unwrap().len(), 2);
    assert_eq!(doc.get_document("b").unwrap().get_i32("c"), Ok(3));
}
