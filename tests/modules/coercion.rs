use bsonic::{doc, from_bson, from_slice, to_vec, Bson, DecoderError, MongoTimestamp};
use chrono::offset::TimeZone;
use chrono::Utc;
use serde::Deserialize;

fn decode<T: serde::de::DeserializeOwned>(doc: bsonic::Document) -> T {
    let bytes = to_vec(&doc).unwrap();
    from_slice(&bytes).unwrap()
}

// An element kind with no conversion into the target field leaves the field
// at its zero value instead of failing the document.
#[test]
fn incompatible_field_is_left_at_zero() {
    #[derive(Deserialize)]
    struct Target {
        a: i32,
        b: i32,
    }

    let target: Target = decode(doc! { "a": "str", "b": 7 });
    assert_eq!(target.a, 0);
    assert_eq!(target.b, 7);
}

#[test]
fn unknown_keys_are_dropped() {
    #[derive(Deserialize)]
    struct Target {
        a: i32,
    }

    let target: Target = decode(doc! { "a": 1, "unrelated": "ignored", "more": [1, 2] });
    assert_eq!(target.a, 1);
}

#[test]
fn integers_widen_and_narrow() {
    #[derive(Deserialize)]
    struct Target {
        wide: i64,
        narrow: i32,
        too_big: i32,
    }

    let target: Target = decode(doc! {
        "wide": 7,
        "narrow": 9i64,
        "too_big": 0x1_0000_0000i64,
    });
    assert_eq!(target.wide, 7);
    assert_eq!(target.narrow, 9);
    assert_eq!(target.too_big, 0);
}

#[test]
fn floats_truncate_into_integers() {
    #[derive(Deserialize)]
    struct Target {
        x: i64,
    }

    let target: Target = decode(doc! { "x": 3.9 });
    assert_eq!(target.x, 3);
}

#[test]
fn integers_convert_into_floats() {
    #[derive(Deserialize)]
    struct Target {
        x: f64,
    }

    let target: Target = decode(doc! { "x": 21 });
    assert_eq!(target.x, 21.0);
}

#[test]
fn int32_converts_into_bool() {
    #[derive(Deserialize)]
    struct Target {
        yes: bool,
        no: bool,
    }

    let target: Target = decode(doc! { "yes": 1, "no": 0 });
    assert!(target.yes);
    assert!(!target.no);
}

#[test]
fn floats_format_into_strings() {
    #[derive(Deserialize)]
    struct Target {
        x: String,
    }

    let target: Target = decode(doc! { "x": 2.5 });
    assert_eq!(target.x, "2.5");
}

#[test]
fn symbols_and_code_convert_into_strings() {
    #[derive(Deserialize)]
    struct Target {
        sym: String,
        code: String,
    }

    let target: Target = decode(doc! {
        "sym": Bson::Symbol(bsonic::Symbol("tag".to_owned())),
        "code": Bson::JavaScriptCode("function() {}".to_owned()),
    });
    assert_eq!(target.sym, "tag");
    assert_eq!(target.code, "function() {}");
}

#[test]
fn datetimes_convert_into_nanoseconds() {
    #[derive(Deserialize)]
    struct Target {
        when: i64,
    }

    let target: Target = decode(doc! { "when": Utc.timestamp_opt(1_000, 0).unwrap() });
    assert_eq!(target.when, 1_000_000_000_000);
}

#[test]
fn mongo_timestamps_convert_into_i64() {
    #[derive(Deserialize)]
    struct Target {
        stamp: i64,
    }

    let target: Target = decode(doc! { "stamp": Bson::MongoTimestamp(MongoTimestamp(99)) });
    assert_eq!(target.stamp, 99);
}

#[test]
fn generic_binary_decodes_into_byte_vectors() {
    #[derive(Deserialize)]
    struct Target {
        data: Vec<u8>,
    }

    let target: Target = decode(doc! { "data": vec![1u8, 2, 3] });
    assert_eq!(target.data, vec![1, 2, 3]);
}

#[test]
fn null_and_missing_leave_options_empty() {
    #[derive(Deserialize)]
    struct Target {
        a: Option<i32>,
        b: Option<i32>,
        c: Option<i32>,
    }

    let target: Target = decode(doc! { "a": Bson::Null, "c": 3 });
    assert_eq!(target.a, None);
    assert_eq!(target.b, None);
    assert_eq!(target.c, Some(3));
}

// Incompatible elements of a typed sequence zero-fill rather than abort.
#[test]
fn mixed_arrays_zero_fill_incompatible_elements() {
    #[derive(Deserialize)]
    struct Target {
        xs: Vec<i32>,
    }

    let target: Target = decode(doc! { "xs": [1, "two", 3] });
    assert_eq!(target.xs, vec![1, 0, 3]);
}

#[test]
fn nested_documents_decode_into_nested_structs() {
    #[derive(Deserialize)]
    struct Inner {
        x: i32,
    }

    #[derive(Deserialize)]
    struct Outer {
        inner: Inner,
        tail: String,
    }

    let target: Outer = decode(doc! { "inner": { "x": 5 }, "tail": "end" });
    assert_eq!(target.inner.x, 5);
    assert_eq!(target.tail, "end");
}

// At the top level the mismatch is an error, not a silent zero.
#[test]
fn top_level_mismatch_is_reported() {
    match from_bson::<String>(Bson::I32(5)) {
        Err(DecoderError::IncompatibleType { .. }) => {}
        other => panic!("expected IncompatibleType, got {:?}", other),
    }
}

#[test]
fn dynamic_targets_accept_everything() {
    let doc = doc! {
        "str": "x",
        "int": 5,
        "float": 1.5,
        "doc": { "nested": true },
        "arr": [1, 2],
    };

    let bytes = to_vec(&doc).unwrap();
    let back: bsonic::Document = from_slice(&bytes).unwrap();
    assert_eq!(back, doc);

    let bson: Bson = from_bson(Bson::Document(doc.clone())).unwrap();
    assert_eq!(bson, Bson::Document(doc));
}
