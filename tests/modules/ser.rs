use std::collections::BTreeMap;

use bsonic::oid::ObjectId;
use bsonic::spec::BinarySubtype;
use bsonic::{
    doc,
    encode_document,
    from_bson,
    serde_helpers,
    to_bson,
    to_vec,
    Binary,
    Bson,
    EncoderError,
    JavaScript,
    MongoTimestamp,
    OrderKey,
    RegExp,
    Symbol,
    UtcDateTime,
};
use serde::{Deserialize, Serialize};

#[test]
fn floating_point() {
    let obj = Bson::FloatingPoint(240.5);
    let f: f64 = from_bson(obj.clone()).unwrap();
    assert_eq!(f, 240.5);

    let deser: Bson = to_bson(&f).unwrap();
    assert_eq!(obj, deser);
}

#[test]
fn string() {
    let obj = Bson::String("avocado".to_owned());
    let s: String = from_bson(obj.clone()).unwrap();
    assert_eq!(s, "avocado");

    let deser: Bson = to_bson(&s).unwrap();
    assert_eq!(obj, deser);
}

#[test]
fn arr() {
    let obj = Bson::Array(vec![Bson::I32(0), Bson::I32(1), Bson::I32(2), Bson::I32(3)]);
    let arr: Vec<i32> = from_bson(obj.clone()).unwrap();
    assert_eq!(arr, vec![0i32, 1i32, 2i32, 3i32]);

    let deser: Bson = to_bson(&arr).unwrap();
    assert_eq!(deser, obj);
}

#[test]
fn boolean() {
    let obj = Bson::Boolean(true);
    let b: bool = from_bson(obj.clone()).unwrap();
    assert_eq!(b, true);

    let deser: Bson = to_bson(&b).unwrap();
    assert_eq!(deser, obj);
}

#[test]
fn int32() {
    let obj = Bson::I32(101);
    let i: i32 = from_bson(obj.clone()).unwrap();
    assert_eq!(i, 101);

    let deser: Bson = to_bson(&i).unwrap();
    assert_eq!(deser, obj);
}

#[test]
fn int64() {
    let obj = Bson::I64(101);
    let i: i64 = from_bson(obj.clone()).unwrap();
    assert_eq!(i, 101);

    let deser: Bson = to_bson(&i).unwrap();
    assert_eq!(deser, obj);
}

#[test]
fn unsigned_integers() {
    assert_eq!(to_bson(&7u8).unwrap(), Bson::I32(7));
    assert_eq!(to_bson(&7u16).unwrap(), Bson::I32(7));
    assert_eq!(to_bson(&7u32).unwrap(), Bson::I32(7));
    assert_eq!(
        to_bson(&3_000_000_000u32).unwrap(),
        Bson::I64(3_000_000_000)
    );
    assert_eq!(to_bson(&7u64).unwrap(), Bson::I64(7));
}

#[test]
fn u64_too_large_for_i64_is_rejected() {
    match to_bson(&u64::max_value()) {
        Err(EncoderError::UnsupportedUnsignedInteger(v)) => assert_eq!(v, u64::max_value()),
        other => panic!("expected UnsupportedUnsignedInteger, got {:?}", other),
    }
}

#[test]
fn map_with_non_string_keys_is_rejected() {
    let mut map = BTreeMap::new();
    map.insert(1i32, 2i32);

    match to_bson(&map) {
        Err(EncoderError::InvalidMapKeyType(..)) => {}
        other => panic!("expected InvalidMapKeyType, got {:?}", other),
    }
}

#[test]
fn non_document_root_is_rejected() {
    match to_vec(&5i32) {
        Err(EncoderError::InvalidDocumentRoot(..)) => {}
        other => panic!("expected InvalidDocumentRoot, got {:?}", other),
    }

    match to_vec(&vec![1i32, 2, 3]) {
        Err(EncoderError::InvalidDocumentRoot(..)) => {}
        other => panic!("expected InvalidDocumentRoot, got {:?}", other),
    }
}

#[test]
fn struct_marshals_like_the_equivalent_document() {
    #[derive(Serialize)]
    struct Person {
        name: String,
        age: i32,
    }

    let bytes = to_vec(&Person {
        name: "Ada".to_owned(),
        age: 36,
    })
    .unwrap();

    let mut expected = Vec::new();
    encode_document(&mut expected, &doc! { "name": "Ada", "age": 36 }).unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn zero_valued_fields_can_be_omitted() {
    #[derive(Serialize)]
    struct Account {
        name: String,
        #[serde(skip_serializing_if = "serde_helpers::is_zero")]
        age: i32,
    }

    let bytes = to_vec(&Account {
        name: "Ada".to_owned(),
        age: 0,
    })
    .unwrap();

    let mut expected = Vec::new();
    encode_document(&mut expected, &doc! { "name": "Ada" }).unwrap();
    assert_eq!(bytes, expected);

    let bytes = to_vec(&Account {
        name: "Ada".to_owned(),
        age: 36,
    })
    .unwrap();

    let mut expected = Vec::new();
    encode_document(&mut expected, &doc! { "name": "Ada", "age": 36 }).unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn compact_int_uses_the_narrowest_encoding_that_fits() {
    #[derive(Serialize)]
    struct Entry {
        #[serde(serialize_with = "serde_helpers::serialize_i64_as_compact_int")]
        size: i64,
    }

    let small = to_bson(&Entry { size: 42 }).unwrap();
    match small {
        Bson::Document(doc) => assert_eq!(doc.get("size"), Some(&Bson::I32(42))),
        other => panic!("expected document, got {:?}", other),
    }

    let large = to_bson(&Entry { size: 1 << 33 }).unwrap();
    match large {
        Bson::Document(doc) => assert_eq!(doc.get("size"), Some(&Bson::I64(1 << 33))),
        other => panic!("expected document, got {:?}", other),
    }
}

#[test]
fn field_keys_can_be_renamed() {
    #[derive(Serialize)]
    struct Wrapped {
        #[serde(rename = "_id")]
        id: i32,
    }

    let bson = to_bson(&Wrapped { id: 7 }).unwrap();
    match bson {
        Bson::Document(doc) => assert_eq!(doc.get("_id"), Some(&Bson::I32(7))),
        other => panic!("expected document, got {:?}", other),
    }
}

#[test]
fn domain_scalars_survive_a_full_round_trip() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Everything {
        id: ObjectId,
        symbol: Symbol,
        stamp: MongoTimestamp,
        order: OrderKey,
        blob: Binary,
        pattern: RegExp,
        code: JavaScript,
        scoped: JavaScript,
        when: UtcDateTime,
    }

    let src = Everything {
        id: ObjectId::with_string("507f1f77bcf86cd799439011").unwrap(),
        symbol: Symbol("sym".to_owned()),
        stamp: MongoTimestamp(-7),
        order: OrderKey::MaxKey,
        blob: Binary {
            subtype: BinarySubtype::Md5,
            bytes: b"thingies".to_vec(),
        },
        pattern: RegExp {
            pattern: "s[ao]d".to_owned(),
            options: "i".to_owned(),
        },
        code: JavaScript {
            code: "function(x) { return x._id; }".to_owned(),
            scope: None,
        },
        scoped: JavaScript {
            code: "function(x) { return x + y; }".to_owned(),
            scope: Some(doc! { "y": 5 }),
        },
        when: UtcDateTime::now(),
    };

    let bytes = to_vec(&src).unwrap();
    let back: Everything = bsonic::from_slice(&bytes).unwrap();
    assert_eq!(back, src);
}

#[test]
fn nested_enums_round_trip() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Shape {
        Point,
        Circle(f64),
        Rect { w: i32, h: i32 },
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        shapes: Vec<Shape>,
    }

    let src = Holder {
        shapes: vec![
            Shape::Point,
            Shape::Circle(1.5),
            Shape::Rect { w: 3, h: 4 },
        ],
    };

    let bytes = to_vec(&src).unwrap();
    let back: Holder = bsonic::from_slice(&bytes).unwrap();
    assert_eq!(back, src);
}
