use bsonic::{doc, encode_document, from_slice, to_vec, DecoderError, Document, Raw};
use serde::{Deserialize, Serialize};

#[test]
fn elements_can_be_captured_and_decoded_lazily() {
    #[derive(Deserialize)]
    struct Envelope {
        kind: String,
        payload: Raw,
    }

    let doc = doc! {
        "kind": "user",
        "payload": { "name": "Ada", "age": 36 },
    };
    let bytes = to_vec(&doc).unwrap();

    let envelope: Envelope = from_slice(&bytes).unwrap();
    assert_eq!(envelope.kind, "user");
    assert_eq!(envelope.payload.kind, 0x03);

    // Nothing below the raw element was decoded yet; do it now, on demand.
    #[derive(Deserialize)]
    struct User {
        name: String,
        age: i32,
    }

    let user: User = envelope.payload.unmarshal().unwrap();
    assert_eq!(user.name, "Ada");
    assert_eq!(user.age, 36);

    let as_doc: Document = envelope.payload.unmarshal().unwrap();
    assert_eq!(as_doc, doc! { "name": "Ada", "age": 36 });
}

#[test]
fn captured_scalars_decode_into_their_types() {
    let raw = Raw::new(0x10, 42i32.to_le_bytes().to_vec());
    let n: i32 = raw.unmarshal().unwrap();
    assert_eq!(n, 42);
}

#[test]
fn incompatible_targets_are_reported() {
    let raw = Raw::new(0x10, vec![0, 0, 0, 0]);
    match raw.unmarshal::<String>() {
        Err(DecoderError::IncompatibleType { .. }) => {}
        other => panic!("expected IncompatibleType, got {:?}", other),
    }
}

#[test]
fn raw_fields_are_spliced_verbatim() {
    #[derive(Serialize)]
    struct Wrapper {
        x: Raw,
    }

    let bytes = to_vec(&Wrapper {
        x: Raw::new(0x10, 42i32.to_le_bytes().to_vec()),
    })
    .unwrap();

    let mut expected = Vec::new();
    encode_document(&mut expected, &doc! { "x": 42 }).unwrap();
    assert_eq!(bytes, expected);
}

#[test]
fn raw_documents_pass_through_as_roots() {
    let mut encoded = Vec::new();
    encode_document(&mut encoded, &doc! { "a": 1 }).unwrap();

    let bytes = to_vec(&Raw::new(0x00, encoded.clone())).unwrap();
    assert_eq!(bytes, encoded);

    let bytes = to_vec(&Raw::new(0x03, encoded.clone())).unwrap();
    assert_eq!(bytes, encoded);
}

#[test]
fn non_document_raw_roots_are_rejected() {
    assert!(to_vec(&Raw::new(0x10, vec![0, 0, 0, 0])).is_err());
}

#[test]
fn kind_zero_unmarshals_as_a_document() {
    let mut encoded = Vec::new();
    encode_document(&mut encoded, &doc! { "a": 1 }).unwrap();

    let raw = Raw::new(0x00, encoded);
    let doc: Document = raw.unmarshal().unwrap();
    assert_eq!(doc, doc! { "a": 1 });
}
