use bsonic::oid::ObjectId;
use bsonic::spec::{BinarySubtype, ElementType};
use bsonic::{bson, doc, Binary, Bson, JavaScript, OrderKey, RegExp, Symbol};

#[test]
fn from_impls_pick_the_natural_kind() {
    assert_eq!(Bson::from(1.5f32), Bson::FloatingPoint(1.5));
    assert_eq!(Bson::from("s"), Bson::String("s".to_owned()));
    assert_eq!(Bson::from(7i64), Bson::I64(7));
    assert_eq!(Bson::from(7u16), Bson::I32(7));
    assert_eq!(Bson::from(3_000_000_000u32), Bson::I64(3_000_000_000));
    assert_eq!(
        Bson::from(vec![1u8, 2]),
        Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2],
        })
    );
    assert_eq!(Bson::from(OrderKey::MinKey), Bson::MinKey);
    assert_eq!(Bson::from(OrderKey::MaxKey), Bson::MaxKey);
}

#[test]
fn javascript_conversion_depends_on_the_scope() {
    let plain = JavaScript {
        code: "x".to_owned(),
        scope: None,
    };
    assert_eq!(Bson::from(plain), Bson::JavaScriptCode("x".to_owned()));

    let scoped = JavaScript {
        code: "x".to_owned(),
        scope: Some(doc! { "y": 1 }),
    };
    assert_eq!(
        Bson::from(scoped),
        Bson::JavaScriptCodeWithScope("x".to_owned(), doc! { "y": 1 })
    );
}

#[test]
fn element_types_match_the_wire_tags() {
    assert_eq!(bson!(1.0).element_type() as u8, 0x01);
    assert_eq!(bson!("s").element_type() as u8, 0x02);
    assert_eq!(bson!({}).element_type() as u8, 0x03);
    assert_eq!(bson!([]).element_type() as u8, 0x04);
    assert_eq!(bson!(true).element_type() as u8, 0x08);
    assert_eq!(bson!(null).element_type() as u8, 0x0A);
    assert_eq!(bson!(1).element_type() as u8, 0x10);
    assert_eq!(bson!(1i64).element_type() as u8, 0x12);
    assert_eq!(Bson::MaxKey.element_type() as u8, 0x7F);
    assert_eq!(Bson::MinKey.element_type() as u8, 0xFF);
    assert_eq!(ElementType::from(0x0C), None);
}

#[test]
fn display_produces_shell_like_output() {
    let id = ObjectId::with_string("507f1f77bcf86cd799439011").unwrap();
    let doc = doc! {
        "float": 2.5,
        "string": "hello",
        "array": ["testing", 1],
        "doc": { "fish": "in", "a": "barrel", "!": 1 },
        "bool": true,
        "null": null,
        "regexp": Bson::RegExp(RegExp {
            pattern: "s[ao]d".to_owned(),
            options: "i".to_owned(),
        }),
        "symbol": Bson::Symbol(Symbol("sym".to_owned())),
        "_id": id,
    };

    let expected = "{ float: 2.5, string: \"hello\", array: [\"testing\", 1], \
                    doc: { fish: \"in\", a: \"barrel\", !: 1 }, bool: true, null: null, \
                    regexp: /s[ao]d/i, symbol: Symbol(\"sym\"), \
                    _id: ObjectId(\"507f1f77bcf86cd799439011\") }";
    assert_eq!(format!("{}", doc), expected);
}
