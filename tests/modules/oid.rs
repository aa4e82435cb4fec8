use bsonic::oid::ObjectId;

#[test]
fn field_extraction() {
    let bytes: [u8; 12] = [
        0xDE, 0xAD, 0xBE, 0xEF, // timestamp is 3735928559
        0xEF, 0xCD, 0xAB, // machine fingerprint
        0xFA, 0x29, // process id
        0x11, 0x22, 0x33, // counter is 1122867
    ];

    let oid = ObjectId::with_bytes(bytes);
    assert_eq!(3_735_928_559u32, oid.timestamp());
    assert_eq!([0xEF, 0xCD, 0xAB], oid.machine());
    assert_eq!(0xFA29, oid.pid());
    assert_eq!(1_122_867u32, oid.counter());
}

#[test]
fn timestamp_round_trips() {
    let time: u32 = 2_000_000;
    let oid = ObjectId::with_timestamp(time);
    assert_eq!(time, oid.timestamp());

    // Everything else is zeroed.
    assert_eq!([0, 0, 0], oid.machine());
    assert_eq!(0, oid.pid());
    assert_eq!(0, oid.counter());
}

#[test]
fn timestamp_is_big_endian() {
    let time: u32 = 3_857_379;
    let oid = ObjectId::with_timestamp(time);
    assert_eq!(0x00, oid.bytes()[0]);
    assert_eq!(0x3A, oid.bytes()[1]);
    assert_eq!(0xDB, oid.bytes()[2]);
    assert_eq!(0xE3, oid.bytes()[3]);
}

#[test]
fn string_oid() {
    let s = "123456789012123456789012";
    let oid_res = ObjectId::with_string(s);
    assert!(oid_res.is_ok());
    let actual_s = hex::encode(oid_res.unwrap().bytes());
    assert_eq!(s.to_owned(), actual_s);
}

#[test]
fn byte_string_oid() {
    let s = "541b1a00e8a23afa832b218e";
    let oid_res = ObjectId::with_string(s);
    assert!(oid_res.is_ok());
    let oid = oid_res.unwrap();
    let bytes: [u8; 12] = [
        0x54, 0x1B, 0x1A, 0x00, 0xE8, 0xA2, 0x3A, 0xFA, 0x83, 0x2B, 0x21, 0x8E,
    ];

    assert_eq!(oid.bytes(), bytes);
    assert_eq!(oid.to_hex(), s);
}

#[test]
fn bad_string_oid() {
    assert!(ObjectId::with_string("541b1a00e8a23afa832b218x").is_err());
    assert!(ObjectId::with_string("541b1a00e8a23afa832b21").is_err());
    assert!(ObjectId::with_string("541b1a00e8a23afa832b218e01").is_err());
}

// The only test that generates ids, so nothing else in this binary can race
// the counter between the two calls.
#[test]
fn consecutive_ids_share_state_and_count_up_by_one() {
    let a = ObjectId::new();
    let b = ObjectId::new();

    assert_eq!(a.machine(), b.machine());
    assert_eq!(a.pid(), b.pid());
    assert_eq!(b.counter(), a.counter().wrapping_add(1) & 0xFF_FFFF);

    // The timestamp is the wall clock, give or take the call gap.
    assert!(b.timestamp() - a.timestamp() <= 1);
}
