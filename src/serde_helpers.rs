//! Helper functions for tweaking how individual struct fields are
//! serialized.

use serde::ser::{Error, Serializer};

/// Returns true when the value equals its type's default.
///
/// Meant for `#[serde(skip_serializing_if = "serde_helpers::is_zero")]`, the
/// equivalent of leaving out zero-valued fields by hand.
pub fn is_zero<T>(value: &T) -> bool
where
    T: Default + PartialEq,
{
    *value == T::default()
}

/// Serializes an `i64` as a 32-bit integer when the value fits, falling back
/// to the full 64-bit encoding otherwise.
///
/// Meant for
/// `#[serde(serialize_with = "serde_helpers::serialize_i64_as_compact_int")]`
/// on fields whose values are usually small but may legitimately be large.
pub fn serialize_i64_as_compact_int<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if *value >= i64::from(i32::min_value()) && *value <= i64::from(i32::max_value()) {
        serializer.serialize_i32(*value as i32)
    } else {
        serializer.serialize_i64(*value)
    }
}

/// Serializes a `u64` as the narrowest signed integer encoding that holds the
/// value. BSON has no unsigned 64-bit type, so values beyond `i64::MAX` fail.
pub fn serialize_u64_as_compact_int<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if *value <= i32::max_value() as u64 {
        serializer.serialize_i32(*value as i32)
    } else if *value <= i64::max_value() as u64 {
        serializer.serialize_i64(*value as i64)
    } else {
        Err(S::Error::custom(
            "BSON has no u64 type, and the value is too large to fit in an i64",
        ))
    }
}
