use std::fmt;
use std::vec;

use serde::de::{
    self,
    Deserialize,
    DeserializeSeed,
    Deserializer,
    EnumAccess,
    MapAccess,
    SeqAccess,
    Unexpected,
    VariantAccess,
    Visitor,
};

use super::error::{DecoderError, DecoderResult};
use crate::bson::{Array, Binary, Bson, JavaScript, MongoTimestamp, OrderKey, RegExp, Symbol};
use crate::oid::ObjectId;
use crate::ordered::{OrderedDocument, OrderedDocumentIntoIterator};
use crate::spec::BinarySubtype;

// Describes a Bson value to serde's error machinery.
pub(crate) fn unexpected(bson: &Bson) -> Unexpected {
    match *bson {
        Bson::FloatingPoint(v) => Unexpected::Float(v),
        Bson::String(ref v) => Unexpected::Str(v),
        Bson::Array(..) => Unexpected::Seq,
        Bson::Document(..) => Unexpected::Map,
        Bson::Boolean(v) => Unexpected::Bool(v),
        Bson::Null => Unexpected::Unit,
        Bson::RegExp(..) => Unexpected::Other("regular expression"),
        Bson::JavaScriptCode(..) => Unexpected::Other("JavaScript code"),
        Bson::JavaScriptCodeWithScope(..) => Unexpected::Other("JavaScript code with scope"),
        Bson::I32(v) => Unexpected::Signed(i64::from(v)),
        Bson::I64(v) => Unexpected::Signed(v),
        Bson::MongoTimestamp(..) => Unexpected::Other("timestamp"),
        Bson::Binary(..) => Unexpected::Other("binary data"),
        Bson::ObjectId(..) => Unexpected::Other("object id"),
        Bson::UtcDatetime(..) => Unexpected::Other("UTC datetime"),
        Bson::Symbol(..) => Unexpected::Other("symbol"),
        Bson::MinKey => Unexpected::Other("min key"),
        Bson::MaxKey => Unexpected::Other("max key"),
        Bson::Undefined => Unexpected::Other("undefined"),
        Bson::Raw(..) => Unexpected::Other("raw element"),
    }
}

pub struct BsonVisitor;

impl<'de> Visitor<'de> for BsonVisitor {
    type Value = Bson;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a BSON value")
    }

    #[inline]
    fn visit_bool<E>(self, value: bool) -> Result<Bson, E> {
        Ok(Bson::Boolean(value))
    }

    #[inline]
    fn visit_i8<E>(self, value: i8) -> Result<Bson, E> {
        Ok(Bson::I32(i32::from(value)))
    }

    #[inline]
    fn visit_i16<E>(self, value: i16) -> Result<Bson, E> {
        Ok(Bson::I32(i32::from(value)))
    }

    #[inline]
    fn visit_i32<E>(self, value: i32) -> Result<Bson, E> {
        Ok(Bson::I32(value))
    }

    #[inline]
    fn visit_i64<E>(self, value: i64) -> Result<Bson, E> {
        Ok(Bson::I64(value))
    }

    #[inline]
    fn visit_u64<E>(self, value: u64) -> Result<Bson, E> {
        Ok(Bson::I64(value as i64))
    }

    #[inline]
    fn visit_f64<E>(self, value: f64) -> Result<Bson, E> {
        Ok(Bson::FloatingPoint(value))
    }

    #[inline]
    fn visit_char<E>(self, value: char) -> Result<Bson, E> {
        Ok(Bson::String(value.to_string()))
    }

    #[inline]
    fn visit_str<E>(self, value: &str) -> Result<Bson, E> {
        Ok(Bson::String(value.to_owned()))
    }

    #[inline]
    fn visit_string<E>(self, value: String) -> Result<Bson, E> {
        Ok(Bson::String(value))
    }

    #[inline]
    fn visit_bytes<E>(self, value: &[u8]) -> Result<Bson, E> {
        Ok(Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: value.to_vec(),
        }))
    }

    #[inline]
    fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Bson, E> {
        Ok(Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: value,
        }))
    }

    #[inline]
    fn visit_none<E>(self) -> Result<Bson, E> {
        Ok(Bson::Null)
    }

    #[inline]
    fn visit_some<D>(self, deserializer: D) -> Result<Bson, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    #[inline]
    fn visit_unit<E>(self) -> Result<Bson, E> {
        Ok(Bson::Null)
    }

    #[inline]
    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Bson, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    #[inline]
    fn visit_seq<A>(self, mut seq: A) -> Result<Bson, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut values = Array::new();
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(Bson::Array(values))
    }

    #[inline]
    fn visit_map<A>(self, mut map: A) -> Result<Bson, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut values = OrderedDocument::new();
        while let Some((key, value)) = map.next_entry::<String, Bson>()? {
            values.insert(key, value);
        }
        Ok(Bson::from_extended_document(values))
    }
}

impl<'de> Deserialize<'de> for Bson {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Bson, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BsonVisitor)
    }
}

impl<'de> Deserialize<'de> for OrderedDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::Document(doc) => Ok(doc),
            bson => Err(de::Error::invalid_type(unexpected(&bson), &"a document")),
        }
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::ObjectId(oid) => Ok(oid),
            bson => Err(de::Error::invalid_type(unexpected(&bson), &"an object id")),
        }
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::Binary(binary) => Ok(binary),
            bson => Err(de::Error::invalid_type(unexpected(&bson), &"binary data")),
        }
    }
}

impl<'de> Deserialize<'de> for RegExp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::RegExp(regexp) => Ok(regexp),
            bson => Err(de::Error::invalid_type(
                unexpected(&bson),
                &"a regular expression",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for JavaScript {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::JavaScriptCode(code) => Ok(JavaScript { code, scope: None }),
            Bson::JavaScriptCodeWithScope(code, scope) => Ok(JavaScript {
                code,
                scope: Some(scope),
            }),
            bson => Err(de::Error::invalid_type(
                unexpected(&bson),
                &"JavaScript code",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::Symbol(symbol) => Ok(symbol),
            Bson::String(s) => Ok(Symbol(s)),
            bson => Err(de::Error::invalid_type(unexpected(&bson), &"a symbol")),
        }
    }
}

impl<'de> Deserialize<'de> for MongoTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::MongoTimestamp(timestamp) => Ok(timestamp),
            Bson::I64(v) => Ok(MongoTimestamp(v)),
            bson => Err(de::Error::invalid_type(unexpected(&bson), &"a timestamp")),
        }
    }
}

impl<'de> Deserialize<'de> for OrderKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::MinKey => Ok(OrderKey::MinKey),
            Bson::MaxKey => Ok(OrderKey::MaxKey),
            bson => Err(de::Error::invalid_type(
                unexpected(&bson),
                &"a min key or max key",
            )),
        }
    }
}

/// Serde Deserializer over a `Bson` value.
///
/// Values nested inside documents and arrays decode leniently: an element
/// kind with no sensible conversion into the requested target produces the
/// target's zero value instead of an error. The top-level value decodes
/// strictly and reports `IncompatibleType`.
pub struct Decoder {
    value: Option<Bson>,
    lenient: bool,
}

impl Decoder {
    pub fn new(value: Bson) -> Decoder {
        Decoder {
            value: Some(value),
            lenient: false,
        }
    }

    fn lenient(value: Bson) -> Decoder {
        Decoder {
            value: Some(value),
            lenient: true,
        }
    }

    fn take(&mut self) -> DecoderResult<Bson> {
        self.value.take().ok_or(DecoderError::EndOfStream)
    }

    // Zero-fills on mismatch when lenient, errors otherwise. Null is
    // compatible with every target and always leaves the zero value.
    fn mismatch<'de, V, F>(
        self,
        visitor: V,
        expected: &'static str,
        value: Bson,
        zero: F,
    ) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
        F: FnOnce(V) -> DecoderResult<V::Value>,
    {
        if self.lenient || value == Bson::Null {
            zero(visitor)
        } else {
            Err(DecoderError::incompatible(expected, &value))
        }
    }
}

// The signed value of any element that can stand in for an integer. UTC
// datetimes convert to nanoseconds since the epoch; floats truncate.
fn integer_value(value: &Bson) -> Option<i64> {
    match *value {
        Bson::I32(v) => Some(i64::from(v)),
        Bson::I64(v) => Some(v),
        Bson::FloatingPoint(v) => Some(v as i64),
        Bson::UtcDatetime(ref v) => v.timestamp_millis().checked_mul(1_000_000),
        Bson::MongoTimestamp(MongoTimestamp(v)) => Some(v),
        _ => None,
    }
}

fn float_value(value: &Bson) -> Option<f64> {
    match *value {
        Bson::FloatingPoint(v) => Some(v),
        Bson::I32(v) => Some(f64::from(v)),
        Bson::I64(v) => Some(v as f64),
        _ => None,
    }
}

macro_rules! deserialize_signed {
    ($method:ident, $visit:ident, $ty:ty, $expected:expr) => {
        fn $method<V>(mut self, visitor: V) -> DecoderResult<V::Value>
        where
            V: Visitor<'de>,
        {
            let value = self.take()?;
            match integer_value(&value) {
                Some(v) if v >= i64::from(<$ty>::min_value()) && v <= i64::from(<$ty>::max_value()) => {
                    visitor.$visit(v as $ty)
                }
                _ => self.mismatch(visitor, $expected, value, |v| v.$visit(0)),
            }
        }
    };
}

macro_rules! deserialize_unsigned {
    ($method:ident, $visit:ident, $ty:ty, $expected:expr) => {
        fn $method<V>(mut self, visitor: V) -> DecoderResult<V::Value>
        where
            V: Visitor<'de>,
        {
            let value = self.take()?;
            match integer_value(&value) {
                Some(v) if v >= 0 && (v as u64) <= u64::from(<$ty>::max_value()) => {
                    visitor.$visit(v as $ty)
                }
                _ => self.mismatch(visitor, $expected, value, |v| v.$visit(0)),
            }
        }
    };
}

impl<'de> Deserializer<'de> for Decoder {
    type Error = DecoderError;

    #[inline]
    fn deserialize_any<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.take()? {
            Bson::FloatingPoint(v) => visitor.visit_f64(v),
            Bson::String(v) => visitor.visit_string(v),
            Bson::Array(v) => visitor.visit_seq(SeqDecoder::new(v)),
            Bson::Document(v) => visitor.visit_map(MapDecoder::new(v)),
            Bson::Boolean(v) => visitor.visit_bool(v),
            Bson::Null => visitor.visit_unit(),
            Bson::I32(v) => visitor.visit_i32(v),
            Bson::I64(v) => visitor.visit_i64(v),
            // Everything else is handed over as its marker document, which
            // `BsonVisitor::visit_map` folds back into the scalar.
            value => {
                let doc = value.to_extended_document();
                visitor.visit_map(MapDecoder::new(doc))
            }
        }
    }

    fn deserialize_bool<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::Boolean(v) => visitor.visit_bool(v),
            Bson::I32(v) => visitor.visit_bool(v != 0),
            value => self.mismatch(visitor, "a boolean", value, |v| v.visit_bool(false)),
        }
    }

    deserialize_signed!(deserialize_i8, visit_i8, i8, "an 8-bit integer");
    deserialize_signed!(deserialize_i16, visit_i16, i16, "a 16-bit integer");
    deserialize_signed!(deserialize_i32, visit_i32, i32, "a 32-bit integer");

    fn deserialize_i64<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match integer_value(&value) {
            Some(v) => visitor.visit_i64(v),
            None => self.mismatch(visitor, "a 64-bit integer", value, |v| v.visit_i64(0)),
        }
    }

    deserialize_unsigned!(deserialize_u8, visit_u8, u8, "an unsigned 8-bit integer");
    deserialize_unsigned!(deserialize_u16, visit_u16, u16, "an unsigned 16-bit integer");
    deserialize_unsigned!(deserialize_u32, visit_u32, u32, "an unsigned 32-bit integer");

    fn deserialize_u64<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match integer_value(&value) {
            Some(v) if v >= 0 => visitor.visit_u64(v as u64),
            _ => self.mismatch(visitor, "an unsigned 64-bit integer", value, |v| {
                v.visit_u64(0)
            }),
        }
    }

    fn deserialize_f32<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match float_value(&value) {
            Some(v) => visitor.visit_f32(v as f32),
            None => self.mismatch(visitor, "a 32-bit float", value, |v| v.visit_f32(0.0)),
        }
    }

    fn deserialize_f64<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match float_value(&value) {
            Some(v) => visitor.visit_f64(v),
            None => self.mismatch(visitor, "a 64-bit float", value, |v| v.visit_f64(0.0)),
        }
    }

    fn deserialize_char<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::String(ref s) if s.chars().count() == 1 => {
                visitor.visit_char(s.chars().next().unwrap())
            }
            value => self.mismatch(visitor, "a single character", value, |v| {
                v.visit_char('\u{0}')
            }),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::String(v) => visitor.visit_string(v),
            Bson::Symbol(Symbol(v)) => visitor.visit_string(v),
            Bson::JavaScriptCode(v) => visitor.visit_string(v),
            Bson::FloatingPoint(v) => visitor.visit_string(v.to_string()),
            value => self.mismatch(visitor, "a string", value, |v| {
                v.visit_string(String::new())
            }),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::String(v) => visitor.visit_byte_buf(v.into_bytes()),
            Bson::Binary(Binary {
                subtype: BinarySubtype::Generic,
                bytes,
            })
            | Bson::Binary(Binary {
                subtype: BinarySubtype::BinaryOld,
                bytes,
            }) => visitor.visit_byte_buf(bytes),
            Bson::ObjectId(id) => visitor.visit_byte_buf(id.bytes().to_vec()),
            value => self.mismatch(visitor, "bytes", value, |v| v.visit_byte_buf(Vec::new())),
        }
    }

    #[inline]
    fn deserialize_option<V>(self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Bson::Null) | Some(Bson::Undefined) => visitor.visit_none(),
            Some(_) => visitor.visit_some(self),
            None => Err(DecoderError::EndOfStream),
        }
    }

    fn deserialize_unit<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::Null | Bson::Undefined => visitor.visit_unit(),
            value => self.mismatch(visitor, "a unit value", value, |v| v.visit_unit()),
        }
    }

    #[inline]
    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    #[inline]
    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::Array(v) => visitor.visit_seq(SeqDecoder::new(v)),
            // Byte vectors decoded without a bytes hint still reach their
            // element-wise targets.
            Bson::Binary(Binary {
                subtype: BinarySubtype::Generic,
                bytes,
            })
            | Bson::Binary(Binary {
                subtype: BinarySubtype::BinaryOld,
                bytes,
            }) => {
                let items = bytes
                    .into_iter()
                    .map(|b| Bson::I32(i32::from(b)))
                    .collect::<Vec<_>>();
                visitor.visit_seq(SeqDecoder::new(items))
            }
            value => self.mismatch(visitor, "an array", value, |v| {
                v.visit_seq(SeqDecoder::new(Vec::new()))
            }),
        }
    }

    #[inline]
    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    #[inline]
    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::Document(v) => visitor.visit_map(MapDecoder::new(v)),
            value => self.mismatch(visitor, "a document", value, |v| {
                v.visit_map(MapDecoder::new(OrderedDocument::new()))
            }),
        }
    }

    #[inline]
    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        mut self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::String(variant) => visitor.visit_enum(EnumDecoder {
                variant: Bson::String(variant),
                content: VariantDecoder { value: None },
            }),
            Bson::Document(doc) => {
                let mut iter = doc.into_iter();
                let (variant, value) = match iter.next() {
                    Some(pair) => pair,
                    None => {
                        return Err(DecoderError::SyntaxError {
                            message: "expected an enum variant name".to_owned(),
                        });
                    }
                };

                // enums are encoded as maps with a single key:value pair
                if iter.next().is_some() {
                    return Err(DecoderError::SyntaxError {
                        message: "expected a single key:value pair".to_owned(),
                    });
                }

                visitor.visit_enum(EnumDecoder {
                    variant: Bson::String(variant),
                    content: VariantDecoder { value: Some(value) },
                })
            }
            value => Err(DecoderError::incompatible("an enum", &value)),
        }
    }

    fn deserialize_identifier<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        let value = self.take()?;
        match value {
            Bson::String(v) => visitor.visit_string(v),
            value => Err(DecoderError::incompatible("an identifier", &value)),
        }
    }

    #[inline]
    fn deserialize_ignored_any<V>(mut self, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        self.take()?;
        visitor.visit_unit()
    }
}

struct EnumDecoder {
    variant: Bson,
    content: VariantDecoder,
}

impl<'de> EnumAccess<'de> for EnumDecoder {
    type Error = DecoderError;
    type Variant = VariantDecoder;

    fn variant_seed<V>(self, seed: V) -> DecoderResult<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let value = seed.deserialize(Decoder::new(self.variant))?;
        Ok((value, self.content))
    }
}

struct VariantDecoder {
    value: Option<Bson>,
}

impl<'de> VariantAccess<'de> for VariantDecoder {
    type Error = DecoderError;

    fn unit_variant(self) -> DecoderResult<()> {
        match self.value {
            None => Ok(()),
            Some(value) => {
                Bson::deserialize(Decoder::new(value))?;
                Ok(())
            }
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> DecoderResult<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        let value = self.value.ok_or(DecoderError::EndOfStream)?;
        seed.deserialize(Decoder::new(value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Bson::Array(fields)) => visitor.visit_seq(SeqDecoder::new(fields)),
            Some(value) => Err(DecoderError::incompatible("a tuple variant", &value)),
            None => Err(DecoderError::EndOfStream),
        }
    }

    fn struct_variant<V>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> DecoderResult<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Bson::Document(fields)) => visitor.visit_map(MapDecoder::new(fields)),
            Some(value) => Err(DecoderError::incompatible("a struct variant", &value)),
            None => Err(DecoderError::EndOfStream),
        }
    }
}

struct SeqDecoder {
    iter: vec::IntoIter<Bson>,
}

impl SeqDecoder {
    fn new(values: Vec<Bson>) -> SeqDecoder {
        SeqDecoder {
            iter: values.into_iter(),
        }
    }
}

impl<'de> SeqAccess<'de> for SeqDecoder {
    type Error = DecoderError;

    fn next_element_seed<T>(&mut self, seed: T) -> DecoderResult<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            None => Ok(None),
            Some(value) => seed.deserialize(Decoder::lenient(value)).map(Some),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDecoder {
    iter: OrderedDocumentIntoIterator,
    value: Option<Bson>,
}

impl MapDecoder {
    fn new(doc: OrderedDocument) -> MapDecoder {
        MapDecoder {
            iter: doc.into_iter(),
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for MapDecoder {
    type Error = DecoderError;

    fn next_key_seed<K>(&mut self, seed: K) -> DecoderResult<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Decoder::new(Bson::String(key))).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> DecoderResult<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let value = self.value.take().ok_or(DecoderError::EndOfStream)?;
        seed.deserialize(Decoder::lenient(value))
    }
}
