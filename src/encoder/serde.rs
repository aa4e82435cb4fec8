use serde::ser::{
    Serialize,
    SerializeMap,
    SerializeSeq,
    SerializeStruct,
    SerializeStructVariant,
    SerializeTuple,
    SerializeTupleStruct,
    SerializeTupleVariant,
    Serializer,
};

use super::{to_bson, EncoderError, EncoderResult};
use crate::bson::{Binary, Bson, Document, JavaScript, MongoTimestamp, OrderKey, RegExp, Symbol};
use crate::oid::ObjectId;
use crate::ordered::OrderedDocument;
use crate::spec::BinarySubtype;

impl Serialize for ObjectId {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::ObjectId(self.clone()).serialize(serializer)
    }
}

impl Serialize for OrderedDocument {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for Bson {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Bson::FloatingPoint(v) => serializer.serialize_f64(v),
            Bson::String(ref v) => serializer.serialize_str(v),
            Bson::Array(ref v) => v.serialize(serializer),
            Bson::Document(ref v) => v.serialize(serializer),
            Bson::Boolean(v) => serializer.serialize_bool(v),
            Bson::Null => serializer.serialize_unit(),
            Bson::I32(v) => serializer.serialize_i32(v),
            Bson::I64(v) => serializer.serialize_i64(v),
            // Everything else travels as its marker document.
            _ => self.to_extended_document().serialize(serializer),
        }
    }
}

impl Serialize for Binary {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::Binary(self.clone()).serialize(serializer)
    }
}

impl Serialize for RegExp {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::RegExp(self.clone()).serialize(serializer)
    }
}

impl Serialize for JavaScript {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::from(self.clone()).serialize(serializer)
    }
}

impl Serialize for Symbol {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::Symbol(self.clone()).serialize(serializer)
    }
}

impl Serialize for MongoTimestamp {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::MongoTimestamp(*self).serialize(serializer)
    }
}

impl Serialize for OrderKey {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::from(*self).serialize(serializer)
    }
}

/// Serde Serializer that builds a `Bson` value tree.
pub struct Encoder;

impl Encoder {
    pub fn new() -> Encoder {
        Encoder
    }
}

impl Default for Encoder {
    fn default() -> Encoder {
        Encoder::new()
    }
}

impl Serializer for Encoder {
    type Ok = Bson;
    type Error = EncoderError;

    type SerializeSeq = ArrayEncoder;
    type SerializeTuple = ArrayEncoder;
    type SerializeTupleStruct = ArrayEncoder;
    type SerializeTupleVariant = TupleVariantEncoder;
    type SerializeMap = MapEncoder;
    type SerializeStruct = StructEncoder;
    type SerializeStructVariant = StructVariantEncoder;

    #[inline]
    fn serialize_bool(self, value: bool) -> EncoderResult<Bson> {
        Ok(Bson::Boolean(value))
    }

    #[inline]
    fn serialize_i8(self, value: i8) -> EncoderResult<Bson> {
        self.serialize_i32(i32::from(value))
    }

    #[inline]
    fn serialize_i16(self, value: i16) -> EncoderResult<Bson> {
        self.serialize_i32(i32::from(value))
    }

    #[inline]
    fn serialize_i32(self, value: i32) -> EncoderResult<Bson> {
        Ok(Bson::I32(value))
    }

    #[inline]
    fn serialize_i64(self, value: i64) -> EncoderResult<Bson> {
        Ok(Bson::I64(value))
    }

    #[inline]
    fn serialize_u8(self, value: u8) -> EncoderResult<Bson> {
        self.serialize_i32(i32::from(value))
    }

    #[inline]
    fn serialize_u16(self, value: u16) -> EncoderResult<Bson> {
        self.serialize_i32(i32::from(value))
    }

    #[inline]
    fn serialize_u32(self, value: u32) -> EncoderResult<Bson> {
        if value <= i32::max_value() as u32 {
            Ok(Bson::I32(value as i32))
        } else {
            Ok(Bson::I64(i64::from(value)))
        }
    }

    #[inline]
    fn serialize_u64(self, value: u64) -> EncoderResult<Bson> {
        if value <= i64::max_value() as u64 {
            Ok(Bson::I64(value as i64))
        } else {
            Err(EncoderError::UnsupportedUnsignedInteger(value))
        }
    }

    #[inline]
    fn serialize_f32(self, value: f32) -> EncoderResult<Bson> {
        self.serialize_f64(f64::from(value))
    }

    #[inline]
    fn serialize_f64(self, value: f64) -> EncoderResult<Bson> {
        Ok(Bson::FloatingPoint(value))
    }

    #[inline]
    fn serialize_char(self, value: char) -> EncoderResult<Bson> {
        let mut s = String::new();
        s.push(value);
        self.serialize_str(&s)
    }

    #[inline]
    fn serialize_str(self, value: &str) -> EncoderResult<Bson> {
        Ok(Bson::String(value.to_owned()))
    }

    #[inline]
    fn serialize_bytes(self, value: &[u8]) -> EncoderResult<Bson> {
        Ok(Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: value.to_vec(),
        }))
    }

    #[inline]
    fn serialize_none(self) -> EncoderResult<Bson> {
        self.serialize_unit()
    }

    #[inline]
    fn serialize_some<T: ?Sized>(self, value: &T) -> EncoderResult<Bson>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    #[inline]
    fn serialize_unit(self) -> EncoderResult<Bson> {
        Ok(Bson::Null)
    }

    #[inline]
    fn serialize_unit_struct(self, _name: &'static str) -> EncoderResult<Bson> {
        self.serialize_unit()
    }

    #[inline]
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> EncoderResult<Bson> {
        Ok(Bson::String(variant.to_owned()))
    }

    #[inline]
    fn serialize_newtype_struct<T: ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> EncoderResult<Bson>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    #[inline]
    fn serialize_newtype_variant<T: ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> EncoderResult<Bson>
    where
        T: Serialize,
    {
        let mut doc = Document::new();
        doc.insert(variant, to_bson(value)?);
        Ok(Bson::Document(doc))
    }

    #[inline]
    fn serialize_seq(self, len: Option<usize>) -> EncoderResult<ArrayEncoder> {
        Ok(ArrayEncoder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    #[inline]
    fn serialize_tuple(self, len: usize) -> EncoderResult<ArrayEncoder> {
        self.serialize_seq(Some(len))
    }

    #[inline]
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> EncoderResult<ArrayEncoder> {
        self.serialize_seq(Some(len))
    }

    #[inline]
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> EncoderResult<TupleVariantEncoder> {
        Ok(TupleVariantEncoder {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    #[inline]
    fn serialize_map(self, _len: Option<usize>) -> EncoderResult<MapEncoder> {
        Ok(MapEncoder {
            doc: Document::new(),
            next_key: None,
        })
    }

    #[inline]
    fn serialize_struct(self, _name: &'static str, _len: usize) -> EncoderResult<StructEncoder> {
        Ok(StructEncoder {
            doc: Document::new(),
        })
    }

    #[inline]
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> EncoderResult<StructVariantEncoder> {
        Ok(StructVariantEncoder {
            variant,
            doc: Document::new(),
        })
    }
}

pub struct ArrayEncoder {
    items: Vec<Bson>,
}

impl SerializeSeq for ArrayEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        self.items.push(to_bson(value)?);
        Ok(())
    }

    fn end(self) -> EncoderResult<Bson> {
        Ok(Bson::Array(self.items))
    }
}

impl SerializeTuple for ArrayEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> EncoderResult<Bson> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for ArrayEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> EncoderResult<Bson> {
        SerializeSeq::end(self)
    }
}

pub struct TupleVariantEncoder {
    variant: &'static str,
    items: Vec<Bson>,
}

impl SerializeTupleVariant for TupleVariantEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        self.items.push(to_bson(value)?);
        Ok(())
    }

    fn end(self) -> EncoderResult<Bson> {
        let mut doc = Document::new();
        doc.insert(self.variant, Bson::Array(self.items));
        Ok(Bson::Document(doc))
    }
}

pub struct MapEncoder {
    doc: Document,
    next_key: Option<String>,
}

impl SerializeMap for MapEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_key<T: ?Sized>(&mut self, key: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        match to_bson(key)? {
            Bson::String(key) => {
                self.next_key = Some(key);
                Ok(())
            }
            other => Err(EncoderError::InvalidMapKeyType(other)),
        }
    }

    fn serialize_value<T: ?Sized>(&mut self, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| EncoderError::Unknown("map value serialized before its key".into()))?;
        self.doc.insert(key, to_bson(value)?);
        Ok(())
    }

    fn end(self) -> EncoderResult<Bson> {
        Ok(Bson::from_extended_document(self.doc))
    }
}

pub struct StructEncoder {
    doc: Document,
}

impl SerializeStruct for StructEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        self.doc.insert(key, to_bson(value)?);
        Ok(())
    }

    fn end(self) -> EncoderResult<Bson> {
        Ok(Bson::from_extended_document(self.doc))
    }
}

pub struct StructVariantEncoder {
    variant: &'static str,
    doc: Document,
}

impl SerializeStructVariant for StructVariantEncoder {
    type Ok = Bson;
    type Error = EncoderError;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> EncoderResult<()>
    where
        T: Serialize,
    {
        self.doc.insert(key, to_bson(value)?);
        Ok(())
    }

    fn end(self) -> EncoderResult<Bson> {
        let mut doc = Document::new();
        doc.insert(self.variant, Bson::Document(self.doc));
        Ok(Bson::Document(doc))
    }
}
