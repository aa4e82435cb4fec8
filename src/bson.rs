// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! BSON definition

use std::fmt::{self, Display};

use chrono::{DateTime, TimeZone, Utc};

use crate::datetime::UtcDateTime;
use crate::oid;
use crate::ordered::OrderedDocument;
use crate::raw::Raw;
use crate::spec::{BinarySubtype, ElementType};

/// Possible BSON value types.
#[derive(Debug, Clone, PartialEq)]
pub enum Bson {
    FloatingPoint(f64),
    String(String),
    Array(Array),
    Document(Document),
    Boolean(bool),
    Null,
    RegExp(RegExp),
    JavaScriptCode(String),
    JavaScriptCodeWithScope(String, Document),
    I32(i32),
    I64(i64),
    MongoTimestamp(MongoTimestamp),
    Binary(Binary),
    ObjectId(oid::ObjectId),
    UtcDatetime(DateTime<Utc>),
    Symbol(Symbol),
    MinKey,
    MaxKey,
    Undefined,
    Raw(Raw),
}

/// Alias for `Vec<Bson>`.
pub type Array = Vec<Bson>;
/// Alias for `OrderedDocument`.
pub type Document = OrderedDocument;

/// Binary data with a subtype tag.
///
/// Subtype 0x00 is plain bytes; byte slices and vectors encode as that
/// directly, so this type is mostly useful for the non-generic subtypes.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub subtype: BinarySubtype,
    pub bytes: Vec<u8>,
}

/// A regular expression pattern with matching options.
///
/// The options field should contain individual option characters (such as
/// `i`, `m`, `s`, `x`) and must be sorted; the value is not verified before
/// being put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExp {
    pub pattern: String,
    pub options: String,
}

/// JavaScript code, optionally with a scope mapping identifiers to values
/// used when evaluating the code. Code without a scope encodes as element
/// kind 0x0D, code with a scope as kind 0x0F.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaScript {
    pub code: String,
    pub scope: Option<Document>,
}

/// A string used in languages that have a distinct symbol type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub String);

/// Special internal type used by MongoDB replication and sharding, carried
/// opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MongoTimestamp(pub i64);

/// Sentinel values comparing lower respectively higher than all other BSON
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    MinKey,
    MaxKey,
}

impl Display for Bson {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Bson::FloatingPoint(f) => write!(fmt, "{}", f),
            Bson::String(ref s) => write!(fmt, "\"{}\"", s),
            Bson::Array(ref vec) => {
                fmt.write_str("[")?;

                let mut first = true;
                for bson in vec.iter() {
                    if !first {
                        fmt.write_str(", ")?;
                    }

                    write!(fmt, "{}", bson)?;
                    first = false;
                }

                fmt.write_str("]")
            }
            Bson::Document(ref doc) => write!(fmt, "{}", doc),
            Bson::Boolean(b) => write!(fmt, "{}", b),
            Bson::Null => write!(fmt, "null"),
            Bson::RegExp(ref regexp) => write!(fmt, "/{}/{}", regexp.pattern, regexp.options),
            Bson::JavaScriptCode(ref code) | Bson::JavaScriptCodeWithScope(ref code, _) => {
                fmt.write_str(code)
            }
            Bson::I32(i) => write!(fmt, "{}", i),
            Bson::I64(i) => write!(fmt, "{}", i),
            Bson::MongoTimestamp(MongoTimestamp(i)) => {
                let time = (i >> 32) as i32;
                let inc = (i & 0xFFFF_FFFF) as i32;

                write!(fmt, "Timestamp({}, {})", time, inc)
            }
            Bson::Binary(ref binary) => write!(
                fmt,
                "BinData({}, 0x{})",
                u8::from(binary.subtype),
                hex::encode(&binary.bytes)
            ),
            Bson::ObjectId(ref id) => write!(fmt, "ObjectId(\"{}\")", id),
            Bson::UtcDatetime(date_time) => write!(fmt, "Date(\"{}\")", date_time),
            Bson::Symbol(Symbol(ref sym)) => write!(fmt, "Symbol(\"{}\")", sym),
            Bson::MinKey => write!(fmt, "MinKey"),
            Bson::MaxKey => write!(fmt, "MaxKey"),
            Bson::Undefined => write!(fmt, "undefined"),
            Bson::Raw(ref raw) => write!(fmt, "Raw(0x{:02x}, {} bytes)", raw.kind, raw.data.len()),
        }
    }
}

impl From<f32> for Bson {
    fn from(a: f32) -> Bson {
        Bson::FloatingPoint(f64::from(a))
    }
}

impl From<f64> for Bson {
    fn from(a: f64) -> Bson {
        Bson::FloatingPoint(a)
    }
}

impl<'a> From<&'a str> for Bson {
    fn from(s: &str) -> Bson {
        Bson::String(s.to_owned())
    }
}

impl From<String> for Bson {
    fn from(a: String) -> Bson {
        Bson::String(a)
    }
}

impl<'a> From<&'a String> for Bson {
    fn from(a: &'a String) -> Bson {
        Bson::String(a.to_owned())
    }
}

impl From<Array> for Bson {
    fn from(a: Array) -> Bson {
        Bson::Array(a)
    }
}

impl From<Document> for Bson {
    fn from(a: Document) -> Bson {
        Bson::Document(a)
    }
}

impl From<bool> for Bson {
    fn from(a: bool) -> Bson {
        Bson::Boolean(a)
    }
}

impl From<i8> for Bson {
    fn from(a: i8) -> Bson {
        Bson::I32(i32::from(a))
    }
}

impl From<i16> for Bson {
    fn from(a: i16) -> Bson {
        Bson::I32(i32::from(a))
    }
}

impl From<i32> for Bson {
    fn from(a: i32) -> Bson {
        Bson::I32(a)
    }
}

impl From<i64> for Bson {
    fn from(a: i64) -> Bson {
        Bson::I64(a)
    }
}

impl From<u8> for Bson {
    fn from(a: u8) -> Bson {
        Bson::I32(i32::from(a))
    }
}

impl From<u16> for Bson {
    fn from(a: u16) -> Bson {
        Bson::I32(i32::from(a))
    }
}

impl From<u32> for Bson {
    fn from(a: u32) -> Bson {
        if a <= i32::max_value() as u32 {
            Bson::I32(a as i32)
        } else {
            Bson::I64(i64::from(a))
        }
    }
}

impl From<Binary> for Bson {
    fn from(a: Binary) -> Bson {
        Bson::Binary(a)
    }
}

impl From<(BinarySubtype, Vec<u8>)> for Bson {
    fn from(a: (BinarySubtype, Vec<u8>)) -> Bson {
        Bson::Binary(Binary {
            subtype: a.0,
            bytes: a.1,
        })
    }
}

impl From<Vec<u8>> for Bson {
    fn from(a: Vec<u8>) -> Bson {
        Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: a,
        })
    }
}

impl From<RegExp> for Bson {
    fn from(a: RegExp) -> Bson {
        Bson::RegExp(a)
    }
}

impl From<JavaScript> for Bson {
    fn from(a: JavaScript) -> Bson {
        match a.scope {
            Some(scope) => Bson::JavaScriptCodeWithScope(a.code, scope),
            None => Bson::JavaScriptCode(a.code),
        }
    }
}

impl From<Symbol> for Bson {
    fn from(a: Symbol) -> Bson {
        Bson::Symbol(a)
    }
}

impl From<MongoTimestamp> for Bson {
    fn from(a: MongoTimestamp) -> Bson {
        Bson::MongoTimestamp(a)
    }
}

impl From<OrderKey> for Bson {
    fn from(a: OrderKey) -> Bson {
        match a {
            OrderKey::MinKey => Bson::MinKey,
            OrderKey::MaxKey => Bson::MaxKey,
        }
    }
}

impl From<[u8; 12]> for Bson {
    fn from(a: [u8; 12]) -> Bson {
        Bson::ObjectId(oid::ObjectId::with_bytes(a))
    }
}

impl From<oid::ObjectId> for Bson {
    fn from(a: oid::ObjectId) -> Bson {
        Bson::ObjectId(a)
    }
}

impl From<DateTime<Utc>> for Bson {
    fn from(a: DateTime<Utc>) -> Bson {
        Bson::UtcDatetime(a)
    }
}

impl From<UtcDateTime> for Bson {
    fn from(a: UtcDateTime) -> Bson {
        Bson::UtcDatetime(a.0)
    }
}

impl From<Raw> for Bson {
    fn from(a: Raw) -> Bson {
        Bson::Raw(a)
    }
}

impl Bson {
    /// Get the `ElementType` of this value.
    ///
    /// For `Raw` values the type is taken from the stored kind byte; a raw
    /// kind of 0x00 stands for a whole document.
    pub fn element_type(&self) -> ElementType {
        match *self {
            Bson::FloatingPoint(..) => ElementType::FloatingPoint,
            Bson::String(..) => ElementType::Utf8String,
            Bson::Array(..) => ElementType::Array,
            Bson::Document(..) => ElementType::EmbeddedDocument,
            Bson::Boolean(..) => ElementType::Boolean,
            Bson::Null => ElementType::NullValue,
            Bson::RegExp(..) => ElementType::RegularExpression,
            Bson::JavaScriptCode(..) => ElementType::JavaScriptCode,
            Bson::JavaScriptCodeWithScope(..) => ElementType::JavaScriptCodeWithScope,
            Bson::I32(..) => ElementType::Integer32Bit,
            Bson::I64(..) => ElementType::Integer64Bit,
            Bson::MongoTimestamp(..) => ElementType::MongoTimestamp,
            Bson::Binary(..) => ElementType::Binary,
            Bson::ObjectId(..) => ElementType::ObjectId,
            Bson::UtcDatetime(..) => ElementType::UtcDatetime,
            Bson::Symbol(..) => ElementType::Symbol,
            Bson::MinKey => ElementType::MinKey,
            Bson::MaxKey => ElementType::MaxKey,
            Bson::Undefined => ElementType::Undefined,
            Bson::Raw(ref raw) => {
                ElementType::from(raw.kind).unwrap_or(ElementType::EmbeddedDocument)
            }
        }
    }

    /// Convert this value to a marker document, used to move the types the
    /// serde data model has no slot for through serialization.
    ///
    /// # Panics
    ///
    /// Panics when called on a variant that has a native serde representation
    /// (strings, numbers, booleans, arrays, documents, null).
    pub fn to_extended_document(&self) -> Document {
        match *self {
            Bson::RegExp(ref regexp) => {
                doc! {
                    "$regex": regexp.pattern.clone(),
                    "$options": regexp.options.clone(),
                }
            }
            Bson::JavaScriptCode(ref code) => {
                doc! {
                    "$code": code.clone(),
                }
            }
            Bson::JavaScriptCodeWithScope(ref code, ref scope) => {
                doc! {
                    "$code": code.clone(),
                    "$scope": scope.clone(),
                }
            }
            Bson::MongoTimestamp(MongoTimestamp(v)) => {
                doc! {
                    "$timestamp": {
                        "t": v >> 32,
                        "i": v & 0xFFFF_FFFF,
                    },
                }
            }
            Bson::Binary(ref binary) => {
                doc! {
                    "$binary": hex::encode(&binary.bytes),
                    "type": i64::from(u8::from(binary.subtype)),
                }
            }
            Bson::ObjectId(ref id) => {
                doc! {
                    "$oid": id.to_hex(),
                }
            }
            Bson::UtcDatetime(ref v) => {
                doc! {
                    "$date": {
                        "$numberLong": v.timestamp_millis(),
                    },
                }
            }
            Bson::Symbol(Symbol(ref v)) => {
                doc! {
                    "$symbol": v.clone(),
                }
            }
            Bson::MinKey => {
                doc! {
                    "$minKey": 1,
                }
            }
            Bson::MaxKey => {
                doc! {
                    "$maxKey": 1,
                }
            }
            Bson::Undefined => {
                doc! {
                    "$undefined": true,
                }
            }
            Bson::Raw(ref raw) => {
                doc! {
                    "$raw": hex::encode(&raw.data),
                    "$kind": i64::from(raw.kind),
                }
            }
            _ => panic!("Attempted conversion of invalid data type: {}", self),
        }
    }

    /// Recognize marker documents produced by `to_extended_document` and fold
    /// them back into the value they stand for. Documents that carry no
    /// marker are returned unchanged as `Bson::Document`.
    pub fn from_extended_document(values: Document) -> Bson {
        if values.len() == 2 {
            if let (Ok(pattern), Ok(options)) =
                (values.get_str("$regex"), values.get_str("$options"))
            {
                return Bson::RegExp(RegExp {
                    pattern: pattern.to_owned(),
                    options: options.to_owned(),
                });
            } else if let (Ok(code), Ok(scope)) =
                (values.get_str("$code"), values.get_document("$scope"))
            {
                return Bson::JavaScriptCodeWithScope(code.to_owned(), scope.clone());
            } else if let (Ok(hex_data), Ok(t)) =
                (values.get_str("$binary"), values.get_i64("type"))
            {
                if let Ok(bytes) = hex::decode(hex_data) {
                    return Bson::Binary(Binary {
                        subtype: BinarySubtype::from(t as u8),
                        bytes,
                    });
                }
            } else if let (Ok(hex_data), Ok(kind)) =
                (values.get_str("$raw"), values.get_i64("$kind"))
            {
                if let Ok(data) = hex::decode(hex_data) {
                    return Bson::Raw(Raw {
                        kind: kind as u8,
                        data,
                    });
                }
            }
        } else if values.len() == 1 {
            if let Ok(code) = values.get_str("$code") {
                return Bson::JavaScriptCode(code.to_owned());
            } else if let Ok(hex_id) = values.get_str("$oid") {
                if let Ok(id) = oid::ObjectId::with_string(hex_id) {
                    return Bson::ObjectId(id);
                }
            } else if let Ok(millis) = values
                .get_document("$date")
                .and_then(|inner| inner.get_i64("$numberLong"))
            {
                if let Some(datetime) = Utc.timestamp_millis_opt(millis).single() {
                    return Bson::UtcDatetime(datetime);
                }
            } else if let Ok(sym) = values.get_str("$symbol") {
                return Bson::Symbol(Symbol(sym.to_owned()));
            } else if let Ok(inner) = values.get_document("$timestamp") {
                if let (Ok(t), Ok(i)) = (inner.get_i64("t"), inner.get_i64("i")) {
                    return Bson::MongoTimestamp(MongoTimestamp((t << 32) | (i & 0xFFFF_FFFF)));
                }
            } else if values.get_i32("$minKey") == Ok(1) {
                return Bson::MinKey;
            } else if values.get_i32("$maxKey") == Ok(1) {
                return Bson::MaxKey;
            } else if values.get_bool("$undefined") == Ok(true) {
                return Bson::Undefined;
            }
        }

        Bson::Document(values)
    }
}
