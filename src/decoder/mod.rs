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

//! Decoder

mod error;
mod serde;

pub use self::error::{DecoderError, DecoderResult};
pub use self::serde::Decoder;

pub(crate) use self::serde::unexpected;

use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{TimeZone, Utc};

use crate::bson::{Array, Bson, Document, RegExp};
use crate::oid;
use crate::spec::{self, BinarySubtype};

use ::serde::de::{Deserialize, DeserializeOwned};

const MIN_BSON_DOCUMENT_SIZE: i32 = 4 + 1;
// i32 total + string (i32 len + "" + NUL) + empty document
const MIN_CODE_WITH_SCOPE_SIZE: i32 = 4 + 5 + MIN_BSON_DOCUMENT_SIZE;

#[inline]
fn read_u8(reader: &mut &[u8]) -> DecoderResult<u8> {
    reader.read_u8().map_err(|_| DecoderError::EndOfStream)
}

#[inline]
fn read_i32(reader: &mut &[u8]) -> DecoderResult<i32> {
    reader
        .read_i32::<LittleEndian>()
        .map_err(|_| DecoderError::EndOfStream)
}

#[inline]
fn read_i64(reader: &mut &[u8]) -> DecoderResult<i64> {
    reader
        .read_i64::<LittleEndian>()
        .map_err(|_| DecoderError::EndOfStream)
}

#[inline]
fn read_f64(reader: &mut &[u8]) -> DecoderResult<f64> {
    reader
        .read_f64::<LittleEndian>()
        .map_err(|_| DecoderError::EndOfStream)
}

fn read_bytes(reader: &mut &[u8], len: usize) -> DecoderResult<Vec<u8>> {
    let buf = *reader;
    if buf.len() < len {
        return Err(DecoderError::EndOfStream);
    }
    let (bytes, rest) = buf.split_at(len);
    *reader = rest;
    Ok(bytes.to_vec())
}

fn read_cstring(reader: &mut &[u8]) -> DecoderResult<String> {
    let buf = *reader;
    let pos = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecoderError::EndOfStream)?;
    let (bytes, rest) = buf.split_at(pos);
    let s = String::from_utf8(bytes.to_vec())?;
    *reader = &rest[1..];
    Ok(s)
}

fn read_string(reader: &mut &[u8]) -> DecoderResult<String> {
    let len = read_i32(reader)?;
    if len < 1 {
        return Err(DecoderError::SyntaxError {
            message: format!("invalid string length {}", len),
        });
    }

    let mut bytes = read_bytes(reader, len as usize)?;
    if bytes.pop() != Some(0) {
        return Err(DecoderError::SyntaxError {
            message: "string not terminated with NUL".to_owned(),
        });
    }
    String::from_utf8(bytes).map_err(From::from)
}

// Checks a document-style length prefix against the remaining input and
// splits off exactly the declared body, so a corrupt inner length can never
// run past the enclosing structure.
fn read_sized_body<'a>(reader: &mut &'a [u8], minimum: i32) -> DecoderResult<&'a [u8]> {
    let length = read_i32(reader)?;
    let buf = *reader;
    if length < minimum || (length as usize - 4) > buf.len() {
        return Err(DecoderError::InvalidDocumentLength {
            length: i64::from(length),
            available: buf.len() + 4,
        });
    }
    let (body, rest) = buf.split_at(length as usize - 4);
    *reader = rest;
    Ok(body)
}

/// Attempt to decode a `Document` from a byte slice.
pub fn decode_document(data: &[u8]) -> DecoderResult<Document> {
    let mut reader = data;
    read_document(&mut reader)
}

fn read_document(reader: &mut &[u8]) -> DecoderResult<Document> {
    let mut body = read_sized_body(reader, MIN_BSON_DOCUMENT_SIZE)?;
    let mut doc = Document::new();

    loop {
        let tag = read_u8(&mut body)?;
        if tag == 0 {
            break;
        }

        let key = read_cstring(&mut body)?;
        let val = read_bson(&mut body, tag)?;

        doc.insert(key, val);
    }

    if !body.is_empty() {
        return Err(DecoderError::SyntaxError {
            message: "trailing bytes after document terminator".to_owned(),
        });
    }

    Ok(doc)
}

fn read_array(reader: &mut &[u8]) -> DecoderResult<Array> {
    let mut body = read_sized_body(reader, MIN_BSON_DOCUMENT_SIZE)?;
    let mut arr = Array::new();

    loop {
        let tag = read_u8(&mut body)?;
        if tag == 0 {
            break;
        }

        // check that the key is as expected
        let key = read_cstring(&mut body)?;
        match key.parse::<usize>() {
            Ok(idx) if idx == arr.len() => {}
            _ => {
                return Err(DecoderError::InvalidArrayKey {
                    expected_key: arr.len(),
                    actual_key: key,
                });
            }
        }

        let val = read_bson(&mut body, tag)?;
        arr.push(val)
    }

    if !body.is_empty() {
        return Err(DecoderError::SyntaxError {
            message: "trailing bytes after array terminator".to_owned(),
        });
    }

    Ok(arr)
}

pub(crate) fn read_bson(reader: &mut &[u8], tag: u8) -> DecoderResult<Bson> {
    use crate::spec::ElementType::*;

    match spec::ElementType::from(tag) {
        Some(FloatingPoint) => read_f64(reader).map(Bson::FloatingPoint),
        Some(Utf8String) => read_string(reader).map(Bson::String),
        Some(EmbeddedDocument) => read_document(reader).map(Bson::Document),
        Some(Array) => read_array(reader).map(Bson::Array),
        Some(Binary) => {
            let len = read_i32(reader)?;
            if len < 0 {
                return Err(DecoderError::SyntaxError {
                    message: format!("invalid binary length {}", len),
                });
            }
            let subtype = BinarySubtype::from(read_u8(reader)?);

            // Subtype 0x02 repeats the payload length; it is read but, like
            // the original obsolete writers, not verified.
            let bytes = if let BinarySubtype::BinaryOld = subtype {
                if len < 4 {
                    return Err(DecoderError::SyntaxError {
                        message: format!("invalid old binary length {}", len),
                    });
                }
                read_i32(reader)?;
                read_bytes(reader, len as usize - 4)?
            } else {
                read_bytes(reader, len as usize)?
            };

            Ok(Bson::Binary(crate::bson::Binary { subtype, bytes }))
        }
        Some(ObjectId) => {
            let bytes = read_bytes(reader, 12)?;
            let mut buf = [0u8; 12];
            buf.copy_from_slice(&bytes);
            Ok(Bson::ObjectId(oid::ObjectId::with_bytes(buf)))
        }
        Some(Boolean) => Ok(Bson::Boolean(read_u8(reader)? != 0)),
        Some(NullValue) => Ok(Bson::Null),
        Some(RegularExpression) => {
            let pattern = read_cstring(reader)?;
            let options = read_cstring(reader)?;
            Ok(Bson::RegExp(RegExp { pattern, options }))
        }
        Some(JavaScriptCode) => read_string(reader).map(Bson::JavaScriptCode),
        Some(JavaScriptCodeWithScope) => {
            let mut body = read_sized_body(reader, MIN_CODE_WITH_SCOPE_SIZE)?;
            let code = read_string(&mut body)?;
            let scope = read_document(&mut body)?;
            if !body.is_empty() {
                return Err(DecoderError::SyntaxError {
                    message: "trailing bytes after code-with-scope scope".to_owned(),
                });
            }
            Ok(Bson::JavaScriptCodeWithScope(code, scope))
        }
        Some(Integer32Bit) => read_i32(reader).map(Bson::I32),
        Some(Integer64Bit) => read_i64(reader).map(Bson::I64),
        Some(MongoTimestamp) => read_i64(reader)
            .map(|v| Bson::MongoTimestamp(crate::bson::MongoTimestamp(v))),
        Some(UtcDatetime) => {
            let millis = read_i64(reader)?;
            match Utc.timestamp_millis_opt(millis).single() {
                Some(datetime) => Ok(Bson::UtcDatetime(datetime)),
                None => Err(DecoderError::InvalidTimestamp(millis)),
            }
        }
        Some(Symbol) => read_string(reader).map(|s| Bson::Symbol(crate::bson::Symbol(s))),
        Some(Undefined) => Ok(Bson::Undefined),
        Some(MaxKey) => Ok(Bson::MaxKey),
        Some(MinKey) => Ok(Bson::MinKey),
        None => Err(DecoderError::UnrecognizedElementType(tag)),
    }
}

/// Decode a BSON `Value` into a `T` Deserializable.
pub fn from_bson<'de, T>(bson: Bson) -> DecoderResult<T>
where
    T: Deserialize<'de>,
{
    let de = Decoder::new(bson);
    Deserialize::deserialize(de)
}

/// Decode a standalone BSON document into a `T` Deserializable.
pub fn from_slice<T>(data: &[u8]) -> DecoderResult<T>
where
    T: DeserializeOwned,
{
    let doc = decode_document(data)?;
    from_bson(Bson::Document(doc))
}
