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

//! BSON, short for Binary JSON, is a binary-encoded serialization of
//! JSON-like documents. Like JSON, BSON supports the embedding of documents
//! and arrays within other documents and arrays, and it contains extensions
//! for types that have no JSON equivalent, such as datetimes, binary data and
//! object ids.
//!
//! ```text
//! // JSON equivalent
//! {"hello": "world"}
//!
//! // BSON encoding
//! \x16\x00\x00\x00                   // total document size
//! \x02                               // 0x02 = type String
//! hello\x00                          // field name
//! \x06\x00\x00\x00world\x00          // field value
//! \x00                               // 0x00 = type EOO ('end of object')
//! ```
//!
//! For more information about the format itself, see
//! [bsonspec.org](http://bsonspec.org).
//!
//! ## Working with documents
//!
//! Dynamic values are modeled by the [`Bson`](enum.Bson.html) enum, and
//! documents by the insertion-ordered [`Document`](type.Document.html) map.
//! Both can be built with the [`bson!`](macro.bson.html) and
//! [`doc!`](macro.doc.html) macros and encoded to or decoded from bytes:
//!
//! ```rust
//! use bsonic::{decode_document, encode_document, doc};
//!
//! let doc = doc! {
//!     "hello": "world",
//!     "int": 5,
//!     "subdoc": { "cat": true },
//! };
//!
//! let mut buf = Vec::new();
//! encode_document(&mut buf, &doc).unwrap();
//!
//! let decoded = decode_document(&buf).unwrap();
//! assert_eq!(decoded, doc);
//! ```
//!
//! Unlike maps, document order is preserved end to end; when element order
//! matters (indexes, command documents), build a `Document` directly instead
//! of going through a `HashMap`.
//!
//! ## Strongly typed data
//!
//! Any type implementing [`serde::Serialize`] and [`serde::Deserialize`] maps
//! to and from BSON documents via [`to_vec`](fn.to_vec.html) and
//! [`from_slice`](fn.from_slice.html) (or [`to_bson`](fn.to_bson.html) /
//! [`from_bson`](fn.from_bson.html) for the value tree). This is also the
//! customization point: a type that wants to be represented differently on
//! the wire implements the serde traits by hand and (de)serializes as
//! whatever value it chooses.
//!
//! Decoding is deliberately lenient, following what MongoDB drivers do in
//! practice: when an element's kind has a sensible conversion into the
//! target field (int widths, floats to ints, numbers to strings), the value
//! is converted; when it has none, nested targets are left at their zero
//! value rather than failing the whole document.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let bytes = bsonic::to_vec(&Person {
//!     name: "Ada".to_owned(),
//!     age: 36,
//! })
//! .unwrap();
//!
//! let person: Person = bsonic::from_slice(&bytes).unwrap();
//! assert_eq!(person.name, "Ada");
//! ```
//!
//! ## Object ids
//!
//! [`oid::ObjectId`](oid/struct.ObjectId.html) implements the classic
//! 12-byte Mongo object id: unix seconds, an md5-derived machine
//! fingerprint, the process id, and a process-wide counter.

#[macro_use]
mod macros;
pub mod bson;
pub mod datetime;
pub mod decoder;
pub mod encoder;
pub mod oid;
pub mod ordered;
pub mod raw;
pub mod serde_helpers;
pub mod spec;

pub use crate::bson::{
    Array,
    Binary,
    Bson,
    Document,
    JavaScript,
    MongoTimestamp,
    OrderKey,
    RegExp,
    Symbol,
};
pub use crate::datetime::UtcDateTime;
pub use crate::decoder::{
    decode_document,
    from_bson,
    from_slice,
    Decoder,
    DecoderError,
    DecoderResult,
};
pub use crate::encoder::{encode_document, to_bson, to_vec, Encoder, EncoderError, EncoderResult};
pub use crate::ordered::{OrderedDocument, ValueAccessError, ValueAccessResult};
pub use crate::raw::Raw;
