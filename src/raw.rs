//! Raw unprocessed BSON elements.

use serde::de::{self, Deserialize, DeserializeOwned, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::bson::Bson;
use crate::decoder::{self, from_bson, DecoderResult};
use crate::encoder;
use crate::spec::ELEMENT_TYPE_EMBEDDED_DOCUMENT;

/// An encoded element kept in its wire form.
///
/// `kind` is the element kind as defined by the BSON specification and
/// `data` the raw payload for that kind. A kind of 0x00 stands for a whole
/// document. Raw values pass through the encoder verbatim and can be decoded
/// lazily with [`Raw::unmarshal`], so parts of a document can be deserialized
/// only when (and into whatever type) they are actually needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    pub kind: u8,
    pub data: Vec<u8>,
}

impl Raw {
    pub fn new(kind: u8, data: Vec<u8>) -> Raw {
        Raw { kind, data }
    }

    /// Decode the captured element into the requested type.
    ///
    /// Returns `DecoderError::IncompatibleType` when the element kind has no
    /// sensible conversion into the target.
    pub fn unmarshal<T>(&self) -> DecoderResult<T>
    where
        T: DeserializeOwned,
    {
        let kind = if self.kind == 0x00 {
            ELEMENT_TYPE_EMBEDDED_DOCUMENT
        } else {
            self.kind
        };
        let mut reader = &self.data[..];
        let value = decoder::read_bson(&mut reader, kind)?;
        from_bson(value)
    }
}

impl Serialize for Raw {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::Raw(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Raw {
    /// Captures any decoded value in its encoded form.
    fn deserialize<D>(deserializer: D) -> Result<Raw, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::Raw(raw) => Ok(raw),
            value => {
                let kind = value.element_type() as u8;
                let data = encoder::value_bytes(&value)
                    .map_err(|err| de::Error::custom(err.to_string()))?;
                Ok(Raw { kind, data })
            }
        }
    }
}
