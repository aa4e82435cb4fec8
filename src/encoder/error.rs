use std::{error, fmt, io};

use serde::ser;

use crate::bson::Bson;

/// Possible errors that can arise during encoding.
#[derive(Debug)]
pub enum EncoderError {
    /// A `std::io::Error` encountered while writing the output.
    IoError(io::Error),

    /// A key of a map serialized to something other than a string.
    InvalidMapKeyType(Bson),

    /// The top-level value handed to `to_vec` did not serialize to a
    /// document (or to a raw document splice).
    InvalidDocumentRoot(Bson),

    /// An unsigned integer that does not fit in any BSON integer type.
    UnsupportedUnsignedInteger(u64),

    /// A general error raised during serialization.
    Unknown(String),
}

impl From<io::Error> for EncoderError {
    fn from(err: io::Error) -> EncoderError {
        EncoderError::IoError(err)
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EncoderError::IoError(ref inner) => inner.fmt(fmt),
            EncoderError::InvalidMapKeyType(ref bson) => {
                write!(fmt, "invalid map key type: {}", bson)
            }
            EncoderError::InvalidDocumentRoot(ref bson) => {
                write!(fmt, "can't encode {} as a top-level document", bson)
            }
            EncoderError::UnsupportedUnsignedInteger(v) => write!(
                fmt,
                "BSON has no u64 type, and {} is too large to fit in an i64",
                v
            ),
            EncoderError::Unknown(ref message) => message.fmt(fmt),
        }
    }
}

impl error::Error for EncoderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            EncoderError::IoError(ref inner) => Some(inner),
            _ => None,
        }
    }
}

impl ser::Error for EncoderError {
    fn custom<T: fmt::Display>(msg: T) -> EncoderError {
        EncoderError::Unknown(msg.to_string())
    }
}

/// Alias for `Result<T, EncoderError>`.
pub type EncoderResult<T> = Result<T, EncoderError>;
