use std::{error, fmt, string};

use serde::de::{self, Expected, Unexpected};

use crate::bson::Bson;

/// Possible errors that can arise during decoding.
#[derive(Debug)]
pub enum DecoderError {
    /// The end of the BSON input was reached too soon.
    EndOfStream,

    /// A `std::string::FromUtf8Error` encountered while decoding a UTF-8
    /// string from the input data.
    FromUtf8Error(string::FromUtf8Error),

    /// An unknown or deprecated element type was encountered.
    UnrecognizedElementType(u8),

    /// A document or array length prefix that is too small to be real or
    /// larger than the remaining input.
    InvalidDocumentLength {
        /// The length the prefix declared.
        length: i64,

        /// How many bytes were actually available, including the prefix.
        available: usize,
    },

    /// Returned when an index into an array was expected, but something else
    /// was found. BSON arrays are stored as documents with ascending numeric
    /// keys.
    InvalidArrayKey {
        /// The index the key was expected to correspond to.
        expected_key: usize,

        /// The key that was encountered in the input data.
        actual_key: String,
    },

    /// A datetime element whose millisecond value cannot be represented.
    InvalidTimestamp(i64),

    /// There was an error with the syntactical structure of the BSON.
    SyntaxError { message: String },

    /// A BSON value had no sensible conversion into the requested target
    /// type.
    IncompatibleType {
        /// Description of the requested target.
        expected: String,

        /// Description of the value that was found.
        actual: String,
    },

    /// A general error raised during deserialization.
    Unknown(String),
}

impl DecoderError {
    // The typed mismatch between a BSON element and a decode target.
    pub(crate) fn incompatible(expected: &str, value: &Bson) -> DecoderError {
        DecoderError::IncompatibleType {
            expected: expected.to_owned(),
            actual: format!("{:?}", value.element_type()),
        }
    }
}

impl From<string::FromUtf8Error> for DecoderError {
    fn from(err: string::FromUtf8Error) -> DecoderError {
        DecoderError::FromUtf8Error(err)
    }
}

impl fmt::Display for DecoderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecoderError::EndOfStream => fmt.write_str("end of stream"),
            DecoderError::FromUtf8Error(ref inner) => inner.fmt(fmt),
            DecoderError::UnrecognizedElementType(tag) => {
                write!(fmt, "unrecognized element type `0x{:02x}`", tag)
            }
            DecoderError::InvalidDocumentLength { length, available } => write!(
                fmt,
                "invalid document length {} with {} bytes available",
                length, available
            ),
            DecoderError::InvalidArrayKey {
                expected_key,
                ref actual_key,
            } => write!(
                fmt,
                "invalid array key: expected `{}`, got `{}`",
                expected_key, actual_key
            ),
            DecoderError::InvalidTimestamp(millis) => {
                write!(fmt, "datetime out of range: {} ms", millis)
            }
            DecoderError::SyntaxError { ref message } => message.fmt(fmt),
            DecoderError::IncompatibleType {
                ref expected,
                ref actual,
            } => write!(
                fmt,
                "BSON {} isn't compatible with {}",
                actual, expected
            ),
            DecoderError::Unknown(ref message) => message.fmt(fmt),
        }
    }
}

impl error::Error for DecoderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            DecoderError::FromUtf8Error(ref inner) => Some(inner),
            _ => None,
        }
    }
}

impl de::Error for DecoderError {
    fn custom<T: fmt::Display>(msg: T) -> DecoderError {
        DecoderError::Unknown(msg.to_string())
    }

    fn invalid_type(unexp: Unexpected, exp: &dyn Expected) -> DecoderError {
        DecoderError::IncompatibleType {
            expected: exp.to_string(),
            actual: unexp.to_string(),
        }
    }
}

/// Alias for `Result<T, DecoderError>`.
pub type DecoderResult<T> = Result<T, DecoderError>;
