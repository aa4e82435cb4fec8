//! ObjectId

use std::{
    error,
    fmt,
    process,
    result,
    sync::atomic::{AtomicU32, Ordering},
    time::SystemTime,
};

use hex::FromHexError;
use lazy_static::lazy_static;
use rand::Rng;

const TIMESTAMP_OFFSET: usize = 0;
const MACHINE_ID_OFFSET: usize = 4;
const PROCESS_ID_OFFSET: usize = 7;
const COUNTER_OFFSET: usize = 9;

const MAX_U24: u32 = 0xFF_FFFF;

// Incremented before every id; only the low 24 bits reach the wire.
static OID_COUNTER: AtomicU32 = AtomicU32::new(0);

lazy_static! {
    static ref MACHINE_ID: [u8; 3] = machine_id();
    static ref PROCESS_ID: u16 = (process::id() & 0xFFFF) as u16;
}

// First three bytes of md5(hostname). Hosts without a readable hostname get a
// random fingerprint instead; it only has to be stable within the process.
fn machine_id() -> [u8; 3] {
    match hostname::get() {
        Ok(name) => {
            let digest = md5::compute(name.to_string_lossy().as_bytes());
            [digest.0[0], digest.0[1], digest.0[2]]
        }
        Err(_) => rand::thread_rng().gen(),
    }
}

/// Errors that can occur during OID construction and generation.
#[derive(Debug)]
pub enum Error {
    /// An invalid argument was passed in.
    ArgumentError { message: String },

    /// An error occurred parsing a hex string.
    FromHexError(FromHexError),
}

impl From<FromHexError> for Error {
    fn from(err: FromHexError) -> Error {
        Error::FromHexError(err)
    }
}

/// Alias for Result<T, oid::Error>.
pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ArgumentError { ref message } => message.fmt(fmt),
            Error::FromHexError(ref inner) => inner.fmt(fmt),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::ArgumentError { .. } => None,
            Error::FromHexError(ref inner) => Some(inner),
        }
    }
}

/// A wrapper around raw 12-byte ObjectId representations.
///
/// The bytes are composed of a 4-byte timestamp (seconds since the Unix
/// epoch), a 3-byte machine fingerprint (the first three bytes of the md5 of
/// the hostname), the low 2 bytes of the process id, and a 3-byte
/// incrementing counter.
///
/// While the BSON format itself is little-endian, the timestamp, process id
/// and counter values are big-endian, with the most significant bytes
/// appearing first in the byte sequence.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct ObjectId {
    id: [u8; 12],
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectId {
    /// Generates a new ObjectId, represented in bytes.
    /// See the [docs](http://docs.mongodb.org/manual/reference/object-id/)
    /// for more information.
    pub fn new() -> ObjectId {
        let timestamp = ObjectId::gen_timestamp();
        let counter = ObjectId::gen_count();

        let mut buf = [0u8; 12];
        buf[TIMESTAMP_OFFSET..MACHINE_ID_OFFSET].copy_from_slice(&timestamp.to_be_bytes());
        buf[MACHINE_ID_OFFSET..PROCESS_ID_OFFSET].copy_from_slice(&MACHINE_ID[..]);
        buf[PROCESS_ID_OFFSET..COUNTER_OFFSET].copy_from_slice(&PROCESS_ID.to_be_bytes());
        buf[COUNTER_OFFSET..].copy_from_slice(&counter);

        ObjectId::with_bytes(buf)
    }

    /// Constructs an ObjectId with only the timestamp part filled in and all
    /// remaining bytes zeroed.
    ///
    /// Ids built this way are not unique; they are meant for range queries
    /// over ids generated before or after the given point in time.
    pub fn with_timestamp(time: u32) -> ObjectId {
        let mut buf = [0u8; 12];
        buf[TIMESTAMP_OFFSET..MACHINE_ID_OFFSET].copy_from_slice(&time.to_be_bytes());
        ObjectId::with_bytes(buf)
    }

    /// Constructs a new ObjectId wrapper around the raw byte representation.
    pub fn with_bytes(bytes: [u8; 12]) -> ObjectId {
        ObjectId { id: bytes }
    }

    /// Creates an ObjectId using a 12-byte (24-char) hexadecimal string.
    pub fn with_string(s: &str) -> Result<ObjectId> {
        let bytes: Vec<u8> = hex::decode(s.as_bytes())?;
        if bytes.len() != 12 {
            Err(Error::ArgumentError {
                message: "Provided string must be a 12-byte hexadecimal string.".to_owned(),
            })
        } else {
            let mut byte_array: [u8; 12] = [0; 12];
            byte_array[..].copy_from_slice(&bytes[..]);
            Ok(ObjectId::with_bytes(byte_array))
        }
    }

    /// Returns the raw byte representation of an ObjectId.
    pub fn bytes(&self) -> [u8; 12] {
        self.id
    }

    /// Convert the ObjectId to its hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.id)
    }

    /// Retrieves the timestamp part of the id as seconds since the Unix
    /// epoch.
    pub fn timestamp(&self) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.id[TIMESTAMP_OFFSET..MACHINE_ID_OFFSET]);
        u32::from_be_bytes(buf)
    }

    /// Retrieves the 3-byte machine fingerprint part of the id.
    pub fn machine(&self) -> [u8; 3] {
        let mut buf = [0u8; 3];
        buf.copy_from_slice(&self.id[MACHINE_ID_OFFSET..PROCESS_ID_OFFSET]);
        buf
    }

    /// Retrieves the process id part of the id.
    pub fn pid(&self) -> u16 {
        let mut buf = [0u8; 2];
        buf.copy_from_slice(&self.id[PROCESS_ID_OFFSET..COUNTER_OFFSET]);
        u16::from_be_bytes(buf)
    }

    /// Retrieves the incrementing counter part of the id.
    pub fn counter(&self) -> u32 {
        let mut buf = [0u8; 4];
        buf[1..].copy_from_slice(&self.id[COUNTER_OFFSET..]);
        u32::from_be_bytes(buf)
    }

    // Current seconds since epoch, to be stored big-endian.
    fn gen_timestamp() -> u32 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("system clock is before 1970")
            .as_secs() as u32
    }

    // Increments the global counter and returns the low 24 bits, big-endian.
    fn gen_count() -> [u8; 3] {
        let count = OID_COUNTER.fetch_add(1, Ordering::SeqCst).wrapping_add(1) & MAX_U24;
        let buf = count.to_be_bytes();
        [buf[1], buf[2], buf[3]]
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}
