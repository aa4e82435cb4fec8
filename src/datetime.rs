//! UTC datetime values with BSON wire semantics.

use std::fmt;
use std::ops::{Deref, DerefMut};

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::bson::Bson;
use crate::decoder::unexpected;

/// A UTC datetime that serializes to and deserializes from the BSON datetime
/// element (kind 0x09) rather than a formatted string.
///
/// BSON datetimes have millisecond precision; sub-millisecond components are
/// dropped on the wire. Use [`UtcDateTime::now`] when a value has to survive
/// a round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(pub DateTime<Utc>);

impl UtcDateTime {
    /// The current time, truncated to millisecond precision ahead of time so
    /// that encoding and decoding the value gives back exactly the same
    /// datetime.
    pub fn now() -> UtcDateTime {
        let millis = Utc::now().timestamp_millis();
        UtcDateTime(
            Utc.timestamp_millis_opt(millis)
                .single()
                .expect("current time is out of range"),
        )
    }
}

impl Deref for UtcDateTime {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl DerefMut for UtcDateTime {
    fn deref_mut(&mut self) -> &mut DateTime<Utc> {
        &mut self.0
    }
}

impl fmt::Display for UtcDateTime {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(fmt)
    }
}

impl From<DateTime<Utc>> for UtcDateTime {
    fn from(datetime: DateTime<Utc>) -> UtcDateTime {
        UtcDateTime(datetime)
    }
}

impl From<UtcDateTime> for DateTime<Utc> {
    fn from(datetime: UtcDateTime) -> DateTime<Utc> {
        datetime.0
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Bson::UtcDatetime(self.0).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<UtcDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::UtcDatetime(datetime) => Ok(UtcDateTime(datetime)),
            bson => Err(de::Error::invalid_type(
                unexpected(&bson),
                &"a UTC datetime",
            )),
        }
    }
}
