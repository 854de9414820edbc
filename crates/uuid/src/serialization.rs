//! Serde support.
//!
//! A [`Uuid`] serializes as its 36-character lowercase hyphenated string and deserializes through
//! [`Uuid::parse_hyphenated`]. Braced, URN and clean forms are rejected on the way in, as is a
//! third group whose first digit is outside `1`–`5`.

use crate::Uuid;

impl serde::Serialize for Uuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Uuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uuid::parse_hyphenated(&s).map_err(serde::de::Error::custom)
    }
}
