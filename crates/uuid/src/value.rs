//! The 16-byte UUID value and its accessors.
//!
//! A [`Uuid`] is exactly sixteen bytes laid out as described in RFC 4122:
//!
//! | Field                       | Bytes |
//! |-----------------------------|-------|
//! | `time_low`                  | 0–3   |
//! | `time_mid`                  | 4–5   |
//! | `time_hi_and_version`       | 6–7   |
//! | `clock_seq_hi_and_reserved` | 8     |
//! | `clock_seq_low` + `node`    | 9–15  |
//!
//! Values are `Copy` and immutable once constructed. Equality is byte-for-byte; no ordering is
//! defined.

use crate::{UuidError, UuidResult};
use std::fmt;

/// Length of a UUID in bytes.
pub const UUID_LEN: usize = 16;

/// Length of the hyphenated string form (32 hex digits plus four hyphens).
pub const HYPHENATED_LEN: usize = UUID_LEN * 2 + 4;

/// Length of the clean string form (32 hex digits).
pub const CLEAN_LEN: usize = UUID_LEN * 2;

/// Name space for fully-qualified domain names.
pub const NAMESPACE_DNS: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// Name space for URLs.
pub const NAMESPACE_URL: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// Name space for ISO object identifiers.
pub const NAMESPACE_OID: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// Name space for X.500 distinguished names.
pub const NAMESPACE_X500: Uuid = Uuid::from_bytes([
    0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8,
]);

/// The reserved variant families, identified by the top bits of byte 8.
///
/// The discriminant of each variant is its marker bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Variant {
    /// Reserved for NCS backward compatibility.
    Ncs = 0x80,
    /// The layout produced by every generator in this crate.
    Rfc4122 = 0x40,
    /// Reserved for Microsoft backward compatibility.
    Microsoft = 0x20,
    /// Reserved for future definition.
    Future = 0x00,
}

impl Variant {
    /// Returns the marker bits OR-ed into byte 8 for this variant.
    pub const fn marker(self) -> u8 {
        self as u8
    }

    /// Classifies a `clock_seq_hi_and_reserved` byte.
    ///
    /// The masks overlap, so the tests run in a fixed order (NCS, then RFC 4122, then Microsoft)
    /// and the first match wins.
    pub const fn from_byte(byte: u8) -> Self {
        if byte & Variant::Ncs.marker() == Variant::Ncs.marker() {
            Variant::Ncs
        } else if byte & Variant::Rfc4122.marker() == Variant::Rfc4122.marker() {
            Variant::Rfc4122
        } else if byte & Variant::Microsoft.marker() == Variant::Microsoft.marker() {
            Variant::Microsoft
        } else {
            Variant::Future
        }
    }
}

/// An RFC 4122 universally unique identifier.
///
/// # Construction
/// - [`Uuid::from_bytes`] / [`Uuid::from_slice`] copy raw bytes verbatim. Any 16-byte blob is a
///   valid value; version and variant are not checked.
/// - [`Uuid::parse_hex`], [`Uuid::parse_hyphenated`] and [`Uuid::parse_clean`] parse text.
/// - [`Uuid::new_v3`], [`Uuid::new_v4`] and [`Uuid::new_v5`] generate new values.
///
/// # Display format
/// `Display` renders the canonical lowercase hyphenated form,
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`. Use [`Uuid::clean_string`] for the 32-digit form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uuid([u8; UUID_LEN]);

impl Uuid {
    /// The all-zero null sentinel.
    pub const NIL: Uuid = Uuid([0; UUID_LEN]);

    /// Creates a UUID from an owned 16-byte array.
    pub const fn from_bytes(bytes: [u8; UUID_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates a UUID from a byte slice, which must be exactly 16 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Length`] if `bytes` is not 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> UuidResult<Self> {
        let array: [u8; UUID_LEN] = bytes.try_into().map_err(|_| UuidError::Length {
            expected: UUID_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Returns the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; UUID_LEN] {
        &self.0
    }

    /// Consumes the value and returns the raw bytes.
    pub const fn into_bytes(self) -> [u8; UUID_LEN] {
        self.0
    }

    /// Returns the variant, which determines the internal layout of the UUID.
    pub const fn variant(&self) -> Variant {
        Variant::from_byte(self.0[8])
    }

    /// Returns the version number of the algorithm used to generate this UUID.
    ///
    /// This is the top nibble of byte 6 and is not checked against the known versions.
    pub const fn version(&self) -> u32 {
        (self.0[6] >> 4) as u32
    }

    /// Returns true if every byte is zero.
    pub const fn is_null(&self) -> bool {
        u128::from_be_bytes(self.0) == 0
    }

    /// Returns the 32 lowercase hex digits without separators.
    pub fn clean_string(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = [0u8; CLEAN_LEN];
        hex::encode_to_slice(self.0, &mut digits).map_err(|_| fmt::Error)?;

        let mut buf = [b'-'; HYPHENATED_LEN];
        buf[0..8].copy_from_slice(&digits[0..8]);
        buf[9..13].copy_from_slice(&digits[8..12]);
        buf[14..18].copy_from_slice(&digits[12..16]);
        buf[19..23].copy_from_slice(&digits[16..20]);
        buf[24..36].copy_from_slice(&digits[20..32]);

        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid(\"{}\")", self)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; UUID_LEN]> for Uuid {
    fn from(bytes: [u8; UUID_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Uuid> for [u8; UUID_LEN] {
    fn from(uuid: Uuid) -> Self {
        uuid.0
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = UuidError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Uuid::from_slice(bytes)
    }
}

impl From<::uuid::Uuid> for Uuid {
    fn from(uuid: ::uuid::Uuid) -> Self {
        Self(uuid.into_bytes())
    }
}

impl From<Uuid> for ::uuid::Uuid {
    fn from(uuid: Uuid) -> Self {
        ::uuid::Uuid::from_bytes(uuid.0)
    }
}
