//! RFC 4122 UUID value type.
//!
//! This crate provides [`Uuid`], an immutable 16-byte identifier, together with:
//! - Parsing from the hyphenated, braced, `urn:uuid:` and clean (32 hex digit) text forms.
//! - Rendering to the canonical lowercase hyphenated form and the clean form.
//! - Version 3 (MD5), version 4 (random) and version 5 (SHA-1) generation.
//! - Version and variant accessors.
//! - Serde support behind the default `serde` feature.
//!
//! ## Canonical text form
//! - Length: 36
//! - Layout: `8-4-4-4-12` lowercase hex digit groups
//! - Example: `6ba7b810-9dad-11d1-80b4-00c04fd430c8`
//!
//! ## Variant bits
//! Every generator in this crate stamps byte 8 with the [`Variant::Rfc4122`] marker (`0x40`,
//! with bit 7 cleared) and byte 6 with the version number. [`Uuid::variant`] classifies byte 8 by
//! testing the NCS, RFC 4122 and Microsoft markers in that order.
//!
//! ## Namespaces
//! [`NAMESPACE_DNS`], [`NAMESPACE_URL`], [`NAMESPACE_OID`] and [`NAMESPACE_X500`] are the
//! well-known name spaces for [`Uuid::new_v3`] and [`Uuid::new_v5`]. They are constants and
//! cannot be modified.
//!
//! ```
//! use ruid_uuid::{Uuid, Variant, NAMESPACE_DNS};
//!
//! let id = Uuid::new_v5(&NAMESPACE_DNS, b"example.org");
//! assert_eq!(id.version(), 5);
//! assert_eq!(id.variant(), Variant::Rfc4122);
//! assert_eq!(Uuid::parse_hex(&id.to_string()).unwrap(), id);
//! ```

mod generate;
mod parse;
#[cfg(feature = "serde")]
mod serialization;
mod value;

pub use value::{
    Uuid, Variant, CLEAN_LEN, HYPHENATED_LEN, NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL,
    NAMESPACE_X500, UUID_LEN,
};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Wrong byte or character count for the requested conversion
    #[error("invalid UUID length: expected {expected}, got {actual}")]
    Length { expected: usize, actual: usize },
    /// Text did not match the grammar or contained non-hex characters
    #[error("invalid UUID string: '{0}'")]
    Format(String),
    /// The random source failed during generation
    #[error("random source failed: {0}")]
    Source(#[from] rand::Error),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
