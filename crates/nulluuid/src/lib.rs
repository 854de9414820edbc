//! Nullable UUID and binary cell encoding.
//!
//! A storage layer has to tell "no value" apart from "a value that happens to be all zeros", so
//! [`NullableUuid`] carries an explicit validity flag next to its [`Uuid`].
//!
//! Both types convert to and from a tagged binary cell through the [`Encode`] and [`Decode`]
//! traits:
//! - A present value is written as length `16` followed by the raw bytes.
//! - An absent value is written as length [`NULL_LEN`] (`-1`) with no payload.
//! - Any column whose type tag is not [`ColumnType::UUID`] is rejected with
//!   [`RowError::TypeMismatch`].
//!
//! ```
//! use ruid_nulluuid::{decode_cell, encode_cell, ColumnType, NullableUuid};
//! use ruid_uuid::NAMESPACE_URL;
//!
//! let cell = encode_cell(&NullableUuid::from_uuid(NAMESPACE_URL), ColumnType::UUID).unwrap();
//! let back: NullableUuid = decode_cell(ColumnType::UUID, &cell).unwrap();
//! assert_eq!(back.as_option(), Some(NAMESPACE_URL));
//! ```

mod cell;
mod nullable;

pub use cell::{
    decode_cell, encode_cell, ColumnType, Decode, Encode, FormatCode, Oid, ValueReader, WriteBuf,
    NULL_LEN,
};
pub use nullable::NullableUuid;
pub use ruid_uuid::{Uuid, UuidError};

/// Error type for cell encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// The column is not of the UUID type
    #[error("cannot convert UUID to or from column type {name} (OID {oid})")]
    TypeMismatch { name: String, oid: Oid },
    /// A NULL cell was decoded into a non-nullable UUID
    #[error("unexpected NULL for non-nullable UUID")]
    UnexpectedNull,
    /// The cell is shorter than its length prefix requires
    #[error("truncated cell: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    /// The cell continues past its declared payload
    #[error("trailing bytes in cell: expected {expected} payload bytes, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },
    /// The length prefix is negative but not the NULL marker
    #[error("invalid cell length prefix: {0}")]
    InvalidLength(i32),
    #[error(transparent)]
    Uuid(#[from] UuidError),
}

/// Result type for cell operations.
pub type RowResult<T> = Result<T, RowError>;
