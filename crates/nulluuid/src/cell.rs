//! Tagged binary cells and the encode/decode capability traits.
//!
//! A cell is a big-endian `i32` length followed by that many payload bytes. A length of
//! [`NULL_LEN`] marks an absent value and carries no payload. A cell holds exactly one value, so
//! bytes past the declared payload are an error. Every cell belongs to a column whose
//! [`ColumnType`] tag is checked before any bytes are read or written.

use crate::{RowError, RowResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Numeric type identifier of a column.
pub type Oid = u32;

/// Length prefix that marks an absent value.
pub const NULL_LEN: i32 = -1;

/// The type tag of a column: its identifier and display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColumnType {
    pub oid: Oid,
    pub name: &'static str,
}

impl ColumnType {
    pub const BYTEA: ColumnType = ColumnType { oid: 17, name: "bytea" };
    pub const INT4: ColumnType = ColumnType { oid: 23, name: "int4" };
    pub const TEXT: ColumnType = ColumnType { oid: 25, name: "text" };
    pub const UUID: ColumnType = ColumnType { oid: 2950, name: "uuid" };

    /// Fails with [`RowError::TypeMismatch`] unless this is `expected`.
    pub fn expect(self, expected: ColumnType) -> RowResult<()> {
        if self.oid == expected.oid {
            return Ok(());
        }
        tracing::debug!(
            expected = expected.name,
            actual = self.name,
            oid = self.oid,
            "column type mismatch"
        );
        Err(RowError::TypeMismatch {
            name: self.name.to_owned(),
            oid: self.oid,
        })
    }
}

/// Wire format of an encoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i16)]
pub enum FormatCode {
    Text = 0,
    Binary = 1,
}

/// Growable output buffer for encoded cells.
#[derive(Debug, Default)]
pub struct WriteBuf {
    buf: BytesMut,
}

impl WriteBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_i32(&mut self, n: i32) {
        self.buf.put_i32(n);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Read access to a single cell of a known column type.
#[derive(Debug)]
pub struct ValueReader<'a> {
    column: ColumnType,
    len: i32,
    payload: &'a [u8],
}

impl<'a> ValueReader<'a> {
    /// Splits the length prefix off `cell`.
    ///
    /// The column tag is only recorded here; use [`decode_cell`] to have it checked against the
    /// target type before the prefix is read.
    ///
    /// # Errors
    ///
    /// - [`RowError::Truncated`] if `cell` is too short for the prefix or for the payload length
    ///   it declares.
    /// - [`RowError::InvalidLength`] if the prefix is negative but not [`NULL_LEN`].
    /// - [`RowError::TrailingBytes`] if `cell` continues past the declared payload.
    pub fn new(column: ColumnType, cell: &'a [u8]) -> RowResult<Self> {
        let mut cursor = cell;
        if cursor.remaining() < 4 {
            return Err(RowError::Truncated {
                expected: 4,
                actual: cursor.remaining(),
            });
        }
        let len = cursor.get_i32();

        let declared = if len == NULL_LEN {
            0
        } else {
            usize::try_from(len).map_err(|_| RowError::InvalidLength(len))?
        };
        if cursor.remaining() < declared {
            return Err(RowError::Truncated {
                expected: declared,
                actual: cursor.remaining(),
            });
        }
        if cursor.remaining() > declared {
            return Err(RowError::TrailingBytes {
                expected: declared,
                actual: cursor.remaining(),
            });
        }

        Ok(Self {
            column,
            len,
            payload: cursor,
        })
    }

    /// Returns the column type tag.
    pub fn column(&self) -> ColumnType {
        self.column
    }

    /// Returns the declared payload length, or [`NULL_LEN`] for an absent value.
    pub fn declared_len(&self) -> i32 {
        self.len
    }

    /// Returns true if the cell marks an absent value.
    pub fn is_null(&self) -> bool {
        self.len == NULL_LEN
    }

    /// Returns the payload bytes. Empty for an absent value.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// Types that can be written into a binary cell.
pub trait Encode {
    /// Returns the wire format this encoder writes.
    fn format_code(&self) -> FormatCode {
        FormatCode::Binary
    }

    /// Writes the length-prefixed cell for this value into `buf`.
    fn encode(&self, buf: &mut WriteBuf, column: ColumnType) -> RowResult<()>;
}

/// Types that can be read from a binary cell.
pub trait Decode: Sized {
    /// The only column type this decoder accepts.
    const COLUMN: ColumnType;

    fn decode(reader: &ValueReader<'_>) -> RowResult<Self>;
}

/// Encodes `value` as a single cell of `column`.
pub fn encode_cell<T: Encode + ?Sized>(value: &T, column: ColumnType) -> RowResult<Bytes> {
    let mut buf = WriteBuf::new();
    value.encode(&mut buf, column)?;
    Ok(buf.freeze())
}

/// Decodes a single cell of `column`.
///
/// The column tag is checked against [`Decode::COLUMN`] before any byte of `cell` is read, so a
/// foreign column fails with [`RowError::TypeMismatch`] whatever its contents.
pub fn decode_cell<T: Decode>(column: ColumnType, cell: &[u8]) -> RowResult<T> {
    column.expect(T::COLUMN)?;
    T::decode(&ValueReader::new(column, cell)?)
}
