//! UUID cell encoding and the nullable wrapper.

use crate::cell::{ColumnType, Decode, Encode, ValueReader, WriteBuf, NULL_LEN};
use crate::{RowError, RowResult};
use ruid_uuid::{Uuid, UUID_LEN};

impl Encode for Uuid {
    fn encode(&self, buf: &mut WriteBuf, column: ColumnType) -> RowResult<()> {
        column.expect(ColumnType::UUID)?;
        buf.write_i32(UUID_LEN as i32);
        buf.write_bytes(self.as_bytes());
        Ok(())
    }
}

impl Decode for Uuid {
    const COLUMN: ColumnType = ColumnType::UUID;

    fn decode(reader: &ValueReader<'_>) -> RowResult<Self> {
        reader.column().expect(ColumnType::UUID)?;
        if reader.is_null() {
            return Err(RowError::UnexpectedNull);
        }
        Ok(Uuid::from_slice(reader.payload())?)
    }
}

/// A UUID that may be absent.
///
/// The validity flag is independent of the value: a valid `NullableUuid` may hold the nil UUID,
/// and an absent one always holds [`Uuid::NIL`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NullableUuid {
    pub uuid: Uuid,
    /// True if the value is present (not NULL).
    pub valid: bool,
}

impl NullableUuid {
    /// Wraps a present value.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self { uuid, valid: true }
    }

    /// Returns an absent value.
    pub const fn null() -> Self {
        Self {
            uuid: Uuid::NIL,
            valid: false,
        }
    }

    pub fn as_option(&self) -> Option<Uuid> {
        self.valid.then_some(self.uuid)
    }
}

impl From<Uuid> for NullableUuid {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl From<Option<Uuid>> for NullableUuid {
    fn from(uuid: Option<Uuid>) -> Self {
        uuid.map_or_else(Self::null, Self::from_uuid)
    }
}

impl From<NullableUuid> for Option<Uuid> {
    fn from(uuid: NullableUuid) -> Self {
        uuid.as_option()
    }
}

impl Encode for NullableUuid {
    fn encode(&self, buf: &mut WriteBuf, column: ColumnType) -> RowResult<()> {
        column.expect(ColumnType::UUID)?;
        if !self.valid {
            buf.write_i32(NULL_LEN);
            return Ok(());
        }
        self.uuid.encode(buf, column)
    }
}

impl Decode for NullableUuid {
    const COLUMN: ColumnType = ColumnType::UUID;

    fn decode(reader: &ValueReader<'_>) -> RowResult<Self> {
        reader.column().expect(ColumnType::UUID)?;
        if reader.is_null() {
            return Ok(Self::null());
        }
        Ok(Self::from_uuid(Uuid::decode(reader)?))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NullableUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.as_option(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NullableUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Option<Uuid> as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{decode_cell, encode_cell, FormatCode};
    use ruid_uuid::{UuidError, NAMESPACE_DNS};

    const DNS_CELL: [u8; 20] = [
        0, 0, 0, 16, 0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f,
        0xd4, 0x30, 0xc8,
    ];

    #[test]
    fn test_constructors() {
        let present = NullableUuid::from_uuid(NAMESPACE_DNS);
        assert!(present.valid);
        assert_eq!(present.uuid, NAMESPACE_DNS);

        let absent = NullableUuid::null();
        assert!(!absent.valid);
        assert!(absent.uuid.is_null());
        assert_eq!(absent, NullableUuid::default());
    }

    #[test]
    fn test_valid_nil_is_distinct_from_null() {
        let nil = NullableUuid::from_uuid(Uuid::NIL);

        assert_ne!(nil, NullableUuid::null());
        assert_eq!(nil.as_option(), Some(Uuid::NIL));
        assert_eq!(NullableUuid::null().as_option(), None);
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(
            NullableUuid::from(Some(NAMESPACE_DNS)),
            NullableUuid::from_uuid(NAMESPACE_DNS)
        );
        assert_eq!(NullableUuid::from(None), NullableUuid::null());
        assert_eq!(
            Option::<Uuid>::from(NullableUuid::from(NAMESPACE_DNS)),
            Some(NAMESPACE_DNS)
        );
    }

    #[test]
    fn test_format_code_is_binary() {
        assert_eq!(NullableUuid::null().format_code(), FormatCode::Binary);
        assert_eq!(NAMESPACE_DNS.format_code(), FormatCode::Binary);
    }

    #[test]
    fn test_encode_present_writes_raw_bytes() {
        let cell = encode_cell(&NullableUuid::from_uuid(NAMESPACE_DNS), ColumnType::UUID).unwrap();
        assert_eq!(&cell[..], &DNS_CELL[..]);

        let plain = encode_cell(&NAMESPACE_DNS, ColumnType::UUID).unwrap();
        assert_eq!(plain, cell);
    }

    #[test]
    fn test_encode_null_writes_sentinel_only() {
        let cell = encode_cell(&NullableUuid::null(), ColumnType::UUID).unwrap();
        assert_eq!(&cell[..], &[0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_encode_rejects_other_column_types() {
        for column in [ColumnType::TEXT, ColumnType::BYTEA, ColumnType::INT4] {
            for value in [NullableUuid::null(), NullableUuid::from_uuid(NAMESPACE_DNS)] {
                match encode_cell(&value, column) {
                    Err(RowError::TypeMismatch { name, oid }) => {
                        assert_eq!(name, column.name);
                        assert_eq!(oid, column.oid);
                    }
                    other => panic!("Expected TypeMismatch error, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_decode_present() {
        let decoded: NullableUuid = decode_cell(ColumnType::UUID, &DNS_CELL).unwrap();
        assert_eq!(decoded, NullableUuid::from_uuid(NAMESPACE_DNS));

        let plain: Uuid = decode_cell(ColumnType::UUID, &DNS_CELL).unwrap();
        assert_eq!(plain, NAMESPACE_DNS);
    }

    #[test]
    fn test_decode_null_sets_invalid_and_nil() {
        let decoded: NullableUuid =
            decode_cell(ColumnType::UUID, &[0xff, 0xff, 0xff, 0xff]).unwrap();

        assert!(!decoded.valid);
        assert!(decoded.uuid.is_null());
    }

    #[test]
    fn test_decode_null_into_plain_uuid_fails() {
        let result: RowResult<Uuid> = decode_cell(ColumnType::UUID, &[0xff, 0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(RowError::UnexpectedNull)));
    }

    #[test]
    fn test_decode_rejects_other_column_types() {
        let result: RowResult<NullableUuid> = decode_cell(ColumnType::TEXT, &DNS_CELL);

        match result {
            Err(err @ RowError::TypeMismatch { .. }) => {
                assert!(err.to_string().contains("text"));
            }
            other => panic!("Expected TypeMismatch error, got {:?}", other),
        }

        // The type tag is checked even for absent values.
        let result: RowResult<NullableUuid> =
            decode_cell(ColumnType::INT4, &[0xff, 0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(RowError::TypeMismatch { oid: 23, .. })));
    }

    #[test]
    fn test_decode_checks_column_before_length_prefix() {
        // Neither cell is well formed, but the column tag decides first.
        for (column, cell) in [
            (ColumnType::TEXT, &[0u8, 0][..]),
            (ColumnType::INT4, &[0xff, 0xff, 0xff, 0xfe][..]),
        ] {
            let nullable: RowResult<NullableUuid> = decode_cell(column, cell);
            assert!(
                matches!(nullable, Err(RowError::TypeMismatch { oid, .. }) if oid == column.oid),
                "got {:?}",
                nullable
            );

            let plain: RowResult<Uuid> = decode_cell(column, cell);
            assert!(
                matches!(plain, Err(RowError::TypeMismatch { oid, .. }) if oid == column.oid),
                "got {:?}",
                plain
            );
        }
    }

    #[test]
    fn test_decode_rejects_bytes_after_payload() {
        let mut cell = DNS_CELL.to_vec();
        cell.extend_from_slice(&[0xde, 0xad]);

        let result: RowResult<NullableUuid> = decode_cell(ColumnType::UUID, &cell);
        assert!(matches!(
            result,
            Err(RowError::TrailingBytes {
                expected: 16,
                actual: 18
            })
        ));

        let result: RowResult<Uuid> = decode_cell(ColumnType::UUID, &cell);
        assert!(matches!(result, Err(RowError::TrailingBytes { .. })));
    }

    #[test]
    fn test_decode_wrong_payload_length() {
        let result: RowResult<NullableUuid> =
            decode_cell(ColumnType::UUID, &[0, 0, 0, 4, 1, 2, 3, 4]);

        assert!(matches!(
            result,
            Err(RowError::Uuid(UuidError::Length {
                expected: 16,
                actual: 4
            }))
        ));
    }

    #[test]
    fn test_cell_round_trip() {
        for value in [
            NullableUuid::null(),
            NullableUuid::from_uuid(Uuid::NIL),
            NullableUuid::from_uuid(Uuid::new_v4().unwrap()),
        ] {
            let cell = encode_cell(&value, ColumnType::UUID).unwrap();
            let decoded: NullableUuid = decode_cell(ColumnType::UUID, &cell).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_optional_string() {
        let json = serde_json::to_string(&NullableUuid::null()).unwrap();
        assert_eq!(json, "null");

        let json = serde_json::to_string(&NullableUuid::from_uuid(NAMESPACE_DNS)).unwrap();
        assert_eq!(json, "\"6ba7b810-9dad-11d1-80b4-00c04fd430c8\"");

        let parsed: NullableUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, NullableUuid::from_uuid(NAMESPACE_DNS));

        let parsed: NullableUuid = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, NullableUuid::null());
    }
}
