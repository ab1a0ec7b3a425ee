use std::{fmt, str};

use fstr::FStr;

use crate::{layout, ParseError};

/// Represents a Universally Unique IDentifier.
///
/// The value is stored as a 16-byte array in network byte order, so equality, ordering, and
/// hashing are all bytewise and independent of the host endianness.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Name space ID for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Name space ID for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Name space ID for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self(0x6ba7b812_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Name space ID for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self =
        Self(0x6ba7b814_9dad_11d1_80b4_00c04fd430c8u128.to_be_bytes());

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID from the four field values of the RFC layout: the 32-bit, 16-bit, and 16-bit
    /// leading fields followed by the trailing eight bytes.
    pub const fn from_fields(d1: u32, d2: u16, d3: u16, d4: &[u8; 8]) -> Self {
        Self([
            (d1 >> 24) as u8,
            (d1 >> 16) as u8,
            (d1 >> 8) as u8,
            d1 as u8,
            (d2 >> 8) as u8,
            d2 as u8,
            (d3 >> 8) as u8,
            d3 as u8,
            d4[0],
            d4[1],
            d4[2],
            d4[3],
            d4[4],
            d4[5],
            d4[6],
            d4[7],
        ])
    }

    /// Returns the four field values of the RFC layout. The inverse of [`Uuid::from_fields()`].
    pub const fn as_fields(&self) -> (u32, u16, u16, [u8; 8]) {
        let b = &self.0;
        (
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            u16::from_be_bytes([b[4], b[5]]),
            u16::from_be_bytes([b[6], b[7]]),
            [b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]],
        )
    }

    /// Creates a UUID from bytes whose first three fields are in little-endian order, as found in
    /// GUID structures on little-endian hosts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let x = Uuid::from_bytes_le([
    ///     0xa4, 0xa3, 0xa2, 0xa1, 0xb2, 0xb1, 0xc2, 0xc1, 0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7,
    ///     0xd8,
    /// ]);
    /// assert_eq!(x.to_string(), "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8");
    /// ```
    pub fn from_bytes_le(mut bytes: [u8; 16]) -> Self {
        layout::swap_field_order(&mut bytes);
        Self(bytes)
    }

    /// Returns the bytes with the first three fields in little-endian order. The inverse of
    /// [`Uuid::from_bytes_le()`].
    pub fn to_bytes_le(&self) -> [u8; 16] {
        let mut bytes = self.0;
        layout::swap_field_order(&mut bytes);
        bytes
    }

    /// Reports the variant field value of the UUID or, if appropriate, "Nil" or "Max" as a
    /// special-purpose value.
    pub fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 if self.0 == Self::NIL.0 => Variant::Nil,
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ if self.0 == Self::MAX.0 => Variant::Max,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the variant
    /// field value of `10`.
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuidkit::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut r = 0;
        let mut w = 0;
        while r < 16 {
            let e = self.0[r] as usize;
            buffer[w] = DIGITS[e >> 4];
            buffer[w + 1] = DIGITS[e & 15];
            if r == 3 || r == 5 || r == 7 || r == 9 {
                buffer[w + 2] = b'-';
                w += 1;
            }
            r += 1;
            w += 2;
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: the buffer consists of ASCII hex digits and hyphens only
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

/// The reserved UUID variants and the special-purpose Nil and Max values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil UUID.
    Nil,

    /// The variant field value of `0`, reserved for NCS backward compatibility.
    Var0,

    /// The variant field value of `10` used by RFC 9562 (and RFC 4122) UUIDs.
    Var10,

    /// The variant field value of `110`, reserved for Microsoft backward compatibility.
    Var110,

    /// The variant field value of `111`, reserved for future definition.
    VarReserved,

    /// Max UUID.
    Max,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u32, u16, u16, [u8; 8]), &'static str)] {
        &[
            ((0, 0, 0, [0; 8]), "00000000-0000-0000-0000-000000000000"),
            (
                (u32::MAX, u16::MAX, u16::MAX, [0xff; 8]),
                "ffffffff-ffff-ffff-ffff-ffffffffffff",
            ),
            (
                (
                    0xa1a2a3a4,
                    0xb1b2,
                    0xc1c2,
                    [0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8],
                ),
                "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8",
            ),
            (
                (
                    0x017f22e2,
                    0x79b0,
                    0x7cc3,
                    [0x98, 0xc4, 0xdc, 0x0c, 0x0c, 0x07, 0x39, 0x8f],
                ),
                "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            ),
            (
                (
                    0xc232ab00,
                    0x9414,
                    0x11ec,
                    [0xb3, 0xc8, 0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46],
                ),
                "c232ab00-9414-11ec-b3c8-9f6bdeced846",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields(fs.0, fs.1, fs.2, &fs.3);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.encode() as &str, *text);
            assert_eq!(&from_fields.to_string(), text);
            assert_eq!(from_fields.as_fields(), *fs);
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "+180a8f0-5b84-7438-ab50-f066aa10a367",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(&Uuid::NIL.encode() as &str, "00000000-0000-0000-0000-000000000000");
        assert_eq!(&Uuid::MAX.encode() as &str, "ffffffff-ffff-ffff-ffff-ffffffffffff");
        assert_eq!(Uuid::NIL.variant(), Variant::Nil);
        assert_eq!(Uuid::MAX.variant(), Variant::Max);
        assert_eq!(Uuid::NIL.version(), None);
        assert_eq!(Uuid::MAX.version(), None);
    }

    /// Returns predefined name space IDs
    #[test]
    fn returns_predefined_name_space_ids() {
        assert_eq!(
            &Uuid::NAMESPACE_DNS.encode() as &str,
            "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
        );
        assert_eq!(
            &Uuid::NAMESPACE_URL.encode() as &str,
            "6ba7b811-9dad-11d1-80b4-00c04fd430c8"
        );
        assert_eq!(
            &Uuid::NAMESPACE_OID.encode() as &str,
            "6ba7b812-9dad-11d1-80b4-00c04fd430c8"
        );
        assert_eq!(
            &Uuid::NAMESPACE_X500.encode() as &str,
            "6ba7b814-9dad-11d1-80b4-00c04fd430c8"
        );
    }

    /// Reports variant and version fields
    #[test]
    fn reports_variant_and_version_fields() {
        let cases = [
            ("00000000-0000-0000-0000-000000000001", Variant::Var0, None),
            ("00000000-0000-1000-7fff-ffffffffffff", Variant::Var0, None),
            ("c232ab00-9414-11ec-b3c8-9f6bdeced846", Variant::Var10, Some(1)),
            ("5df41881-3aed-3515-88a7-2f4a814cf09e", Variant::Var10, Some(3)),
            ("919108f7-52d1-4320-9bac-f847db4148a8", Variant::Var10, Some(4)),
            ("2ed6657d-e927-568b-95e1-2665a8aea6a2", Variant::Var10, Some(5)),
            ("017f22e2-79b0-7cc3-98c4-dc0c0c07398f", Variant::Var10, Some(7)),
            ("00000000-0000-7000-c000-000000000000", Variant::Var110, None),
            ("00000000-0000-7000-e000-000000000000", Variant::VarReserved, None),
        ];

        for (text, variant, version) in cases {
            let e = text.parse::<Uuid>().unwrap();
            assert_eq!(e.variant(), variant, "{text}");
            assert_eq!(e.version(), version, "{text}");
        }
    }

    /// Produces the same value regardless of host byte order
    #[test]
    fn produces_the_same_value_regardless_of_host_byte_order() {
        // u128 conversions are defined in big-endian; bytes must match the text in order
        let reference = Uuid::from(0xa1a2a3a4_b1b2_c1c2_d1d2_d3d4d5d6d7d8u128);
        assert_eq!(
            reference.as_bytes(),
            &[
                0xa1, 0xa2, 0xa3, 0xa4, 0xb1, 0xb2, 0xc1, 0xc2, 0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6,
                0xd7, 0xd8
            ]
        );
        assert_eq!(
            reference,
            Uuid::from_fields(
                0xa1a2a3a4,
                0xb1b2,
                0xc1c2,
                &[0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8]
            )
        );

        let le = reference.to_bytes_le();
        assert_eq!(
            le,
            [
                0xa4, 0xa3, 0xa2, 0xa1, 0xb2, 0xb1, 0xc2, 0xc1, 0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6,
                0xd7, 0xd8
            ]
        );
        assert_eq!(Uuid::from_bytes_le(le), reference);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields(fs.0, fs.1, fs.2, &fs.3);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(Uuid::from_bytes_le(e.to_bytes_le()), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            assert_eq!(Uuid::try_from(String::from(e).to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_bytes(), &<[u8; 16]>::from(e));
        }
    }
}
