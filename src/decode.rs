//! Field extraction from time-ordered UUIDs.

use crate::generator::TimestampLayout;
use crate::{v1, v7, DecodeError, Uuid};

/// Extracts the `(timestamp, counter)` pair from a UUID produced with `layout`.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidVersion`] if the `ver` field does not match the layout.
pub fn decode(uuid: &Uuid, layout: &TimestampLayout) -> Result<(u64, u64), DecodeError> {
    let found = uuid.as_bytes()[6] >> 4;
    if found != layout.version {
        return Err(DecodeError::InvalidVersion {
            expected: layout.version,
            found,
        });
    }
    Ok((layout.unpack)(uuid.as_bytes()))
}

/// Extracts the Unix timestamp in milliseconds and the 12-bit counter from a UUIDv7.
///
/// # Examples
///
/// ```rust
/// let uuid = "017f22e2-79b0-7cc3-98c4-dc0c0c07398f".parse()?;
/// assert_eq!(uuidkit::decode_v7(&uuid), Ok((0x017f_22e2_79b0, 0xcc3)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`DecodeError::InvalidVersion`] if the UUID is not a UUIDv7.
pub fn decode_v7(uuid: &Uuid) -> Result<(u64, u16), DecodeError> {
    let (timestamp, counter) = decode(uuid, &v7::LAYOUT)?;
    Ok((timestamp, counter as u16))
}

/// Extracts the 60-bit timestamp (100-nanosecond intervals since 1582-10-15) and the 14-bit clock
/// sequence from a UUIDv1.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidVersion`] if the UUID is not a UUIDv1.
pub fn decode_v1(uuid: &Uuid) -> Result<(u64, u16), DecodeError> {
    let (timestamp, clock_seq) = decode(uuid, &v1::LAYOUT)?;
    Ok((timestamp, clock_seq as u16))
}
