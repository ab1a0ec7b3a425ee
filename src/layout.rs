//! Bit-level primitives shared by every UUID version.
//!
//! All buffers handled here are 16-byte arrays in network byte order, i.e., the order in which
//! RFC 9562 defines the fields:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

/// Overwrites the 4-bit `ver` field (bits 48-51) with `version` and the 2-bit `var` field (bits
/// 64-65) with `10`.
pub fn set_version_and_variant(bytes: &mut [u8; 16], version: u8) {
    debug_assert!(version < 16);
    bytes[6] = (version << 4) | (bytes[6] & 0x0f);
    bytes[8] = 0x80 | (bytes[8] & 0x3f);
}

/// Reverses the byte order of each of the first three fields (32, 16, and 16 bits) and leaves the
/// trailing eight bytes untouched.
///
/// This converts between the network byte order and the mixed-endian layout that GUID-style
/// structures use on little-endian hosts. The operation is its own inverse.
pub fn swap_field_order(bytes: &mut [u8; 16]) {
    bytes[0..4].reverse();
    bytes[4..6].reverse();
    bytes[6..8].reverse();
}
