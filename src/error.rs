//! Error types.

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("invalid string representation")]
pub struct ParseError {}

/// Error extracting fields from a UUID of an unexpected kind.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The `ver` field of the UUID does not match the decoder.
    #[error("expected UUID version {expected}, found version {found}")]
    InvalidVersion {
        /// The version the decoder handles.
        expected: u8,
        /// The value found in the `ver` field.
        found: u8,
    },
}
