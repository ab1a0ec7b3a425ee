//! Name-based UUIDs (versions 3 and 5).
//!
//! A name-based UUID is the leading 128 bits of the hash of a name space ID (in network byte
//! order) followed by the UTF-8 bytes of a name, with the `ver` and `var` fields overwritten. The
//! same name space ID and name always produce the same UUID.

use md5::{Digest, Md5};
use sha1::Sha1;

use crate::{layout, Uuid};

/// The hash function bound to a name-based UUID version.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum HashAlgorithm {
    /// MD5, producing UUIDv3.
    Md5,

    /// SHA-1, producing UUIDv5.
    Sha1,
}

impl HashAlgorithm {
    /// Returns the UUID version produced with the hash function.
    pub const fn version(self) -> u8 {
        match self {
            Self::Md5 => 3,
            Self::Sha1 => 5,
        }
    }

    /// Generates a name-based UUID from a name space ID and a name.
    pub fn generate(self, namespace: &Uuid, name: &str) -> Uuid {
        let mut bytes = match self {
            Self::Md5 => leading_digest::<Md5>(namespace, name.as_bytes()),
            Self::Sha1 => leading_digest::<Sha1>(namespace, name.as_bytes()),
        };
        layout::set_version_and_variant(&mut bytes, self.version());
        Uuid::from(bytes)
    }
}

/// Hashes the name space ID followed by the name and returns the first 16 bytes of the digest.
///
/// The hasher is fed incrementally, so no concatenated copy of the input is made regardless of the
/// name length.
fn leading_digest<D: Digest>(namespace: &Uuid, name: &[u8]) -> [u8; 16] {
    let digest = D::new()
        .chain_update(namespace.as_bytes())
        .chain_update(name)
        .finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    bytes
}

/// Generates a UUIDv3 object from a name space ID and a name using MD5.
///
/// # Examples
///
/// ```rust
/// use uuidkit::{uuid3, Uuid};
///
/// let uuid = uuid3(&Uuid::NAMESPACE_DNS, "www.example.com");
/// assert_eq!(uuid.to_string(), "5df41881-3aed-3515-88a7-2f4a814cf09e");
/// ```
pub fn uuid3(namespace: &Uuid, name: &str) -> Uuid {
    HashAlgorithm::Md5.generate(namespace, name)
}

/// Generates a UUIDv5 object from a name space ID and a name using SHA-1.
///
/// # Examples
///
/// ```rust
/// use uuidkit::{uuid5, Uuid};
///
/// let uuid = uuid5(&Uuid::NAMESPACE_DNS, "www.example.com");
/// assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
/// ```
pub fn uuid5(namespace: &Uuid, name: &str) -> Uuid {
    HashAlgorithm::Sha1.generate(namespace, name)
}
