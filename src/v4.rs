//! UUIDv4-related functionality

use crate::generator::RandSource;
use crate::{layout, Uuid};

/// Generates a UUIDv4 object from the random number generator passed.
///
/// # Examples
///
/// ```rust
/// use uuidkit::generator::with_rand08::Adapter;
///
/// let uuid = uuidkit::v4::from_rand(&mut Adapter(rand::thread_rng()));
/// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn from_rand<R: RandSource + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    layout::set_version_and_variant(&mut bytes, 4);
    Uuid::from(bytes)
}
