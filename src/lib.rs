//! UUID generation and inspection per RFC 9562
//!
//! ```rust
//! use uuidkit::{uuid5, Uuid};
//!
//! # #[cfg(feature = "global_gen")]
//! # {
//! let uuid = uuidkit::uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! # }
//!
//! let uuid = uuid5(&Uuid::NAMESPACE_DNS, "www.example.com");
//! assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
//! ```
//!
//! This library generates the following versions:
//!
//! - UUIDv1 ([`uuid1`], [`V1Generator`]): a 60-bit Gregorian timestamp, a 14-bit clock sequence,
//!   and a 48-bit node ID.
//! - UUIDv3 ([`uuid3`]) and UUIDv5 ([`uuid5`]): the MD5 or SHA-1 hash of a name space ID and a
//!   name.
//! - UUIDv4 ([`uuid4`], [`v4::from_rand`]): 122 random bits.
//! - UUIDv7 ([`uuid7`], [`V7Generator`]): a 48-bit Unix timestamp in milliseconds, a 12-bit
//!   counter, and 62 random bits.
//!
//! # Monotonic order
//!
//! Each [`V1Generator`] or [`V7Generator`] instance guarantees that the `(timestamp, counter)`
//! pairs of the UUIDs it produces strictly increase, even when called from multiple threads or
//! when the system clock stalls or goes backwards. In such cases the generator goes on with its
//! previous timestamp and increments the counter. When the counter cannot be incremented any
//! further, the generator increments the timestamp by one unit; therefore, the timestamp may run
//! slightly ahead of the real-time clock. [`decode_v1`] and [`decode_v7`] read the pairs back.
//!
//! ```rust
//! use uuidkit::{decode_v7, V7Generator};
//!
//! let g = V7Generator::with_rand08(rand::thread_rng());
//! let a = decode_v7(&g.generate())?;
//! let b = decode_v7(&g.generate())?;
//! assert!(a < b);
//! # Ok::<(), uuidkit::DecodeError>(())
//! ```
//!
//! # Crate features
//!
//! - `global_gen` (default): enables [`uuid1`], [`uuid4`], and [`uuid7`], which share a
//!   process-wide generator seeded from the operating system.
//! - `serde`: enables serialization and deserialization of [`Uuid`].
//! - `uuid`: enables conversion from and to `uuid::Uuid`.
//!
//! Generators emit [`tracing`] events at `trace` level when the clock goes backwards or a counter
//! overflows.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{DecodeError, ParseError};

mod id;
pub use id::{Uuid, Variant};

pub mod layout;

pub mod generator;
pub use generator::{
    CounterSeed, RandSource, StdSystemTime, TimeSource, TimestampGenerator, TimestampLayout,
};

pub mod v1;
pub use v1::V1Generator;

pub mod v4;

pub mod v7;
pub use v7::V7Generator;

mod name;
pub use name::{uuid3, uuid5, HashAlgorithm};

mod decode;
pub use decode::{decode, decode_v1, decode_v7};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid4, uuid7};
