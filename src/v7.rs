//! UUIDv7 generator and layout.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                         rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! - The 48-bit `unix_ts_ms` field holds the low 48 bits of the Unix timestamp in milliseconds.
//! - The 12-bit `counter` field occupies `rand_a` of RFC 9562. It is randomly initialized within
//!   its lower half whenever `unix_ts_ms` moves forward and incremented by one for each UUID
//!   generated within the same millisecond.
//! - The remaining 62 `rand` bits are filled with random data.

use std::time::Duration;

use crate::generator::{
    CounterSeed, RandSource, StdSystemTime, TimeSource, TimestampGenerator, TimestampLayout,
};
use crate::Uuid;

/// The UUIDv7 layout.
pub static LAYOUT: TimestampLayout = TimestampLayout {
    version: 7,
    sequence_bits: 12,
    counter_seed: CounterSeed::Random,
    timestamp_unit: unix_ts_ms,
    pack,
    unpack,
};

fn unix_ts_ms(since_epoch: Duration) -> u64 {
    since_epoch.as_millis() as u64
}

fn pack(bytes: &mut [u8; 16], timestamp: u64, counter: u64) {
    bytes[..6].copy_from_slice(&timestamp.to_be_bytes()[2..]);
    bytes[6] = (counter >> 8) as u8 & 0x0f;
    bytes[7] = counter as u8;
}

fn unpack(bytes: &[u8; 16]) -> (u64, u64) {
    let mut timestamp = [0u8; 8];
    timestamp[2..].copy_from_slice(&bytes[..6]);
    let counter = (u64::from(bytes[6] & 0x0f) << 8) | u64::from(bytes[7]);
    (u64::from_be_bytes(timestamp), counter)
}

/// Represents a UUIDv7 generator that encapsulates a counter and guarantees the monotonic order of
/// UUIDs generated within the same millisecond.
///
/// The generator is safe to share among threads; the following example guarantees the
/// process-wide (cross-thread) monotonicity.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuidkit::V7Generator;
///
/// let g = sync::Arc::new(V7Generator::with_rand08(OsRng));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct V7Generator<R, T = StdSystemTime> {
    inner: TimestampGenerator<R, T>,
}

impl<R: RandSource> V7Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Creates a generator instance with a specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self {
            inner: TimestampGenerator::with_rand_and_time_sources(&LAYOUT, rng, time_source),
        }
    }

    /// Generates a new UUIDv7 object from the current timestamp.
    pub fn generate(&self) -> Uuid {
        self.inner.generate()
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// Only the low 48 bits of `unix_ts_ms` are encoded.
    pub fn generate_core(&self, unix_ts_ms: u64) -> Uuid {
        self.inner.generate_core(unix_ts_ms)
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    #[cfg(feature = "global_gen")]
    pub(crate) fn generate_v4(&self) -> Uuid {
        self.inner.with_rng(|rng| crate::v4::from_rand(rng))
    }
}

impl<R: RandSource + Default> Default for V7Generator<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuidkit::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V7Generator<R, T> {}
