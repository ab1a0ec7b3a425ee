//! Time-ordered generator core and related types.
//!
//! [`TimestampGenerator`] implements the sequence algorithm shared by UUIDv1 and UUIDv7. The
//! version-specific parts (the timestamp unit, the counter width, and the bit layout) are supplied
//! as a [`TimestampLayout`] value, so [`V1Generator`](crate::V1Generator) and
//! [`V7Generator`](crate::V7Generator) are thin wrappers that pick a layout.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::trace;

use crate::{layout, Uuid};

pub mod with_rand08;


/// A trait that defines the minimum random number generator interface for [`TimestampGenerator`].
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`TimestampGenerator`].
pub trait TimeSource {
    /// Returns the current time as the duration elapsed since the Unix epoch.
    fn now(&mut self) -> Duration;
}

/// The default [`TimeSource`] that uses [`SystemTime`].
///
/// A system clock set before the Unix epoch reads as the epoch itself; the generator then goes on
/// with its previous timestamp as it does on any clock rollback.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn now(&mut self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}

/// Any `FnMut() -> Duration` closure works as a clock, which is handy for replaying timestamps.
impl<F: FnMut() -> Duration> TimeSource for F {
    fn now(&mut self) -> Duration {
        self()
    }
}

/// How the counter is initialized whenever the timestamp moves forward.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum CounterSeed {
    /// Starts from zero.
    Zero,

    /// Starts from a random number whose most significant bit is cleared, so that at least half of
    /// the counter range is left for increments within the same timestamp.
    Random,
}

/// The version-specific constants and functions that drive a [`TimestampGenerator`].
#[derive(Clone, Copy, Debug)]
pub struct TimestampLayout {
    /// The value of the 4-bit `ver` field.
    pub version: u8,

    /// The width in bits of the counter field, up to 64.
    pub sequence_bits: u32,

    /// The counter initialization policy.
    pub counter_seed: CounterSeed,

    /// Converts the duration since the Unix epoch into the timestamp unit of the layout.
    pub timestamp_unit: fn(Duration) -> u64,

    /// Writes a timestamp and a counter into a buffer. Bits not owned by the two fields must be
    /// left untouched; `ver` and `var` are overwritten afterwards.
    pub pack: fn(&mut [u8; 16], u64, u64),

    /// Reads the timestamp and the counter back from a buffer. The inverse of `pack`.
    pub unpack: fn(&[u8; 16]) -> (u64, u64),
}

impl TimestampLayout {
    /// Returns the largest value the counter field can hold.
    pub const fn max_counter(&self) -> u64 {
        match 1u64.checked_shl(self.sequence_bits) {
            Some(n) => n - 1,
            None => u64::MAX,
        }
    }
}

/// Represents a time-ordered UUID generator that encapsulates a counter and guarantees the
/// monotonic order of `(timestamp, counter)` pairs generated by the same instance.
///
/// The state is guarded by a mutex owned by the instance; sharing one instance among threads (e.g.,
/// through an `Arc`) yields a process-wide order, while separate instances are independent
/// sequence domains.
///
/// When the clock has not advanced or has gone backwards since the previous call, the generator
/// reuses the previous timestamp and increments the counter. When the counter exceeds its field
/// width, the generator increments the timestamp by one unit and reseeds the counter; therefore,
/// the timestamp of a UUID may be larger than the real-time clock.
#[derive(Debug)]
pub struct TimestampGenerator<R, T = StdSystemTime> {
    layout: &'static TimestampLayout,
    state: Mutex<State<R, T>>,
}

#[derive(Debug)]
struct State<R, T> {
    timestamp: u64,
    counter: u64,
    rng: R,
    time_source: T,
}

impl<R: RandSource, T: TimeSource> TimestampGenerator<R, T> {
    /// Creates a generator instance with a layout, a random number generator, and a system clock.
    ///
    /// # Panics
    ///
    /// Panics if `layout.version` does not fit in four bits or `layout.sequence_bits` exceeds 64.
    pub const fn with_rand_and_time_sources(
        layout: &'static TimestampLayout,
        rng: R,
        time_source: T,
    ) -> Self {
        assert!(layout.version < 16, "`version` must be a 4-bit integer");
        assert!(
            layout.sequence_bits <= 64,
            "`sequence_bits` must not exceed 64"
        );
        Self {
            layout,
            state: Mutex::new(State {
                timestamp: 0,
                counter: 0,
                rng,
                time_source,
            }),
        }
    }

    /// Returns the layout the generator produces.
    pub const fn layout(&self) -> &'static TimestampLayout {
        self.layout
    }

    /// Generates a new UUID from the current timestamp.
    pub fn generate(&self) -> Uuid {
        let mut state = self.lock();
        let timestamp = (self.layout.timestamp_unit)(state.time_source.now());
        self.finish(state, timestamp)
    }

    /// Generates a new UUID from the `timestamp` passed, expressed in the timestamp unit of the
    /// layout.
    pub fn generate_core(&self, timestamp: u64) -> Uuid {
        let state = self.lock();
        self.finish(state, timestamp)
    }

    /// Runs `f` with the random number generator of the instance.
    #[cfg(feature = "global_gen")]
    pub(crate) fn with_rng<U>(&self, f: impl FnOnce(&mut R) -> U) -> U {
        f(&mut self.lock().rng)
    }

    fn lock(&self) -> MutexGuard<'_, State<R, T>> {
        // the state is valid after any panic because every update is a plain integer store
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, mut state: MutexGuard<'_, State<R, T>>, timestamp: u64) -> Uuid {
        let (timestamp, counter) = state.advance(self.layout, timestamp);
        let mut bytes = [0u8; 16];
        state.rng.fill_bytes(&mut bytes);
        drop(state);

        (self.layout.pack)(&mut bytes, timestamp, counter);
        layout::set_version_and_variant(&mut bytes, self.layout.version);
        Uuid::from(bytes)
    }
}

impl<R: RandSource, T> State<R, T> {
    /// Moves the sequence forward and returns the `(timestamp, counter)` pair to encode.
    fn advance(&mut self, layout: &TimestampLayout, timestamp: u64) -> (u64, u64) {
        if timestamp > self.timestamp {
            self.timestamp = timestamp;
            self.counter = self.seed_counter(layout);
        } else {
            if timestamp < self.timestamp {
                trace!(
                    version = layout.version,
                    timestamp,
                    last_timestamp = self.timestamp,
                    "clock behind last timestamp; reusing last timestamp"
                );
            }
            match self.counter.checked_add(1) {
                Some(counter) if counter <= layout.max_counter() => self.counter = counter,
                _ => {
                    // increment timestamp at counter overflow
                    self.timestamp = self.timestamp.wrapping_add(1);
                    self.counter = self.seed_counter(layout);
                    trace!(
                        version = layout.version,
                        timestamp = self.timestamp,
                        "counter exhausted; advanced timestamp"
                    );
                }
            }
        }
        (self.timestamp, self.counter)
    }

    fn seed_counter(&mut self, layout: &TimestampLayout) -> u64 {
        match layout.counter_seed {
            CounterSeed::Zero => 0,
            CounterSeed::Random => self.rng.next_u64() & (layout.max_counter() >> 1),
        }
    }
}
