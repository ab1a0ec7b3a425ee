//! UUIDv1 generator and layout.
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
//!
//! The 60-bit timestamp counts 100-nanosecond intervals since 1582-10-15 00:00:00 UTC. The 14-bit
//! `clock_seq` field serves as the sequence counter; it starts from zero whenever the timestamp
//! moves forward.

use std::time::Duration;

use crate::generator::{
    CounterSeed, RandSource, StdSystemTime, TimeSource, TimestampGenerator, TimestampLayout,
};
use crate::Uuid;

/// The number of 100-nanosecond intervals between the Gregorian epoch (1582-10-15) and the Unix
/// epoch (1970-01-01).
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// The UUIDv1 layout.
pub static LAYOUT: TimestampLayout = TimestampLayout {
    version: 1,
    sequence_bits: 14,
    counter_seed: CounterSeed::Zero,
    timestamp_unit: gregorian_ticks,
    pack,
    unpack,
};

fn gregorian_ticks(since_epoch: Duration) -> u64 {
    ((since_epoch.as_nanos() / 100) as u64).wrapping_add(GREGORIAN_OFFSET)
}

fn pack(bytes: &mut [u8; 16], timestamp: u64, counter: u64) {
    bytes[..4].copy_from_slice(&(timestamp as u32).to_be_bytes());
    bytes[4..6].copy_from_slice(&((timestamp >> 32) as u16).to_be_bytes());
    bytes[6..8].copy_from_slice(&((timestamp >> 48) as u16 & 0x0fff).to_be_bytes());
    bytes[8..10].copy_from_slice(&(counter as u16 & 0x3fff).to_be_bytes());
}

fn unpack(bytes: &[u8; 16]) -> (u64, u64) {
    let time_low = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let time_mid = u16::from_be_bytes([bytes[4], bytes[5]]);
    let time_high = u16::from_be_bytes([bytes[6], bytes[7]]) & 0x0fff;
    let clock_seq = u16::from_be_bytes([bytes[8], bytes[9]]) & 0x3fff;
    (
        (u64::from(time_high) << 48) | (u64::from(time_mid) << 32) | u64::from(time_low),
        u64::from(clock_seq),
    )
}

/// Represents a UUIDv1 generator that encapsulates a clock sequence and a node ID.
///
/// The generator guarantees that `(timestamp, clock_seq)` pairs strictly increase across calls on
/// the same instance, including calls from multiple threads. Note that UUIDv1 values themselves do
/// not sort by creation time because the low timestamp bits come first.
///
/// # Examples
///
/// ```rust
/// use uuidkit::V1Generator;
///
/// // a fixed node ID, e.g., derived from a MAC address
/// let g = V1Generator::with_node(uuidkit::generator::with_rand08::Adapter(rand::thread_rng()), [
///     0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46,
/// ]);
/// assert!(g.generate().to_string().ends_with("-9f6bdeced846"));
/// ```
#[derive(Debug)]
pub struct V1Generator<R, T = StdSystemTime> {
    inner: TimestampGenerator<R, T>,
    node: [u8; 6],
}

impl<R: RandSource> V1Generator<R> {
    /// Creates a generator instance that reads the system clock and uses a random node ID.
    pub fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }

    /// Creates a generator instance that reads the system clock and uses the node ID passed.
    pub const fn with_node(rng: R, node: [u8; 6]) -> Self {
        Self::with_sources_and_node(rng, StdSystemTime, node)
    }
}

impl<R: RandSource, T: TimeSource> V1Generator<R, T> {
    /// Creates a generator instance with a specified random number generator and system clock. The
    /// node ID is drawn from the random number generator with the multicast bit set, as RFC 9562
    /// requires for node IDs not taken from a network card.
    pub fn with_rand_and_time_sources(mut rng: R, time_source: T) -> Self {
        let mut node = [0u8; 6];
        rng.fill_bytes(&mut node);
        node[0] |= 0x01;
        Self::with_sources_and_node(rng, time_source, node)
    }

    /// Creates a generator instance with a specified random number generator, system clock, and
    /// node ID.
    pub const fn with_sources_and_node(rng: R, time_source: T, node: [u8; 6]) -> Self {
        Self {
            inner: TimestampGenerator::with_rand_and_time_sources(&LAYOUT, rng, time_source),
            node,
        }
    }

    /// Returns the node ID embedded in every UUID from this generator.
    pub const fn node(&self) -> [u8; 6] {
        self.node
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    pub fn generate(&self) -> Uuid {
        self.with_node_id(self.inner.generate())
    }

    /// Generates a new UUIDv1 object from the `timestamp` passed, expressed in 100-nanosecond
    /// intervals since 1582-10-15.
    pub fn generate_core(&self, timestamp: u64) -> Uuid {
        self.with_node_id(self.inner.generate_core(timestamp))
    }

    fn with_node_id(&self, uuid: Uuid) -> Uuid {
        let mut bytes: [u8; 16] = uuid.into();
        bytes[10..].copy_from_slice(&self.node);
        Uuid::from(bytes)
    }
}

impl<R: RandSource + Default> Default for V1Generator<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{gregorian_ticks, pack, unpack, V1Generator, GREGORIAN_OFFSET};
    use crate::generator::tests::{ManualClock, MockRandSource};
    use crate::{decode_v1, layout, Uuid, Variant};
    use std::time::Duration;

    const RFC_NODE: [u8; 6] = [0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46];

    /// Encodes RFC 9562 test vector
    #[test]
    fn encodes_rfc_9562_test_vector() {
        let mut bytes = [0u8; 16];
        bytes[10..].copy_from_slice(&RFC_NODE);
        pack(&mut bytes, 0x01ec_9414_c232_ab00, 0x33c8);
        layout::set_version_and_variant(&mut bytes, 1);
        let e = Uuid::from(bytes);
        assert_eq!(Ok(e), "c232ab00-9414-11ec-b3c8-9f6bdeced846".parse());
        assert_eq!(unpack(e.as_bytes()), (0x01ec_9414_c232_ab00, 0x33c8));
    }

    /// Converts Unix time into Gregorian ticks
    #[test]
    fn converts_unix_time_into_gregorian_ticks() {
        assert_eq!(gregorian_ticks(Duration::ZERO), GREGORIAN_OFFSET);
        assert_eq!(gregorian_ticks(Duration::from_nanos(199)), GREGORIAN_OFFSET + 1);
        // the RFC 9562 example time: 2022-02-22T19:22:22Z
        assert_eq!(
            gregorian_ticks(Duration::from_secs(1_645_557_742)),
            0x01ec_9414_c232_ab00
        );
    }

    /// Generates from fixed node and timestamp deterministically
    #[test]
    fn generates_from_fixed_node_and_timestamp_deterministically() {
        let g = V1Generator::with_node(MockRandSource, RFC_NODE);
        assert_eq!(g.node(), RFC_NODE);
        let e = g.generate_core(0x01ec_9414_c232_ab00);
        assert_eq!(Ok(e), "c232ab00-9414-11ec-8000-9f6bdeced846".parse());
        let e = g.generate_core(0x01ec_9414_c232_ab00);
        assert_eq!(Ok(e), "c232ab00-9414-11ec-8001-9f6bdeced846".parse());
    }

    /// Sets multicast bit of random node ID
    #[test]
    fn sets_multicast_bit_of_random_node_id() {
        for _ in 0..100 {
            let g = V1Generator::new(MockRandSource);
            assert_eq!(g.node()[0] & 0x01, 0x01);
            assert_eq!(g.generate().as_bytes()[10..], g.node());
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        let g: V1Generator<MockRandSource> = Default::default();
        for _ in 0..1_000 {
            let e = g.generate();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Advances timestamp by exactly one at clock sequence rollover
    #[test]
    fn advances_timestamp_by_exactly_one_at_clock_sequence_rollover() {
        let clock = ManualClock::new(1_645_557_742_000_000_000);
        let g = V1Generator::with_rand_and_time_sources(MockRandSource, clock);
        let ts = GREGORIAN_OFFSET + 16_455_577_420_000_000;
        assert_eq!(decode_v1(&g.generate()), Ok((ts, 0)));
        for i in 1..1 << 14 {
            assert_eq!(decode_v1(&g.generate()), Ok((ts, i)));
        }
        assert_eq!(decode_v1(&g.generate()), Ok((ts + 1, 0)));
        assert_eq!(decode_v1(&g.generate()), Ok((ts + 1, 1)));
    }

    /// Generates no IDs sharing same timestamp and clock sequence under multithreading
    #[test]
    fn generates_no_ids_sharing_same_timestamp_and_clock_sequence_under_multithreading() {
        use std::{collections::HashSet, sync::Arc, thread};

        let g = Arc::new(V1Generator::with_rand08(rand::rngs::OsRng));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let g = Arc::clone(&g);
                thread::spawn(move || {
                    let mut pairs = Vec::with_capacity(10_000);
                    for _ in 0..10_000 {
                        let e = g.generate();
                        assert_eq!(e.as_bytes()[10..], g.node());
                        pairs.push(decode_v1(&e).unwrap());
                    }
                    pairs
                })
            })
            .collect();

        let mut s = HashSet::new();
        for h in handles {
            let pairs = h.join().unwrap();
            // each thread observes its own calls in order
            assert!(pairs.windows(2).all(|w| w[0] < w[1]));
            s.extend(pairs);
        }
        assert_eq!(s.len(), 4 * 10_000);
    }

    /// Decodes strictly increasing pairs under regressing clock
    #[test]
    fn decodes_strictly_increasing_pairs_under_regressing_clock() {
        let clock = ManualClock::new(1_645_557_742_000_000_000);
        let g = V1Generator::with_rand_and_time_sources(MockRandSource, clock.clone());
        let mut prev = decode_v1(&g.generate()).unwrap();
        for i in 0..50_000u64 {
            clock.set(1_645_557_742_000_000_000 - (i % 1_000) * 100);
            let curr = decode_v1(&g.generate()).unwrap();
            assert!(prev < curr);
            prev = curr;
        }
    }
}
