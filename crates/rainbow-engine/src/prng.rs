//! Process-wide start-point source (component B).
//!
//! A complementary-multiply-with-carry generator (CMWC4096), chosen for
//! statistical independence of successive outputs, not for security — the
//! only requirement on start-points is that they don't cluster.

use std::sync::OnceLock;
use std::time::SystemTime;

use parking_lot::Mutex;

const CMWC_CYCLE: usize = 4096;
const CMWC_MULTIPLIER: u64 = 18_782;
const CMWC_BASE_MASK: u64 = 0xffff_ffff;

/// A CMWC4096 generator with its own state, independent of the process-wide
/// singleton. Constructible directly for deterministic tests and benches.
pub struct Cmwc4096 {
    state: Box<[u32; CMWC_CYCLE]>,
    index: usize,
    carry: u32,
}

impl Cmwc4096 {
    /// Build a generator whose state is derived deterministically from
    /// `seed` via a simple linear-congruential fill, matching the common
    /// CMWC4096 seeding approach of bootstrapping the lag table from a
    /// smaller generator.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut state = Box::new([0u32; CMWC_CYCLE]);
        let mut x = seed ^ 0x9e37_79b9;
        for slot in state.iter_mut() {
            // A Marsaglia-style xorshift warm-up; any full-period generator
            // suffices to fill the lag table.
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *slot = x;
        }
        let carry = (x % 809_430_660).max(1);
        Self {
            state,
            index: CMWC_CYCLE - 1,
            carry,
        }
    }

    /// Produce the next 32-bit output via the canonical CMWC4096 recurrence.
    pub fn next_u32(&mut self) -> u32 {
        self.index = (self.index + 1) % CMWC_CYCLE;
        let t = CMWC_MULTIPLIER * u64::from(self.state[self.index]) + u64::from(self.carry);
        self.carry = (t >> 32) as u32;
        let mut x = (t & CMWC_BASE_MASK) as u32;
        x = CMWC_BASE_MASK as u32 - x;
        self.state[self.index] = x;
        x
    }
}

static PRNG: OnceLock<Mutex<Cmwc4096>> = OnceLock::new();

fn shared() -> &'static Mutex<Cmwc4096> {
    PRNG.get_or_init(|| {
        let nanos = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        // Mixed with a fixed constant so an all-zero clock read (e.g. in a
        // sandboxed test environment) never yields an all-zero seed.
        let seed = nanos ^ 0xdead_beef;
        Mutex::new(Cmwc4096::new(seed))
    })
}

/// Draw the next 32-bit value from the process-wide generator.
pub fn next_u32() -> u32 {
    let mut guard = shared().lock();
    guard.next_u32()
}
