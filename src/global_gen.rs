//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::generator::{scramble, step, RandSource, XorShift64Star};
use crate::{Error, Ulid};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Generates a [`Ulid`] from the current time and the process-wide generator.
///
/// Identifiers minted within the same millisecond are ordered by their random bits, not by
/// creation order.
///
/// # Errors
///
/// Returns [`Error::ClockBeforeEpoch`] if the system clock is set before the Unix epoch.
///
/// # Examples
///
/// ```rust
/// let id = ulid64::ulid()?;
/// println!("{id}"); // e.g., "01HF7Y5Q3JX8W0D2S4V6T9KBNM"
/// println!("{:?}", id.to_bytes()); // as 16-byte little-endian halves
/// # Ok::<(), ulid64::Error>(())
/// ```
pub fn ulid() -> Result<Ulid, Error> {
    Ulid::generate()
}

/// A handle to the process-wide xorshift64* state.
///
/// The state is a single [`AtomicU64`] seeded once from environmental entropy on first use. Each
/// draw advances it with a lock-free compare-and-swap, so concurrent callers never observe the
/// same state transition. Callers wanting an isolated stream own an [`XorShift64Star`] instead.
///
/// On Unix, creating a handle reseeds the state if the process ID has changed since the last
/// handle was created (i.e., after a process fork), so that parent and child do not produce
/// identical sequences. The check happens once per handle, not once per draw; a handle kept
/// across a fork continues the parent's sequence until a new one is created.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GlobalRng(());

impl GlobalRng {
    /// Returns a handle to the process-wide state, seeding it on first use.
    pub fn new() -> Self {
        unix_fork_safety::reseed_upon_pid_change(global_state());
        Self(())
    }
}

impl Default for GlobalRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandSource for GlobalRng {
    fn next_u64(&mut self) -> u64 {
        let state = global_state();
        let prev = match state.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |x| Some(step(x)))
        {
            Ok(x) | Err(x) => x,
        };
        scramble(step(prev))
    }
}

fn global_state() -> &'static AtomicU64 {
    static STATE: OnceLock<AtomicU64> = OnceLock::new();
    STATE.get_or_init(|| AtomicU64::new(entropy_seed()))
}

/// Mixes several independent environmental sources into a non-zero seed.
///
/// The sources are OS randomness, the process ID combined with a heap address, the stack
/// address, the wall-clock time, and the monotonic clock. None of this has to be
/// cryptographically strong; it only has to differ between processes started at the same moment.
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub(crate) fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    let os = match rand::RngCore::try_fill_bytes(&mut rand::rngs::OsRng, &mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "OS entropy unavailable, seeding from process state only");
            0
        }
    };

    let marker = Box::new(0u8);
    let identity = (u64::from(std::process::id()) << 32) ^ (&*marker as *const u8 as u64);
    let stack = &buf as *const [u8; 8] as u64;
    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64);
    let ticks = {
        let mut hasher = DefaultHasher::new();
        Instant::now().hash(&mut hasher);
        hasher.finish()
    };

    XorShift64Star::new(os ^ identity ^ stack.rotate_left(17) ^ wall ^ ticks).state()
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::process;
    use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

    /// Remembers the last observed process ID. Zero means none observed yet.
    pub(super) struct PidTracker(AtomicU32);

    impl PidTracker {
        pub(super) const fn new() -> Self {
            Self(AtomicU32::new(0))
        }

        /// Records `pid` and returns `true` if it differs from a previously recorded one.
        pub(super) fn observe(&self, pid: u32) -> bool {
            let last = self.0.swap(pid, Ordering::Relaxed);
            last != 0 && last != pid
        }
    }

    static PID: PidTracker = PidTracker::new();

    /// Reseeds `state` when the process ID differs from the one last observed.
    pub fn reseed_upon_pid_change(state: &AtomicU64) {
        if PID.observe(process::id()) {
            state.store(super::entropy_seed(), Ordering::Relaxed);
        }
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    use std::sync::atomic::AtomicU64;

    pub fn reseed_upon_pid_change(_: &AtomicU64) {}
}
