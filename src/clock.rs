//! Millisecond Unix time derived from the monotonic clock.
//!
//! The wall clock is read once per process to anchor an [`Instant`]; afterwards every reading is
//! that anchor plus the monotonic time elapsed since, so time-based construction costs one
//! monotonic clock read and never observes wall-clock adjustments made after the anchor.

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::Error;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// The monotonic instant paired with the wall-clock time read at the same moment.
#[derive(Debug)]
struct Anchor {
    instant: Instant,

    /// Signed milliseconds since the Unix epoch; negative if the wall clock was set before it.
    unix_ms: i128,
}

impl Anchor {
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    fn capture() -> Self {
        let instant = Instant::now();
        let unix_ms = signed_unix_ms(SystemTime::now());
        Self { instant, unix_ms }
    }
}

/// Returns the process-wide anchor, capturing it on first use.
fn anchor() -> &'static Anchor {
    static ANCHOR: OnceLock<Anchor> = OnceLock::new();
    ANCHOR.get_or_init(Anchor::capture)
}

fn signed_unix_ms(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i128,
        Err(err) => -(err.duration().as_millis() as i128),
    }
}

fn to_unsigned(unix_ms: i128) -> Result<u64, Error> {
    u64::try_from(unix_ms).map_err(|_| Error::ClockBeforeEpoch)
}

/// Returns the current Unix time in milliseconds.
///
/// # Errors
///
/// Returns [`Error::ClockBeforeEpoch`] if the wall clock was set before the Unix epoch when the
/// process-wide anchor was captured.
pub fn unix_ts_ms() -> Result<u64, Error> {
    instant_to_unix_ts_ms(Instant::now())
}

/// Converts a monotonic [`Instant`] into Unix milliseconds through the process-wide anchor.
///
/// # Errors
///
/// Returns [`Error::ClockBeforeEpoch`] if the result would precede the Unix epoch.
pub fn instant_to_unix_ts_ms(instant: Instant) -> Result<u64, Error> {
    let anchor = anchor();
    let unix_ms = match instant.checked_duration_since(anchor.instant) {
        Some(elapsed) => anchor.unix_ms + elapsed.as_millis() as i128,
        None => anchor.unix_ms - anchor.instant.duration_since(instant).as_millis() as i128,
    };
    to_unsigned(unix_ms)
}

/// Converts a [`SystemTime`] into Unix milliseconds.
///
/// # Errors
///
/// Returns [`Error::ClockBeforeEpoch`] if `time` precedes the Unix epoch.
pub fn system_time_to_unix_ts_ms(time: SystemTime) -> Result<u64, Error> {
    to_unsigned(signed_unix_ms(time))
}

/// Converts Unix milliseconds back into a [`SystemTime`].
pub fn unix_ts_ms_to_system_time(unix_ts_ms: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(unix_ts_ms)
}
