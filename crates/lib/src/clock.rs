//! Timestamps for new messages.
//!
//! Reducers read time through [`Clock`] so a store can run on wall-clock time
//! ([`SystemClock`]) or, with the `testing` feature, on a [`FixedClock`] that
//! tests move by hand.

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Source of message timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Wall-clock time. Reads before the epoch yield 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Controllable clock for tests.
///
/// Reading the clock returns the current value and moves it one millisecond
/// forward, so consecutive messages get strictly increasing timestamps.
/// [`hold`](Self::hold) pauses that until the returned guard is dropped.
///
/// ```
/// use threadline::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1000);
/// assert_eq!(clock.now_millis(), 1000);
/// assert_eq!(clock.now_millis(), 1001);
///
/// let hold = clock.hold();
/// assert_eq!(clock.now_millis(), clock.now_millis());
/// drop(hold);
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicU64,
    held: AtomicBool,
}

/// Guard returned by [`FixedClock::hold`]; the clock ticks again once dropped.
#[cfg(any(test, feature = "testing"))]
#[must_use = "the clock resumes ticking as soon as the guard is dropped"]
pub struct ClockHold<'a>(&'a FixedClock);

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.0.held.store(false, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    pub fn new(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
            held: AtomicBool::new(false),
        }
    }

    /// Stops the clock from ticking on reads while the guard lives.
    pub fn hold(&self) -> ClockHold<'_> {
        self.held.store(true, Ordering::SeqCst);
        ClockHold(self)
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jumps to `ms`, which may be earlier than the current value.
    pub fn set(&self, ms: u64) {
        self.millis.store(ms, Ordering::SeqCst);
    }

    /// The value the next unheld read will return.
    pub fn get(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        if self.held.load(Ordering::SeqCst) {
            self.get()
        } else {
            self.millis.fetch_add(1, Ordering::SeqCst)
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    /// Starts at 2024-01-01T00:00:00Z.
    fn default() -> Self {
        Self::new(1_704_067_200_000)
    }
}
