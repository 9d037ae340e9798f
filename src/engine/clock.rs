use std::time::{SystemTime, UNIX_EPOCH};

/// A Clock supplies the instant recorded on each commit, in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> i64;
}

/// The host's wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            // a clock set before 1970
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}

/// A clock frozen at one instant, for reproducible commit hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
