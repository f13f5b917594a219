use chrono::{DateTime, Utc};

/// Source of the current time for arrivals and billing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test_utils"))]
mod manual {
    use super::Clock;
    use chrono::{DateTime, TimeDelta, Utc};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// A clock that only moves when told to. Clones share the same time, so a
    /// test can keep a handle while the garage owns another.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        pub fn advance(&self, by: TimeDelta) {
            *self.now.lock() += by;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new(Utc::now())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }
}
