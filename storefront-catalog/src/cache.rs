//! Snapshot freshness and the clock it is measured against.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use storefront_core::{Snapshot, SnapshotOrigin};

/// How long snapshots stay fresh, by origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// Window for snapshots fetched from the remote service.
    pub ttl: Duration,
    /// Window for snapshots built from the static dataset. Zero retries the
    /// network on every call.
    pub fallback_retry: Duration,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            ttl: crate::config::DEFAULT_TTL,
            fallback_retry: crate::config::DEFAULT_FALLBACK_RETRY,
        }
    }
}

impl FreshnessPolicy {
    pub fn window(&self, origin: SnapshotOrigin) -> Duration {
        match origin {
            SnapshotOrigin::Live => self.ttl,
            SnapshotOrigin::Fallback => self.fallback_retry,
        }
    }
}

/// Whether `snapshot` can be served at `now` without refetching.
/// A snapshot stamped in the future (clock moved backwards) counts as age zero.
pub fn is_fresh(snapshot: &Snapshot, now: DateTime<Utc>, policy: &FreshnessPolicy) -> bool {
    let age = snapshot.age(now).to_std().unwrap_or(Duration::ZERO);
    age < policy.window(snapshot.origin())
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    #[test]
    fn test_live_snapshot_fresh_until_ttl() {
        let policy = FreshnessPolicy::default();
        let snap = Snapshot::empty(at(0), SnapshotOrigin::Live);
        assert!(is_fresh(&snap, at(0), &policy));
        assert!(is_fresh(&snap, at(299), &policy));
        assert!(!is_fresh(&snap, at(300), &policy));
    }

    #[test]
    fn test_fallback_snapshot_uses_shorter_window() {
        let policy = FreshnessPolicy::default();
        let snap = Snapshot::empty(at(0), SnapshotOrigin::Fallback);
        assert!(is_fresh(&snap, at(29), &policy));
        assert!(!is_fresh(&snap, at(30), &policy));

        let always_retry = FreshnessPolicy {
            fallback_retry: Duration::ZERO,
            ..policy
        };
        assert!(!is_fresh(&snap, at(0), &always_retry));
    }

    #[test]
    fn test_future_stamp_counts_as_fresh() {
        let snap = Snapshot::empty(at(60), SnapshotOrigin::Live);
        assert!(is_fresh(&snap, at(0), &FreshnessPolicy::default()));
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(at(0));
        clock.advance(Duration::from_secs(90));
        assert_eq!(clock.now(), at(90));
        clock.set(at(5));
        assert_eq!(clock.now(), at(5));
    }
}
