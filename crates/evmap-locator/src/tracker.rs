//! Live position slot and the fix throttle in front of it.
//!
//! [`LocationTracker`] holds exactly one `Option<UserPosition>`. Each publish
//! replaces it; readers only ever see the latest value, so superseded fixes
//! are simply gone. Subscriptions are scoped: dropping a
//! [`PositionSubscription`] detaches it, after which nothing is delivered to
//! it.

use chrono::TimeDelta;
use evmap_core::AppConfig;
use tokio::sync::watch;

use crate::distance::distance_km;
use crate::error::LocatorError;
use crate::position::{PositionFix, UserPosition};

#[derive(Debug)]
pub struct LocationTracker {
    tx: watch::Sender<Option<UserPosition>>,
}

impl LocationTracker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replace the current position, returning the one it superseded.
    pub fn publish(&self, position: UserPosition) -> Option<UserPosition> {
        self.tx.send_replace(Some(position))
    }

    #[must_use]
    pub fn current(&self) -> Option<UserPosition> {
        *self.tx.borrow()
    }

    /// Start receiving updates. Only publishes after this call count as
    /// changes; the current value is available via
    /// [`PositionSubscription::latest`].
    #[must_use]
    pub fn subscribe(&self) -> PositionSubscription {
        PositionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct PositionSubscription {
    rx: watch::Receiver<Option<UserPosition>>,
}

impl PositionSubscription {
    #[must_use]
    pub fn latest(&self) -> Option<UserPosition> {
        *self.rx.borrow()
    }

    /// Wait for the next publish and return the position it left in the slot.
    ///
    /// Several publishes between two calls collapse into one change carrying
    /// the newest value.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::TrackerClosed`] once the tracker is dropped.
    pub async fn changed(&mut self) -> Result<Option<UserPosition>, LocatorError> {
        self.rx
            .changed()
            .await
            .map_err(|_| LocatorError::TrackerClosed)?;
        Ok(*self.rx.borrow_and_update())
    }
}

impl Drop for PositionSubscription {
    fn drop(&mut self) {
        tracing::debug!("location subscription released");
    }
}

/// Rate bounds applied to incoming fixes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    pub min_movement_meters: f64,
    pub fastest_interval: TimeDelta,
}

impl TrackerOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let fastest_interval = i64::try_from(config.fastest_interval_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            min_movement_meters: config.min_movement_meters,
            fastest_interval,
        }
    }
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            min_movement_meters: 5.0,
            fastest_interval: TimeDelta::milliseconds(2000),
        }
    }
}

/// Drops fixes that arrive too soon or move too little.
///
/// Compared against the last *admitted* fix. A fix stamped earlier than that
/// one is judged on movement alone.
#[derive(Debug, Clone)]
pub struct FixFilter {
    options: TrackerOptions,
    last: Option<PositionFix>,
}

impl FixFilter {
    #[must_use]
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    pub fn admit(&mut self, fix: PositionFix) -> bool {
        let Some(last) = self.last else {
            self.last = Some(fix);
            return true;
        };

        let moved_meters =
            distance_km(last.position.coordinates(), fix.position.coordinates()) * 1000.0;
        if moved_meters < self.options.min_movement_meters {
            return false;
        }

        let elapsed = fix.received_at - last.received_at;
        if elapsed >= TimeDelta::zero() && elapsed < self.options.fastest_interval {
            return false;
        }

        self.last = Some(fix);
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
    }

    fn fix(lat: f64, lng: f64, ms: i64) -> PositionFix {
        PositionFix::new(UserPosition::new(lat, lng), at(ms))
    }

    #[test]
    fn tracker_starts_empty() {
        let tracker = LocationTracker::new();
        assert!(tracker.current().is_none());
        assert!(tracker.subscribe().latest().is_none());
    }

    #[test]
    fn publish_replaces_and_returns_previous() {
        let tracker = LocationTracker::new();
        assert_eq!(tracker.publish(UserPosition::new(1.0, 2.0)), None);
        assert_eq!(
            tracker.publish(UserPosition::new(3.0, 4.0)),
            Some(UserPosition::new(1.0, 2.0))
        );
        assert_eq!(tracker.current(), Some(UserPosition::new(3.0, 4.0)));
    }

    #[tokio::test]
    async fn superseded_fixes_collapse_into_latest() {
        let tracker = LocationTracker::new();
        let mut sub = tracker.subscribe();

        tracker.publish(UserPosition::new(1.0, 1.0));
        tracker.publish(UserPosition::new(2.0, 2.0));
        tracker.publish(UserPosition::new(3.0, 3.0));

        let seen = sub.changed().await.unwrap();
        assert_eq!(seen, Some(UserPosition::new(3.0, 3.0)));

        drop(tracker);
        assert!(matches!(
            sub.changed().await,
            Err(LocatorError::TrackerClosed)
        ));
    }

    #[tokio::test]
    async fn updates_cross_tasks() {
        let tracker = LocationTracker::new();
        let mut sub = tracker.subscribe();

        let writer = tokio::spawn(async move {
            tracker.publish(UserPosition::new(28.6, 77.2));
        });

        let seen = sub.changed().await.unwrap();
        assert_eq!(seen, Some(UserPosition::new(28.6, 77.2)));
        writer.await.unwrap();
        assert!(sub.changed().await.is_err());
    }

    #[test]
    fn dropping_subscription_releases_it() {
        let tracker = LocationTracker::new();
        let first = tracker.subscribe();
        let second = tracker.subscribe();
        assert_eq!(tracker.subscriber_count(), 2);
        drop(first);
        assert_eq!(tracker.subscriber_count(), 1);
        {
            let _scoped = tracker.subscribe();
            assert_eq!(tracker.subscriber_count(), 2);
        }
        assert_eq!(tracker.subscriber_count(), 1);
        drop(second);
        assert_eq!(tracker.subscriber_count(), 0);
    }

    #[test]
    fn filter_admits_first_fix() {
        let mut filter = FixFilter::new(TrackerOptions::default());
        assert!(filter.admit(fix(28.6315, 77.2167, 0)));
    }

    #[test]
    fn filter_drops_small_movement() {
        let mut filter = FixFilter::new(TrackerOptions::default());
        assert!(filter.admit(fix(28.6315, 77.2167, 0)));
        // ~1 m north, well after the interval
        assert!(!filter.admit(fix(28.631_509, 77.2167, 10_000)));
    }

    #[test]
    fn filter_drops_fixes_inside_fastest_interval() {
        let mut filter = FixFilter::new(TrackerOptions::default());
        assert!(filter.admit(fix(28.6315, 77.2167, 0)));
        assert!(!filter.admit(fix(28.6330, 77.2190, 1_500)));
        assert!(filter.admit(fix(28.6330, 77.2190, 2_000)));
    }

    #[test]
    fn filter_compares_against_last_admitted_fix() {
        let mut filter = FixFilter::new(TrackerOptions::default());
        assert!(filter.admit(fix(28.6315, 77.2167, 0)));
        assert!(!filter.admit(fix(28.6330, 77.2190, 1_000)));
        // Still measured from t=0, not from the dropped fix at t=1000.
        assert!(filter.admit(fix(28.6330, 77.2190, 2_500)));
    }

    #[test]
    fn filter_judges_out_of_order_fix_on_movement_only() {
        let mut filter = FixFilter::new(TrackerOptions::default());
        assert!(filter.admit(fix(28.6315, 77.2167, 5_000)));
        assert!(filter.admit(fix(28.6330, 77.2190, 4_000)));
        assert!(!filter.admit(fix(28.6330, 77.2190, 3_000)));
    }

    #[test]
    fn zero_bounds_admit_everything_distinct_or_not() {
        let mut filter = FixFilter::new(TrackerOptions {
            min_movement_meters: 0.0,
            fastest_interval: TimeDelta::zero(),
        });
        assert!(filter.admit(fix(1.0, 1.0, 0)));
        assert!(filter.admit(fix(1.0, 1.0, 0)));
    }

    #[test]
    fn options_from_config() {
        let config = AppConfig {
            env: evmap_core::Environment::Test,
            log_level: "info".to_string(),
            catalog_path: None,
            default_center: evmap_core::Coordinates::new(0.0, 0.0),
            region_delta: 0.012,
            min_movement_meters: 12.5,
            fastest_interval_ms: 750,
        };
        let options = TrackerOptions::from_config(&config);
        assert!((options.min_movement_meters - 12.5).abs() < f64::EPSILON);
        assert_eq!(options.fastest_interval, TimeDelta::milliseconds(750));
    }
}
