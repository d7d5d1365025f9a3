//! Targets the flock is drawn towards, and the idle mode that switches the
//! attraction off when nobody has been tracked for a while.

use alloc::vec::Vec;
use core::time::Duration;

use crate::Vector2D;

/// How long without any tracked target before the flock goes idle
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Everything the engine needs to know about targets for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetFrame {
    /// Screen-space points in tracker order. Points outside the viewport are
    /// valid attractors.
    pub targets: Vec<Vector2D>,
    pub idle: bool,
}

impl TargetFrame {
    pub fn new(targets: Vec<Vector2D>, idle: bool) -> Self {
        Self { targets, idle }
    }

    pub fn active(targets: Vec<Vector2D>) -> Self {
        Self::new(targets, false)
    }

    pub fn idle() -> Self {
        Self::new(Vec::new(), true)
    }

    pub fn is_attracting(&self) -> bool {
        !self.idle && !self.targets.is_empty()
    }
}

/// Source of per-frame target snapshots. Sampling must not block; a provider
/// hands over whatever it last observed.
pub trait TargetProvider {
    fn sample(&mut self) -> TargetFrame;
}

impl<F> TargetProvider for F
where
    F: FnMut() -> TargetFrame,
{
    fn sample(&mut self) -> TargetFrame {
        self()
    }
}

/// Fixed targets that never go idle
#[derive(Debug, Clone, Default)]
pub struct StaticTargets {
    pub targets: Vec<Vector2D>,
}

impl StaticTargets {
    pub fn new(targets: Vec<Vector2D>) -> Self {
        Self { targets }
    }
}

impl TargetProvider for StaticTargets {
    fn sample(&mut self) -> TargetFrame {
        TargetFrame::active(self.targets.clone())
    }
}

/// Tracks when a target was last seen on a caller-supplied clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleTracker {
    timeout: Duration,
    last_seen: Duration,
}

impl Default for IdleTracker {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl IdleTracker {
    /// The clock is taken to start at zero, so a fresh tracker only reports
    /// idle once `timeout` has passed without a sighting.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_seen: Duration::ZERO,
        }
    }

    pub fn last_seen(&self) -> Duration {
        self.last_seen
    }

    /// Record an observation at `now` and report whether the flock is idle
    pub fn observe(&mut self, now: Duration, targets_present: bool) -> bool {
        if targets_present {
            self.last_seen = now;
        }
        self.is_idle(now)
    }

    pub fn is_idle(&self, now: Duration) -> bool {
        now.saturating_sub(self.last_seen) > self.timeout
    }
}

/// Latest output of a hand tracker plus its idle state
#[derive(Debug, Clone, Default)]
pub struct TrackedTargets {
    targets: Vec<Vector2D>,
    tracker: IdleTracker,
    now: Duration,
}

impl TrackedTargets {
    pub fn new(timeout: Duration) -> Self {
        Self {
            targets: Vec::new(),
            tracker: IdleTracker::new(timeout),
            now: Duration::ZERO,
        }
    }

    /// Replace the current targets with what the tracker saw at `now`. An
    /// empty observation clears them.
    pub fn observe(&mut self, now: Duration, points: impl IntoIterator<Item = Vector2D>) {
        self.targets.clear();
        self.targets.extend(points);
        self.now = now;
        self.tracker.observe(now, !self.targets.is_empty());
    }

    /// Advance the clock without a new observation
    pub fn tick(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn targets(&self) -> &[Vector2D] {
        &self.targets
    }

    pub fn is_idle(&self) -> bool {
        self.tracker.is_idle(self.now)
    }
}

impl TargetProvider for TrackedTargets {
    fn sample(&mut self) -> TargetFrame {
        TargetFrame::new(self.targets.clone(), self.is_idle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_target_frame_attracting() {
        assert!(TargetFrame::active(vec![Vector2D::zero()]).is_attracting());
        assert!(!TargetFrame::active(vec![]).is_attracting());
        assert!(!TargetFrame::new(vec![Vector2D::zero()], true).is_attracting());
        assert!(!TargetFrame::idle().is_attracting());
    }

    #[test]
    fn test_idle_tracker_starts_active() {
        let tracker = IdleTracker::default();
        assert!(!tracker.is_idle(ms(0)));
        assert!(!tracker.is_idle(ms(3000)));
        assert!(tracker.is_idle(ms(3001)));
    }

    #[test]
    fn test_idle_tracker_resets_on_sighting() {
        let mut tracker = IdleTracker::new(ms(100));
        assert!(tracker.observe(ms(150), false));
        assert!(!tracker.observe(ms(200), true));
        assert!(!tracker.observe(ms(300), false));
        assert!(tracker.observe(ms(301), false));
        assert_eq!(tracker.last_seen(), ms(200));
    }

    #[test]
    fn test_clock_going_backwards_is_not_idle() {
        let mut tracker = IdleTracker::new(ms(100));
        tracker.observe(ms(500), true);
        assert!(!tracker.is_idle(ms(10)));
    }

    #[test]
    fn test_tracked_targets_keep_only_latest_observation() {
        let mut tracked = TrackedTargets::new(ms(1000));
        tracked.observe(ms(10), vec![Vector2D::new(1.0, 2.0), Vector2D::new(3.0, 4.0)]);
        assert_eq!(tracked.targets().len(), 2);

        tracked.observe(ms(20), vec![Vector2D::new(5.0, 6.0)]);
        let frame = tracked.sample();
        assert_eq!(frame.targets, vec![Vector2D::new(5.0, 6.0)]);
        assert!(!frame.idle);

        tracked.observe(ms(30), Vec::new());
        assert!(tracked.sample().targets.is_empty());
    }

    #[test]
    fn test_tracked_targets_go_idle() {
        let mut tracked = TrackedTargets::new(ms(1000));
        tracked.observe(ms(500), vec![Vector2D::new(1.0, 1.0)]);
        tracked.tick(ms(1500));
        assert!(!tracked.is_idle());
        tracked.tick(ms(1501));
        assert!(tracked.sample().idle);
    }

    #[test]
    fn test_closure_provider() {
        let mut calls = 0;
        let mut provider = || {
            calls += 1;
            TargetFrame::idle()
        };
        assert!(provider.sample().idle);
        assert!(TargetProvider::sample(&mut provider).idle);
        drop(provider);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_static_targets_never_idle() {
        let mut provider = StaticTargets::new(vec![Vector2D::new(10.0, 10.0)]);
        let frame = provider.sample();
        assert!(frame.is_attracting());
        assert_eq!(frame.targets.len(), 1);
    }
}
