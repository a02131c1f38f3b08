//! The `Need` leaf type.
//!
//! Contract: `decay` is the only way a level goes down, `restore` the only
//! way it goes up, and both clamp to `[0, max]`.  Between restorations the
//! level is therefore monotonically non-increasing.  All projections
//! (`time_to_threshold`, `time_to_level`) are pure reads so the scheduler
//! can query them speculatively.

use viv_core::Tick;

use crate::NeedKind;

/// A decaying scalar quantity with a critical threshold.
///
/// Owned exclusively by one person; nothing outside that person mutates it.
#[derive(Clone, Debug)]
pub struct Need {
    pub kind: NeedKind,
    level: f64,
    initial_level: f64,
    /// Upper bound on `level`.
    pub max: f64,
    /// Decay in units per simulated minute.  A rate ≤ 0 means the need never
    /// becomes critical on its own.
    pub rate_per_min: f64,
    /// The need is *critical* once `level <= threshold`.
    pub threshold: f64,
}

impl Need {
    /// Construct a need.  Inputs are pre-validated by the population
    /// builder; here they are only clamped into shape.
    pub fn new(kind: NeedKind, level: f64, max: f64, rate_per_min: f64, threshold: f64) -> Self {
        let max = max.max(0.0);
        let level = level.clamp(0.0, max);
        Self {
            kind,
            level,
            initial_level: level,
            max,
            rate_per_min,
            threshold: threshold.clamp(0.0, max),
        }
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// `true` once the level has reached the critical threshold.
    #[inline]
    pub fn is_critical(&self) -> bool {
        self.level <= self.threshold
    }

    /// Reduce the level by `rate · Δt`, clamped at 0.
    pub fn decay(&mut self, dt_mins: u64) {
        if self.rate_per_min <= 0.0 {
            return;
        }
        self.level = (self.level - self.rate_per_min * dt_mins as f64).max(0.0);
    }

    /// Increase the level by `amount`, clamped at `max`.
    pub fn restore(&mut self, amount: f64) {
        self.level = (self.level + amount.max(0.0)).min(self.max);
    }

    /// Minutes until the level would cross the critical threshold, rounded
    /// up to whole minutes.  Returns `Some(0)` if already critical and
    /// `None` if the rate is ≤ 0 (the level never falls).
    pub fn time_to_threshold(&self) -> Option<u64> {
        self.time_to_level(self.threshold)
    }

    /// Minutes until the level would reach `target`, rounded up.
    /// `Some(0)` if already there; `None` if the rate is ≤ 0.
    pub fn time_to_level(&self, target: f64) -> Option<u64> {
        if self.rate_per_min <= 0.0 {
            return None;
        }
        if self.level <= target {
            return Some(0);
        }
        Some(((self.level - target) / self.rate_per_min).ceil() as u64)
    }

    /// Signed minutes to threshold: negative once the need is overdue.
    /// This is the raw bid-score ingredient — comparable across needs
    /// because every need measures urgency in minutes.
    ///
    /// `None` if the rate is ≤ 0 (the need never bids).
    pub fn signed_minutes_to_threshold(&self) -> Option<f64> {
        if self.rate_per_min <= 0.0 {
            return None;
        }
        Some((self.level - self.threshold) / self.rate_per_min)
    }

    /// Absolute tick at which this need crosses its threshold, assuming
    /// uninterrupted decay from `now`.  `None` if it never will, or if it
    /// already has (past crossings are not future events).
    pub fn threshold_crossing(&self, now: Tick) -> Option<Tick> {
        match self.time_to_threshold() {
            Some(dt) if dt > 0 => Some(now.offset(dt)),
            _ => None,
        }
    }

    /// Restore the level recorded at construction time.  Start-of-run only.
    pub fn reset(&mut self) {
        self.level = self.initial_level;
    }
}
