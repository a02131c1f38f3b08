//! The `Activity` slot and its transition logic.
//!
//! # Restoration model
//!
//! The restoration amount for one use is fixed when the use begins:
//! `restore_total = need.max − need.level_at_start`, spread linearly over
//! the planned duration.  Interruption applies the pro-rata share earned so
//! far and freezes the remainder; completion applies whatever is left, so an
//! interrupted-then-resumed use restores exactly as much as an uninterrupted
//! one and occupies the asset for exactly the planned duration in total.

use viv_core::{ActivityId, AssetId, PersonId, Tick};

use crate::{ActivityError, ActivityKind};

/// Lifecycle of one activity slot.
///
/// `Advertising` is transient within a single decision round: the engine
/// marks the selected slot, `begin` moves it to `Active`, and losers are
/// cleared back to `Inactive` before time advances.  `Complete` is likewise
/// observable only between [`Activity::complete`] and [`Activity::recycle`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ActivityStatus {
    #[default]
    Inactive,
    Advertising,
    Active,
    Interrupted,
    Complete,
}

/// Result of interrupting an active use: the pro-rata restoration earned so
/// far and the closed diary segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterruptOutcome {
    pub partial_restore: f64,
    pub segment: (Tick, Tick),
}

/// Result of completing a use: who used the slot, what to restore, and the
/// final diary segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedUse {
    pub person: PersonId,
    pub kind: ActivityKind,
    pub restore_amount: f64,
    pub segment: (Tick, Tick),
}

/// A reusable activity slot owned by one asset.
///
/// Created when the asset is constructed, reused across its lifetime, never
/// re-allocated per use.  `user` is a plain index back-reference with no
/// ownership semantics.
#[derive(Clone, Debug)]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    /// Owning asset (non-owning back-reference).
    pub asset: AssetId,
    /// Person bound to the current use; `INVALID` while the slot is free.
    pub user: PersonId,
    pub status: ActivityStatus,
    /// Default planned duration of one use, in minutes.  Work uses override
    /// this with the remaining shift length.
    pub default_mins: u64,

    // ── Per-use state, meaningless while Inactive ─────────────────────────
    /// When the current use first began (survives interruptions).
    pub first_started: Tick,
    /// Start of the current contiguous segment (reset on resume).
    pub segment_start: Tick,
    /// Planned total duration of this use.
    pub planned_mins: u64,
    /// Minutes of the planned duration not yet served.
    pub remaining_mins: u64,
    restore_total: f64,
    restore_rate: f64,
    restored_so_far: f64,
}

impl Activity {
    pub fn new(id: ActivityId, kind: ActivityKind, asset: AssetId, default_mins: u64) -> Self {
        Self {
            id,
            kind,
            asset,
            user: PersonId::INVALID,
            status: ActivityStatus::Inactive,
            default_mins,
            first_started: Tick::ZERO,
            segment_start: Tick::ZERO,
            planned_mins: 0,
            remaining_mins: 0,
            restore_total: 0.0,
            restore_rate: 0.0,
            restored_so_far: 0.0,
        }
    }

    /// `true` while the slot is available for a new use.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.status == ActivityStatus::Inactive
    }

    /// `true` while a use is in flight (active or interrupted).
    #[inline]
    pub fn in_use(&self) -> bool {
        matches!(
            self.status,
            ActivityStatus::Active | ActivityStatus::Interrupted
        )
    }

    /// Absolute end tick of the current segment, if one is running.
    pub fn scheduled_end(&self) -> Option<Tick> {
        match self.status {
            ActivityStatus::Active => Some(self.segment_start.offset(self.remaining_mins)),
            _ => None,
        }
    }

    /// Total restoration applied to the user so far in this use.
    #[inline]
    pub fn restored_so_far(&self) -> f64 {
        self.restored_so_far
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Inactive → Advertising.  Marks the slot as offered in the current
    /// decision round.
    pub fn mark_advertising(&mut self) -> Result<(), ActivityError> {
        match self.status {
            ActivityStatus::Inactive => {
                self.status = ActivityStatus::Advertising;
                Ok(())
            }
            from => Err(ActivityError::Transition {
                from,
                to: ActivityStatus::Advertising,
            }),
        }
    }

    /// Advertising → Inactive.  Clears a losing bid; no-op on a free slot.
    pub fn clear_advertising(&mut self) {
        if self.status == ActivityStatus::Advertising {
            self.status = ActivityStatus::Inactive;
        }
    }

    /// Advertising → Active.  Binds `person` and starts the use.
    ///
    /// `restore_total` is the full amount this use will restore; it is
    /// spread linearly over `planned_mins`.
    pub fn begin(
        &mut self,
        person: PersonId,
        now: Tick,
        planned_mins: u64,
        restore_total: f64,
    ) -> Result<(), ActivityError> {
        if self.status != ActivityStatus::Advertising {
            return Err(ActivityError::Transition {
                from: self.status,
                to: ActivityStatus::Active,
            });
        }
        if planned_mins == 0 {
            return Err(ActivityError::ZeroDuration);
        }
        self.user = person;
        self.status = ActivityStatus::Active;
        self.first_started = now;
        self.segment_start = now;
        self.planned_mins = planned_mins;
        self.remaining_mins = planned_mins;
        self.restore_total = restore_total.max(0.0);
        self.restore_rate = self.restore_total / planned_mins as f64;
        self.restored_so_far = 0.0;
        Ok(())
    }

    /// Active → Interrupted.  Applies the pro-rata restoration for the
    /// elapsed segment and freezes the remainder so the use can resume
    /// without restarting from scratch.
    pub fn interrupt(&mut self, now: Tick) -> Result<InterruptOutcome, ActivityError> {
        if self.status != ActivityStatus::Active {
            return Err(ActivityError::Transition {
                from: self.status,
                to: ActivityStatus::Interrupted,
            });
        }
        let elapsed = now.since(self.segment_start).min(self.remaining_mins);
        let partial = (self.restore_rate * elapsed as f64)
            .min(self.restore_total - self.restored_so_far);
        self.restored_so_far += partial;
        self.remaining_mins -= elapsed;
        self.status = ActivityStatus::Interrupted;
        Ok(InterruptOutcome {
            partial_restore: partial,
            segment: (self.segment_start, now),
        })
    }

    /// Interrupted → Active.  The asset slot was retained across the
    /// interruption, so no capacity check is needed here.
    pub fn resume(&mut self, now: Tick) -> Result<(), ActivityError> {
        if self.status != ActivityStatus::Interrupted {
            return Err(ActivityError::Transition {
                from: self.status,
                to: ActivityStatus::Active,
            });
        }
        self.status = ActivityStatus::Active;
        self.segment_start = now;
        Ok(())
    }

    /// Active | Interrupted → Complete.  Applies the outstanding
    /// restoration; the caller releases the asset slot, records the diary
    /// segment, and then calls [`recycle`](Self::recycle).
    pub fn complete(&mut self, now: Tick) -> Result<CompletedUse, ActivityError> {
        if !self.in_use() {
            return Err(ActivityError::Transition {
                from: self.status,
                to: ActivityStatus::Complete,
            });
        }
        let restore_amount = self.restore_total - self.restored_so_far;
        self.restored_so_far = self.restore_total;
        let segment = (self.segment_start, now);
        self.remaining_mins = 0;
        self.status = ActivityStatus::Complete;
        Ok(CompletedUse {
            person: self.user,
            kind: self.kind,
            restore_amount,
            segment,
        })
    }

    /// Complete → Inactive: ready the slot for the next person.
    pub fn recycle(&mut self) {
        debug_assert_eq!(self.status, ActivityStatus::Complete);
        self.reset();
    }

    /// Force the slot back to a pristine Inactive state.  Start-of-run
    /// only (via `Asset::reset`), never mid-run.
    pub fn reset(&mut self) {
        self.user = PersonId::INVALID;
        self.status = ActivityStatus::Inactive;
        self.first_started = Tick::ZERO;
        self.segment_start = Tick::ZERO;
        self.planned_mins = 0;
        self.remaining_mins = 0;
        self.restore_total = 0.0;
        self.restore_rate = 0.0;
        self.restored_so_far = 0.0;
    }
}
