//! Advertisement scoring — how a free slot bids for a person's attention.
//!
//! # Scoring contract
//!
//! Scores are totally ordered reals (`NotNan<f64>`); **lower is more
//! urgent**.  `None` means abstain, the normal path when a precondition is
//! unmet — never an error.  The raw ingredient for every kind is the
//! matching need's *signed minutes to threshold*: positive while the need is
//! healthy, zero at the crossing, increasingly negative as it goes overdue.
//! Measuring urgency in minutes keeps scores comparable across kinds.
//!
//! A standard bid is offered once the need is critical (score ≤ 0).  An
//! interruption bid carries a fixed penalty of [`PREEMPT_PENALTY_MINS`] and
//! must still beat the current activity's continuation score of
//! [`CONTINUATION_SCORE`], so preemption only happens when the competing
//! need is overdue by more than the penalty — a strictly higher bar that
//! prevents thrashing.
//!
//! Ties resolve by (score, person id, activity id), never by iteration
//! order, so runs are reproducible for a fixed seed.

use std::cmp::Ordering;

use ordered_float::NotNan;

use viv_core::{ActivityId, AssetId, PersonId, Tick};

use crate::{Activity, ActivityKind};
use viv_need::NeedSet;

/// Cost of abandoning an in-flight activity, in score units (minutes).
pub const PREEMPT_PENALTY_MINS: f64 = 30.0;

/// The implicit bid of the currently active activity to keep running.
pub const CONTINUATION_SCORE: f64 = 0.0;

// ── ShiftWindow ───────────────────────────────────────────────────────────────

/// A daily time-of-day window `[start, end)` in minutes from midnight,
/// `start < end` (overnight shifts are not modeled).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start_min: u64,
    pub end_min: u64,
}

impl ShiftWindow {
    pub fn new(start_min: u64, end_min: u64) -> Self {
        debug_assert!(start_min < end_min, "shift must start before it ends");
        debug_assert!(end_min <= viv_core::MINUTES_PER_DAY);
        Self { start_min, end_min }
    }

    /// `true` while `now` falls inside the window.
    #[inline]
    pub fn contains(&self, now: Tick) -> bool {
        let m = now.minute_of_day();
        m >= self.start_min && m < self.end_min
    }

    /// Minutes of the window left after `now`; 0 outside the window.
    pub fn minutes_remaining(&self, now: Tick) -> u64 {
        if self.contains(now) {
            self.end_min - now.minute_of_day()
        } else {
            0
        }
    }

    /// Absolute tick of the next window opening at or after `now`.
    pub fn next_start(&self, now: Tick) -> Tick {
        now.next_at_minute_of_day(self.start_min)
    }

    /// The window moved by `offset` minutes, clamped inside the day.
    /// Used for daily re-seeded shift jitter.
    pub fn shifted(&self, offset: i64) -> ShiftWindow {
        let len = self.end_min - self.start_min;
        let max_start = viv_core::MINUTES_PER_DAY - len;
        let start = (self.start_min as i64 + offset).clamp(0, max_start as i64) as u64;
        ShiftWindow { start_min: start, end_min: start + len }
    }
}

// ── Bidder ────────────────────────────────────────────────────────────────────

/// Read-only view of the person a slot is bidding for.
///
/// `viv-world` assembles this from the person arena; the slot itself never
/// touches person state directly, which keeps the broadcast a pure read.
pub struct Bidder<'a> {
    pub person: PersonId,
    pub needs: &'a NeedSet,
    /// The person's current shift window; `None` for non-workers.
    pub shift: Option<ShiftWindow>,
    /// `true` when the person has no in-flight activity.
    pub idle: bool,
}

// ── Advertisement ─────────────────────────────────────────────────────────────

/// A scored offer from one slot to one person, produced during a broadcast
/// and consumed within the same decision round.  Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advertisement {
    pub score: NotNan<f64>,
    pub asset: AssetId,
    pub activity: ActivityId,
    pub person: PersonId,
}

impl Ord for Advertisement {
    /// Deterministic total order: score, then person id, then activity id.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.person.cmp(&other.person))
            .then(self.activity.cmp(&other.activity))
    }
}

impl PartialOrd for Advertisement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

impl Activity {
    /// Standard bid: offered to an idle person whose matching need is
    /// critical, from a free slot, inside the kind's time-of-day window.
    ///
    /// Returns the score or `None` to abstain.
    pub fn advertise(&self, bidder: &Bidder<'_>, now: Tick) -> Option<NotNan<f64>> {
        if !self.is_free() || !bidder.idle {
            return None;
        }
        let urgency = self.urgency(bidder, now)?;
        if urgency > 0.0 {
            return None; // not critical yet
        }
        NotNan::new(urgency).ok()
    }

    /// Interruption bid: offered to a committed person, penalized by
    /// [`PREEMPT_PENALTY_MINS`], and only if it still beats the current
    /// activity's [`CONTINUATION_SCORE`].
    pub fn advertise_interruption(&self, bidder: &Bidder<'_>, now: Tick) -> Option<NotNan<f64>> {
        if !self.is_free() || bidder.idle {
            return None;
        }
        let penalized = self.urgency(bidder, now)? + PREEMPT_PENALTY_MINS;
        if penalized > CONTINUATION_SCORE {
            return None;
        }
        NotNan::new(penalized).ok()
    }

    /// Kind-specific raw urgency, or `None` when preconditions are unmet.
    fn urgency(&self, bidder: &Bidder<'_>, now: Tick) -> Option<f64> {
        if self.kind == ActivityKind::Work {
            // Work only bids inside the person's shift window, and only if
            // enough window is left for a non-empty use.
            let shift = bidder.shift?;
            if shift.minutes_remaining(now) == 0 {
                return None;
            }
        }
        let need = bidder.needs.get(self.kind.restores())?;
        need.signed_minutes_to_threshold()
    }
}
