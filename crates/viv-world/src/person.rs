//! The `Person` — an agent with needs, a state machine, and a diary.

use viv_activity::{ActivityKind, Bidder, ShiftWindow};
use viv_core::{ActivityId, HomeId, LocaleId, PersonId, Tick};
use viv_need::NeedSet;

// ── PersonState ───────────────────────────────────────────────────────────────

/// Per-agent state machine.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PersonState {
    /// No in-flight activity; consumes standard advertisements.
    #[default]
    Idle,
    /// Committed to the activity in `Person::active`.
    Committed,
    /// Committed to a preempting activity while an interrupted one waits in
    /// the `Person::interruption` slot.
    Preempted,
}

// ── Interruption ──────────────────────────────────────────────────────────────

/// Resumable state for a preempted activity: enough to pick the use back up
/// without restarting from scratch.  The interrupted slot keeps its asset
/// occupancy, so resumption never re-bids for capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Interruption {
    pub activity: ActivityId,
    /// When the interrupted use first began.
    pub activity_start: Tick,
    pub remaining_mins: u64,
}

// ── DiaryEntry ────────────────────────────────────────────────────────────────

/// One contiguous interval of one activity, `[start, end)`.  An interrupted
/// use produces one entry per segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiaryEntry {
    pub start: Tick,
    pub end: Tick,
    pub kind: ActivityKind,
}

// ── Person ────────────────────────────────────────────────────────────────────

/// An agent.  Owned by exactly one home for its simulated lifetime.
#[derive(Clone, Debug)]
pub struct Person {
    pub id: PersonId,
    pub home: HomeId,
    /// Where the person currently is; toggled by completed commutes.
    pub locale: LocaleId,
    pub home_locale: LocaleId,
    /// `INVALID` for persons who do not work.
    pub work_locale: LocaleId,
    pub state: PersonState,
    pub needs: NeedSet,
    /// Currently bound activity slot; `INVALID` while idle.
    pub active: ActivityId,
    pub interruption: Option<Interruption>,
    pub diary: Vec<DiaryEntry>,
    /// Nominal shift window; `None` for non-workers.
    pub base_shift: Option<ShiftWindow>,
    /// Today's effective window (base plus the daily re-seeded jitter).
    pub shift: Option<ShiftWindow>,
    /// Household revenue earned per worked minute.
    pub pay_rate_per_min: f64,
}

impl Person {
    pub fn new(id: PersonId, home: HomeId, home_locale: LocaleId, needs: NeedSet) -> Self {
        Self {
            id,
            home,
            locale: home_locale,
            home_locale,
            work_locale: LocaleId::INVALID,
            state: PersonState::Idle,
            needs,
            active: ActivityId::INVALID,
            interruption: None,
            diary: Vec::new(),
            base_shift: None,
            shift: None,
            pay_rate_per_min: 0.0,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == PersonState::Idle
    }

    /// The read-only view slots bid against.
    pub fn bidder(&self) -> Bidder<'_> {
        Bidder {
            person: self.id,
            needs: &self.needs,
            shift: self.shift,
            idle: self.is_idle(),
        }
    }

    /// Where a completed commute takes this person.
    pub fn commute_target(&self) -> LocaleId {
        if self.locale == self.home_locale && self.work_locale.is_valid() {
            self.work_locale
        } else {
            self.home_locale
        }
    }

    /// Append a diary interval; zero-length segments are dropped.
    pub fn record(&mut self, start: Tick, end: Tick, kind: ActivityKind) {
        if end > start {
            self.diary.push(DiaryEntry { start, end, kind });
        }
    }

    /// Restore construction-time state for a fresh run over the same
    /// population.  Start-of-run only.
    pub fn reset(&mut self) {
        self.needs.reset();
        self.state = PersonState::Idle;
        self.active = ActivityId::INVALID;
        self.interruption = None;
        self.diary.clear();
        self.locale = self.home_locale;
        self.shift = self.base_shift;
    }
}
