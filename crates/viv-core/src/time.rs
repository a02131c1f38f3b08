//! Simulation time model.
//!
//! # Design
//!
//! The canonical time unit is the simulated minute, held in a monotonically
//! increasing `Tick` counter.  The engine is discrete-event: it never steps
//! minute-by-minute but jumps straight to the next tick at which some state
//! can change, so `SimClock::advance_to` takes an absolute target rather
//! than incrementing.
//!
//! Using an integer minute as the canonical unit keeps all schedule
//! arithmetic exact (no floating-point drift) and comparisons O(1).  Need
//! levels are real-valued; only *when* things happen is integral.

use std::fmt;

/// Simulated minutes per day.
pub const MINUTES_PER_DAY: u64 = 1_440;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulated minute counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` minutes after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Minutes elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Zero-based day index this tick falls in.
    #[inline]
    pub fn day(self) -> u64 {
        self.0 / MINUTES_PER_DAY
    }

    /// Minute within the current day, in `0..MINUTES_PER_DAY`.
    #[inline]
    pub fn minute_of_day(self) -> u64 {
        self.0 % MINUTES_PER_DAY
    }

    /// First tick of the next day (minute 0).  Always strictly after `self`.
    #[inline]
    pub fn next_day_start(self) -> Tick {
        Tick((self.day() + 1) * MINUTES_PER_DAY)
    }

    /// The next tick at or after `self` whose minute-of-day equals
    /// `minute` (which must be `< MINUTES_PER_DAY`).
    pub fn next_at_minute_of_day(self, minute: u64) -> Tick {
        debug_assert!(minute < MINUTES_PER_DAY);
        let today = Tick(self.day() * MINUTES_PER_DAY + minute);
        if today >= self { today } else { today.offset(MINUTES_PER_DAY) }
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T{} (day {} {:02}:{:02})",
            self.0,
            self.day(),
            self.minute_of_day() / 60,
            self.minute_of_day() % 60
        )
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The event clock.  Holds the current tick and enforces that time only
/// moves forward, in jumps.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `target`.
    ///
    /// # Panics
    /// Panics in debug mode if `target < current_tick` — the event loop must
    /// never move backwards.
    #[inline]
    pub fn advance_to(&mut self, target: Tick) {
        debug_assert!(target >= self.current_tick, "clock moved backwards");
        self.current_tick = target;
    }

    /// Reset to tick zero for a fresh run over the same population.
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically constructed by the application crate and passed to
/// `UniverseBuilder`.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Simulation horizon in minutes (exclusive upper bound).
    /// For 7 days: 7 * 1440 = 10,080.
    pub horizon_mins: u64,

    /// Master RNG seed.  The same seed always produces identical diaries.
    pub seed: u64,

    /// Audit the world invariants at every tick boundary.  A violation is
    /// fatal and terminates the run; disable only for large batch studies
    /// where the population has already been validated.
    pub validate_invariants: bool,
}

impl SimConfig {
    /// A seven-day run with invariant auditing on.
    pub fn new(horizon_days: u64, seed: u64) -> Self {
        Self {
            horizon_mins: horizon_days * MINUTES_PER_DAY,
            seed,
            validate_invariants: true,
        }
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_mins)
    }
}
