//! The `Universe` struct and its event loop.

use viv_core::{PersonRng, SimClock, SimConfig, Tick};
use viv_world::{PersonState, World, WorldError};

use crate::{SimResult, UniverseObserver, scheduler};

/// Half-width of the daily shift jitter, in minutes.  Each worker's window
/// is the base window moved by a per-person, per-day uniform offset in
/// `[-JITTER, +JITTER]`.
const SHIFT_JITTER_MINS: i64 = 30;

// ── Universe ──────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Holds the world, the event clock, and the per-person RNGs, and drives
/// the event loop:
///
/// 1. **Jump** — ask the [scheduler][crate::scheduler] for the next tick at
///    which anything can change, and advance the clock straight to it.
/// 2. **Decay** — age every need by the minutes skipped, except needs under
///    active restoration.
/// 3. **Completions** — finish every activity whose scheduled end is now,
///    ascending by slot id.
/// 4. **Decision round** — one pass over all persons in ascending id order:
///    idle persons consume the best standard advertisement, committed
///    persons the best interruption advertisement (interrupting their
///    current activity first).  Sequential commits make the round
///    deterministic; a lost slot is simply re-bid at the next event.
/// 5. **Audit** — verify the world invariants; a violation is fatal.
///
/// Create via [`UniverseBuilder`][crate::UniverseBuilder].
pub struct Universe {
    /// Global configuration (horizon, seed, audit flag).
    pub config: SimConfig,

    /// The event clock.  Jumps, never steps.
    pub clock: SimClock,

    /// All simulation state: persons, homes, assets, activity slots.
    pub world: World,

    /// Per-person deterministic RNGs, parallel to the person arena.
    /// Consumed only for daily shift jitter, so event count never perturbs
    /// the random stream.
    rngs: Vec<PersonRng>,

    /// Number of event rounds processed so far.
    pub events: u64,
}

impl Universe {
    pub(crate) fn new(config: SimConfig, world: World, rngs: Vec<PersonRng>) -> Self {
        Self {
            config,
            clock: SimClock::new(),
            world,
            rngs,
            events: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every event round.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: UniverseObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();

        // Round at tick zero: needs that start critical commit before any
        // simulated time passes.
        if self.clock.current_tick == Tick::ZERO {
            self.process_event(Tick::ZERO, observer)?;
        }

        loop {
            let now = self.clock.current_tick;
            if now >= end {
                break;
            }
            let mut target = scheduler::next_event(&self.world, now);
            if target <= now {
                // The scheduler's day-boundary candidate makes this
                // unreachable; a stall here means a candidate bug.
                tracing::warn!(now = now.0, "non-advancing event; stepping one minute");
                target = now + 1;
            }
            let target = target.min(end);
            let dt = target - now;
            self.clock.advance_to(target);
            self.world.decay_needs(dt);
            if target >= end {
                break;
            }
            self.process_event(target, observer)?;
        }

        observer.on_run_end(&self.world);
        Ok(())
    }

    /// Rewind everything for a fresh run over the same population, with a
    /// new seed.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.clock.reset();
        self.world.reset();
        self.rngs = seed_rngs(seed, self.world.persons.len());
        self.events = 0;
    }

    // ── Event round ───────────────────────────────────────────────────────

    fn process_event<O: UniverseObserver>(
        &mut self,
        now: Tick,
        observer: &mut O,
    ) -> SimResult<()> {
        observer.on_event_start(now);
        self.events += 1;

        if now.minute_of_day() == 0 {
            self.reseed_shifts();
        }
        for act in self.world.due_completions(now) {
            self.world.complete_activity(act, now)?;
        }
        let commits = self.decision_round(now)?;
        if self.config.validate_invariants {
            self.world.check_invariants()?;
        }

        observer.on_event_end(now, commits);
        Ok(())
    }

    /// One pass over all persons in ascending id order, regardless of which
    /// home they belong to — same-instant contention always resolves to the
    /// lower person id.
    fn decision_round(&mut self, now: Tick) -> SimResult<usize> {
        let mut commits = 0;
        for i in 0..self.world.persons.len() {
            let person = self.world.persons[i].id;
            match self.world.persons[i].state {
                PersonState::Idle => {
                    let best = self.world.broadcast(person, now, false).into_iter().min();
                    if let Some(ad) = best {
                        match self.world.start_activity(&ad, now) {
                            Ok(()) => commits += 1,
                            // An earlier commit this round took the last
                            // slot; the person re-bids at the next event.
                            Err(WorldError::AtCapacity { asset, .. }) => {
                                tracing::debug!(%person, %asset, "slot taken; re-bid later");
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                }
                PersonState::Committed => {
                    let best = self.world.broadcast(person, now, true).into_iter().min();
                    if let Some(ad) = best {
                        self.world.interrupt_current(person, now)?;
                        self.world.start_activity(&ad, now)?;
                        commits += 1;
                    }
                }
                // One level of nesting: the interrupted activity must
                // resume before anything can preempt again.
                PersonState::Preempted => {}
            }
        }
        Ok(commits)
    }

    /// Re-seed each worker's effective shift window for the new day.
    fn reseed_shifts(&mut self) {
        for (person, rng) in self.world.persons.iter_mut().zip(&mut self.rngs) {
            if let Some(base) = person.base_shift {
                let offset = rng.gen_range(-SHIFT_JITTER_MINS..=SHIFT_JITTER_MINS);
                person.shift = Some(base.shifted(offset));
            }
        }
    }
}

// ── Seeding ───────────────────────────────────────────────────────────────────

pub(crate) fn seed_rngs(seed: u64, count: usize) -> Vec<PersonRng> {
    (0..count as u32)
        .map(|i| PersonRng::new(seed, viv_core::PersonId(i)))
        .collect()
}
