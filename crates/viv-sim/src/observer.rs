//! Run observer trait for progress reporting and data collection.

use viv_core::Tick;
use viv_world::World;

/// Callbacks invoked by [`Universe::run`][crate::Universe::run] at key
/// points in the event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl UniverseObserver for ProgressPrinter {
///     fn on_event_end(&mut self, now: Tick, commits: usize) {
///         println!("{now}: {commits} commits");
///     }
/// }
/// ```
pub trait UniverseObserver {
    /// Called when the clock lands on an event tick, before any processing.
    fn on_event_start(&mut self, _now: Tick) {}

    /// Called after the round at `now` finishes.
    ///
    /// `commits` is the number of activities started this round.
    fn on_event_end(&mut self, _now: Tick, _commits: usize) {}

    /// Called once after the final event, with read-only access to the
    /// finished world so writers can drain diaries and household totals.
    fn on_run_end(&mut self, _world: &World) {}
}

/// A [`UniverseObserver`] that does nothing.  Use when you need to call
/// `run` but don't want callbacks.
pub struct NoopObserver;

impl UniverseObserver for NoopObserver {}
