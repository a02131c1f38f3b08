//! `viv-core` — foundational types for the `vivarium` population simulator.
//!
//! This crate is a dependency of every other `viv-*` crate.  It intentionally
//! has no `viv-*` dependencies and only one external one (`rand`).
//!
//! # What lives here
//!
//! | Module   | Contents                                            |
//! |----------|-----------------------------------------------------|
//! | [`ids`]  | `PersonId`, `HomeId`, `AssetId`, `ActivityId`, `LocaleId` |
//! | [`time`] | `Tick` (simulated minutes), `SimClock`, `SimConfig` |
//! | [`rng`]  | `PersonRng` (per-person), `SimRng` (global)         |
//!
//! Error types live in the crates that can actually fail (`viv-world`,
//! `viv-sim`, `viv-output`); the leaf types here have no failure modes.

pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{ActivityId, AssetId, HomeId, LocaleId, PersonId};
pub use rng::{PersonRng, SimRng};
pub use time::{MINUTES_PER_DAY, SimClock, SimConfig, Tick};
