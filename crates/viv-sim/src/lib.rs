//! `viv-sim` — event loop orchestrator for the vivarium framework.
//!
//! # Event loop
//!
//! ```text
//! round at t=0, then loop until the horizon:
//!   ① Jump        — scheduler picks the next tick anything can change;
//!                   the clock advances straight to it.
//!   ② Decay       — needs age by the skipped minutes (restored needs
//!                   are frozen).
//!   ③ Completions — activities ending now finish, ascending by slot id;
//!                   interrupted uses resume here.
//!   ④ Decisions   — one pass over persons in ascending id order: idle
//!                   persons take the best standard advertisement,
//!                   committed persons the best interruption bid.
//!   ⑤ Audit       — world invariants checked; a violation is fatal.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use viv_core::SimConfig;
//! use viv_sim::{NoopObserver, UniverseBuilder};
//!
//! let world = population.build()?;
//! let mut universe = UniverseBuilder::new(SimConfig::new(7, 42), world).build()?;
//! universe.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod universe;


pub use builder::UniverseBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, UniverseObserver};
pub use universe::Universe;
