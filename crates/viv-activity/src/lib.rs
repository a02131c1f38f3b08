//! `viv-activity` — the activity state machine and bidding protocol.
//!
//! An activity slot is a reusable capability offered by an asset ("this bed
//! sleeps one person").  Slots are created when the asset is built and live
//! for the asset's whole lifetime; one *use* runs through
//!
//! ```text
//! Inactive → Advertising → Active → Complete   (back to Inactive)
//!                             ↓  ↑
//!                           Interrupted
//! ```
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`kind`]   | `ActivityKind` enum, need mapping, label table    |
//! | [`activity`] | `Activity` slot + transition logic              |
//! | [`bid`]    | `Advertisement`, `Bidder`, `ShiftWindow`, scoring |
//! | [`error`]  | `ActivityError`                                   |
//!
//! The crate knows nothing about assets' capacity or persons' location;
//! those preconditions are enforced by `viv-world` before a slot is asked
//! to bid.

pub mod activity;
pub mod bid;
pub mod error;
pub mod kind;


pub use activity::{Activity, ActivityStatus, CompletedUse, InterruptOutcome};
pub use bid::{Advertisement, Bidder, ShiftWindow, CONTINUATION_SCORE, PREEMPT_PENALTY_MINS};
pub use error::ActivityError;
pub use kind::ActivityKind;
