//! `viv-need` — the decaying need model.
//!
//! A need is a bounded scalar that decays linearly over simulated time and
//! becomes *critical* when it reaches its threshold.  Needs are pure state
//! machines with no failure modes: all inputs are pre-validated by their
//! owning person, and every operation clamps rather than errors.
//!
//! | Module   | Contents                                   |
//! |----------|--------------------------------------------|
//! | [`kind`] | `NeedKind` enum + label lookup table       |
//! | [`need`] | `Need` (decay / time-to-threshold / restore) |
//! | [`set`]  | `NeedSet` — fixed per-kind slots for one person |

pub mod kind;
pub mod need;
pub mod set;

#[cfg(test)]
mod tests;

pub use kind::NeedKind;
pub use need::Need;
pub use set::NeedSet;
