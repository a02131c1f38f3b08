use thiserror::Error;

use crate::ActivityStatus;

/// Errors from illegal activity slot transitions.
///
/// Capacity errors live in `viv-world` — a slot knows nothing about its
/// asset's occupancy.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("illegal activity transition {from:?} -> {to:?}")]
    Transition {
        from: ActivityStatus,
        to: ActivityStatus,
    },

    #[error("activity use must have a positive planned duration")]
    ZeroDuration,
}
