use thiserror::Error;

use viv_activity::ActivityError;
use viv_core::{AssetId, PersonId};

/// Errors raised by population construction and commit operations.
///
/// `AtCapacity` is the one *recoverable* variant: the caller lost a race for
/// a saturated asset and simply re-advertises at the next event.
/// `Invariant` is fatal — it indicates a bug in the scheduler or bidding
/// logic, not a data problem — and terminates the run.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("asset {asset} is at capacity; {person} must re-bid")]
    AtCapacity { asset: AssetId, person: PersonId },

    #[error("{person} is not an occupant of asset {asset}")]
    NotOccupant { asset: AssetId, person: PersonId },

    #[error("{person} cannot start an activity while committed to another")]
    PersonBusy { person: PersonId },

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("population build error: {0}")]
    Build(String),

    #[error("population parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `viv-world`.
pub type WorldResult<T> = Result<T, WorldError>;
