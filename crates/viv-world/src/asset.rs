//! The `Asset` — a capacity-limited resource offering activity slots.
//!
//! An asset owns its slots (indices into the world's activity arena) and
//! arbitrates which persons may use it.  Occupancy is the commit-time
//! capacity check: the broadcast is a snapshot read, and `occupy` is the
//! final, non-reentrant gate that makes same-instant contention safe.

use std::fmt;

use viv_activity::{Activity, ActivityKind, Advertisement, Bidder};
use viv_core::{ActivityId, AssetId, HomeId, LocaleId, PersonId, Tick};

use crate::{WorldError, WorldResult};

// ── AssetKind ─────────────────────────────────────────────────────────────────

/// The closed set of asset kinds.  Each offers exactly one activity kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AssetKind {
    Bed,
    FoodSource,
    Transport,
    Workplace,
}

impl AssetKind {
    /// The activity this asset kind offers.
    #[inline]
    pub fn offers(self) -> ActivityKind {
        match self {
            AssetKind::Bed => ActivityKind::Sleep,
            AssetKind::FoodSource => ActivityKind::Eat,
            AssetKind::Transport => ActivityKind::Commute,
            AssetKind::Workplace => ActivityKind::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Bed => "bed",
            AssetKind::FoodSource => "food_source",
            AssetKind::Transport => "transport",
            AssetKind::Workplace => "workplace",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── AssetStatus ───────────────────────────────────────────────────────────────

/// Derived occupancy status.  `Busy` means saturated: no further occupant
/// fits.  Deriving this from the occupant list (rather than storing a flag)
/// makes the status/occupancy invariant hold by construction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AssetStatus {
    Free,
    Busy,
}

// ── Asset ─────────────────────────────────────────────────────────────────────

/// A capacity-limited resource (bed, food source, transport, workplace).
///
/// Owned by exactly one home, or shared (`home == HomeId::INVALID`) and
/// reachable by locale only — workplaces and cafeterias.
#[derive(Clone, Debug)]
pub struct Asset {
    pub id: AssetId,
    pub kind: AssetKind,
    /// Owning home; `INVALID` for shared assets.
    pub home: HomeId,
    /// Where the asset is.  `LocaleId::INVALID` means roaming (transport):
    /// co-located with every person.
    pub locale: LocaleId,
    /// Maximum simultaneous users.  Default 1.
    pub capacity: u32,
    /// Current users — plain back-references, no ownership.
    occupants: Vec<PersonId>,
    /// Owned activity slots, one per capacity unit, created at build time.
    pub slots: Vec<ActivityId>,
}

impl Asset {
    pub fn new(id: AssetId, kind: AssetKind, home: HomeId, locale: LocaleId, capacity: u32) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            id,
            kind,
            home,
            locale,
            capacity,
            occupants: Vec::with_capacity(capacity as usize),
            slots: Vec::with_capacity(capacity as usize),
        }
    }

    #[inline]
    pub fn status(&self) -> AssetStatus {
        if self.occupants.len() >= self.capacity as usize {
            AssetStatus::Busy
        } else {
            AssetStatus::Free
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.status() == AssetStatus::Busy
    }

    pub fn occupants(&self) -> &[PersonId] {
        &self.occupants
    }

    /// `true` if a person at `locale` can reach this asset.
    #[inline]
    pub fn serves(&self, locale: LocaleId) -> bool {
        self.locale == locale || !self.locale.is_valid()
    }

    // ── Advertisement ─────────────────────────────────────────────────────

    /// Collect bids from this asset's slots for one person.
    ///
    /// Pure read: iterates only owned slots, concatenates their bid results
    /// annotated with `(asset, activity, person)`.  The caller (home
    /// broadcast) has already checked co-location and, for the standard
    /// pass, that the asset is not busy.
    pub fn advertise(
        &self,
        activities: &[Activity],
        bidder: &Bidder<'_>,
        now: Tick,
        do_interruption: bool,
    ) -> Vec<Advertisement> {
        let mut ads = Vec::new();
        for &slot_id in &self.slots {
            let slot = &activities[slot_id.index()];
            let score = if do_interruption {
                slot.advertise_interruption(bidder, now)
            } else {
                slot.advertise(bidder, now)
            };
            if let Some(score) = score {
                ads.push(Advertisement {
                    score,
                    asset: self.id,
                    activity: slot_id,
                    person: bidder.person,
                });
            }
        }
        ads
    }

    // ── Capacity bookkeeping ──────────────────────────────────────────────

    /// Add `person` as an occupant.  The final capacity check at commit
    /// time: fails when saturated, never silently overwrites occupancy.
    pub fn occupy(&mut self, person: PersonId) -> WorldResult<()> {
        if self.is_busy() {
            return Err(WorldError::AtCapacity { asset: self.id, person });
        }
        debug_assert!(!self.occupants.contains(&person));
        self.occupants.push(person);
        Ok(())
    }

    /// Remove `person` from the occupant list.
    pub fn release(&mut self, person: PersonId) -> WorldResult<()> {
        match self.occupants.iter().position(|&p| p == person) {
            Some(i) => {
                self.occupants.remove(i);
                Ok(())
            }
            None => Err(WorldError::NotOccupant { asset: self.id, person }),
        }
    }

    /// Clear occupancy for a fresh run.  Start-of-run only, never mid-run;
    /// the world resets the owned slots alongside.
    pub fn reset_occupancy(&mut self) {
        self.occupants.clear();
    }
}
