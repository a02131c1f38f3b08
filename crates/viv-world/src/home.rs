//! The `Home` — a container of assets shared by its resident persons, and
//! the broadcast broker that collects their advertisements.

use viv_activity::Advertisement;
use viv_core::{AssetId, HomeId, LocaleId, PersonId, Tick};

use crate::{Person, World};

/// One household: members (weak references — population membership, not
/// ownership), owned assets, and accumulated revenue from members' work.
#[derive(Clone, Debug)]
pub struct Home {
    pub id: HomeId,
    pub locale: LocaleId,
    /// Resident persons, ascending by id (build order).
    pub members: Vec<PersonId>,
    /// Assets this home owns.  Shared assets (workplace, cafeteria) are
    /// reachable by locale only and owned by no home.
    pub assets: Vec<AssetId>,
    pub revenue: f64,
}

impl Home {
    pub fn new(id: HomeId, locale: LocaleId) -> Self {
        Self {
            id,
            locale,
            members: Vec::new(),
            assets: Vec::new(),
            revenue: 0.0,
        }
    }

    /// Broadcast: collect advertisements from this home's assets for one
    /// person.
    ///
    /// Pure read+collect — no mutation, safe to call repeatedly.  For the
    /// standard pass only non-busy, co-located assets are consulted; for the
    /// interruption pass every co-located asset except the one hosting the
    /// person's current activity (`exclude`).  An empty result means "no
    /// action available now", not an error.
    pub fn advertise(
        &self,
        world: &World,
        person: &Person,
        now: Tick,
        do_interruption: bool,
        exclude: AssetId,
    ) -> Vec<Advertisement> {
        let bidder = person.bidder();
        let mut ads = Vec::new();
        for &asset_id in &self.assets {
            let asset = &world.assets[asset_id.index()];
            if !asset.serves(person.locale) {
                continue;
            }
            if do_interruption {
                if asset_id == exclude {
                    continue;
                }
            } else if asset.is_busy() {
                continue;
            }
            ads.extend(asset.advertise(&world.activities, &bidder, now, do_interruption));
        }
        ads
    }

    /// Credit revenue earned by a member's completed work.
    pub fn credit(&mut self, amount: f64) {
        self.revenue += amount;
    }

    /// Start-of-run reset; owned assets are reset by `World::reset`.
    pub fn reset(&mut self) {
        self.revenue = 0.0;
    }
}
