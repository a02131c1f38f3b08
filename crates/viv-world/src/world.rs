//! The `World` — entity arenas plus the commit operations the engine runs
//! inside one decision round.
//!
//! All mutation of persons, assets, and activity slots goes through the
//! operations here, strictly serialized by the caller (`viv-sim`).  The
//! broadcast is a pure snapshot read; `start_activity` performs the final
//! capacity check at commit time, so two persons can never both claim the
//! last slot of an asset within the same instant.

use rustc_hash::FxHashMap;

use viv_activity::{ActivityKind, ActivityStatus, Advertisement};
use viv_core::{ActivityId, AssetId, LocaleId, PersonId, Tick};

use crate::person::{Interruption, PersonState};
use crate::{Asset, Home, Person, WorldError, WorldResult};

/// Arena-of-entities storage for one simulation population.
///
/// Typed IDs index the arenas directly; see `viv-core::ids` for the
/// ownership conventions.
pub struct World {
    pub persons: Vec<Person>,
    pub homes: Vec<Home>,
    pub assets: Vec<Asset>,
    pub activities: Vec<viv_activity::Activity>,
    /// Shared (home-less) assets indexed by locale.  Lookup only — never
    /// iterated as a map, so hash order cannot leak into results.
    shared_by_locale: FxHashMap<LocaleId, Vec<AssetId>>,
    /// Shared assets with no fixed locale (roaming transport).
    roaming: Vec<AssetId>,
}

impl World {
    /// Assemble a world from builder output.  `viv-world::PopulationBuilder`
    /// is the only intended caller.
    pub(crate) fn new(
        persons: Vec<Person>,
        homes: Vec<Home>,
        assets: Vec<Asset>,
        activities: Vec<viv_activity::Activity>,
    ) -> Self {
        let mut shared_by_locale: FxHashMap<LocaleId, Vec<AssetId>> = FxHashMap::default();
        let mut roaming = Vec::new();
        for asset in &assets {
            if asset.home.is_valid() {
                continue;
            }
            if asset.locale.is_valid() {
                shared_by_locale.entry(asset.locale).or_default().push(asset.id);
            } else {
                roaming.push(asset.id);
            }
        }
        Self { persons, homes, assets, activities, shared_by_locale, roaming }
    }

    // ── Broadcast ─────────────────────────────────────────────────────────

    /// Collect every advertisement reachable by `person` right now: the
    /// home's broadcast plus shared assets at the person's locale and
    /// roaming transport.  Pure read; empty result means "nothing to do".
    pub fn broadcast(&self, person: PersonId, now: Tick, do_interruption: bool) -> Vec<Advertisement> {
        let person = &self.persons[person.index()];
        // The asset hosting the person's current activity never bids to
        // preempt its own use.
        let exclude = if person.active.is_valid() {
            self.activities[person.active.index()].asset
        } else {
            AssetId::INVALID
        };

        let home = &self.homes[person.home.index()];
        let mut ads = home.advertise(self, person, now, do_interruption, exclude);

        let shared = self
            .shared_by_locale
            .get(&person.locale)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let bidder = person.bidder();
        for &asset_id in shared.iter().chain(&self.roaming) {
            let asset = &self.assets[asset_id.index()];
            if do_interruption {
                if asset_id == exclude {
                    continue;
                }
            } else if asset.is_busy() {
                continue;
            }
            ads.extend(asset.advertise(&self.activities, &bidder, now, do_interruption));
        }
        ads
    }

    // ── Commit operations ─────────────────────────────────────────────────

    /// Commit a won bid: occupy the asset, run the slot through
    /// Advertising → Active, and bind the person.
    ///
    /// `AtCapacity` is recoverable — the person re-bids at the next event.
    pub fn start_activity(&mut self, ad: &Advertisement, now: Tick) -> WorldResult<()> {
        let kind = self.activities[ad.activity.index()].kind;
        let default_mins = self.activities[ad.activity.index()].default_mins;

        let person = &self.persons[ad.person.index()];
        if !person.is_idle() {
            return Err(WorldError::PersonBusy { person: ad.person });
        }
        // Work runs until the shift window closes; everything else uses the
        // slot's default duration.
        let planned_mins = match kind {
            ActivityKind::Work => person
                .shift
                .map(|s| s.minutes_remaining(now))
                .unwrap_or(0),
            _ => default_mins,
        };
        let restore_total = person
            .needs
            .get(kind.restores())
            .map(|n| n.max - n.level())
            .unwrap_or(0.0);

        self.assets[ad.asset.index()].occupy(ad.person)?;
        let begun = {
            let slot = &mut self.activities[ad.activity.index()];
            slot.mark_advertising()
                .and_then(|_| slot.begin(ad.person, now, planned_mins, restore_total))
        };
        if let Err(e) = begun {
            self.activities[ad.activity.index()].clear_advertising();
            let _ = self.assets[ad.asset.index()].release(ad.person);
            return Err(e.into());
        }

        let person = &mut self.persons[ad.person.index()];
        person.active = ad.activity;
        person.state = if person.interruption.is_some() {
            PersonState::Preempted
        } else {
            PersonState::Committed
        };
        Ok(())
    }

    /// Preempt the person's current activity: apply the pro-rata
    /// restoration, close the diary segment, and park the use in the
    /// person's interruption slot.  The interrupted asset keeps its
    /// occupant, so resumption never re-bids for capacity.
    pub fn interrupt_current(&mut self, person: PersonId, now: Tick) -> WorldResult<()> {
        let act_id = self.persons[person.index()].active;
        if !act_id.is_valid() {
            return Err(WorldError::Invariant(format!(
                "{person} has no in-flight activity to interrupt"
            )));
        }
        let outcome = self.activities[act_id.index()].interrupt(now)?;
        let (first_started, remaining_mins, kind) = {
            let a = &self.activities[act_id.index()];
            (a.first_started, a.remaining_mins, a.kind)
        };

        let p = &mut self.persons[person.index()];
        if let Some(need) = p.needs.get_mut(kind.restores()) {
            need.restore(outcome.partial_restore);
        }
        p.record(outcome.segment.0, outcome.segment.1, kind);
        p.interruption = Some(Interruption {
            activity: act_id,
            activity_start: first_started,
            remaining_mins,
        });
        p.active = ActivityId::INVALID;
        // Transiently idle; the preemptor's start_activity moves the person
        // to Preempted in the same decision round.
        p.state = PersonState::Idle;
        Ok(())
    }

    /// Finish an activity whose scheduled end has arrived: apply the
    /// outstanding restoration, release the asset slot, record the diary
    /// segment, credit work revenue, relocate completed commutes, and
    /// resume any pending interruption.
    pub fn complete_activity(&mut self, act_id: ActivityId, now: Tick) -> WorldResult<()> {
        let (asset_id, worked_mins) = {
            let a = &self.activities[act_id.index()];
            (a.asset, a.planned_mins)
        };
        let done = self.activities[act_id.index()].complete(now)?;
        self.activities[act_id.index()].recycle();
        self.assets[asset_id.index()].release(done.person)?;

        let p = &mut self.persons[done.person.index()];
        if let Some(need) = p.needs.get_mut(done.kind.restores()) {
            need.restore(done.restore_amount);
        }
        p.record(done.segment.0, done.segment.1, done.kind);
        p.active = ActivityId::INVALID;
        let home = p.home;
        let pay = p.pay_rate_per_min * worked_mins as f64;
        if done.kind == ActivityKind::Commute {
            p.locale = p.commute_target();
        }

        if done.kind == ActivityKind::Work {
            self.homes[home.index()].credit(pay);
        }

        // Resume a preempted use, if one is parked.  The parked slot kept
        // its asset occupancy, so resumption never re-checks capacity or
        // co-location; a commute interlude can therefore finish a use away
        // from the asset's locale.
        let pending = self.persons[done.person.index()].interruption.take();
        match pending {
            Some(intr) => {
                self.activities[intr.activity.index()].resume(now)?;
                let p = &mut self.persons[done.person.index()];
                p.active = intr.activity;
                p.state = PersonState::Committed;
            }
            None => {
                self.persons[done.person.index()].state = PersonState::Idle;
            }
        }
        Ok(())
    }

    // ── Time progression helpers ──────────────────────────────────────────

    /// Decay every person's needs by `dt_mins`, skipping the need currently
    /// being restored by an *active* (not interrupted) activity.
    pub fn decay_needs(&mut self, dt_mins: u64) {
        if dt_mins == 0 {
            return;
        }
        for i in 0..self.persons.len() {
            let skip = {
                let p = &self.persons[i];
                if p.active.is_valid() {
                    let a = &self.activities[p.active.index()];
                    (a.status == ActivityStatus::Active).then(|| a.kind.restores())
                } else {
                    None
                }
            };
            self.persons[i].needs.decay_all(dt_mins, skip);
        }
    }

    /// Activity slots whose scheduled end is exactly `now`, ascending by id.
    pub fn due_completions(&self, now: Tick) -> Vec<ActivityId> {
        self.activities
            .iter()
            .filter(|a| a.scheduled_end() == Some(now))
            .map(|a| a.id)
            .collect()
    }

    // ── Invariant audit ───────────────────────────────────────────────────

    /// Verify the tick-boundary invariant set.  A violation is a bug in the
    /// scheduling/bidding logic; the caller treats it as fatal.
    pub fn check_invariants(&self) -> WorldResult<()> {
        for asset in &self.assets {
            if asset.occupants().len() > asset.capacity as usize {
                return Err(WorldError::Invariant(format!(
                    "asset {} holds {} occupants, capacity {}",
                    asset.id,
                    asset.occupants().len(),
                    asset.capacity
                )));
            }
        }
        for person in &self.persons {
            for need in person.needs.iter() {
                let level = need.level();
                if !(0.0..=need.max).contains(&level) {
                    return Err(WorldError::Invariant(format!(
                        "{} need {} level {level} outside [0, {}]",
                        person.id, need.kind, need.max
                    )));
                }
            }
            let committed = matches!(person.state, PersonState::Committed | PersonState::Preempted);
            if committed != person.active.is_valid() {
                return Err(WorldError::Invariant(format!(
                    "{} state {:?} inconsistent with active slot {}",
                    person.id, person.state, person.active
                )));
            }
            if person.active.is_valid() {
                let a = &self.activities[person.active.index()];
                if a.user != person.id || a.status != ActivityStatus::Active {
                    return Err(WorldError::Invariant(format!(
                        "{} claims {} but the slot is {:?} for {}",
                        person.id, person.active, a.status, a.user
                    )));
                }
            }
        }
        // At most one active slot per person, and every in-use slot's asset
        // must list its user as an occupant.
        let mut active_count = vec![0u32; self.persons.len()];
        for a in &self.activities {
            if a.status == ActivityStatus::Active {
                active_count[a.user.index()] += 1;
            }
            if a.in_use() {
                let asset = &self.assets[a.asset.index()];
                if !asset.occupants().contains(&a.user) {
                    return Err(WorldError::Invariant(format!(
                        "slot {} is {:?} for {} but asset {} does not list them",
                        a.id, a.status, a.user, asset.id
                    )));
                }
            }
        }
        if let Some(i) = active_count.iter().position(|&c| c > 1) {
            return Err(WorldError::Invariant(format!(
                "person PersonId({i}) holds {} active slots",
                active_count[i]
            )));
        }
        Ok(())
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Return the constructed population to its initial state so it can be
    /// reused across repeated runs (different seeds) without
    /// reconstruction.  Never called mid-run.
    pub fn reset(&mut self) {
        for activity in &mut self.activities {
            activity.reset();
        }
        for asset in &mut self.assets {
            asset.reset_occupancy();
        }
        for person in &mut self.persons {
            person.reset();
        }
        for home in &mut self.homes {
            home.reset();
        }
    }
}
