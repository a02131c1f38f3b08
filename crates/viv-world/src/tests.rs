//! Unit tests for viv-world.

use std::io::Cursor;

use viv_activity::{ActivityKind, ActivityStatus, ShiftWindow};
use viv_core::{HomeId, LocaleId, PersonId, Tick};
use viv_need::{Need, NeedKind};

use crate::{
    AssetKind, AssetSpec, AssetStatus, PersonSpec, PersonState, PopulationBuilder, World,
    WorldError, load_population_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: LocaleId = LocaleId(0);
const WORK: LocaleId = LocaleId(1);

fn hunger(level: f64) -> Need {
    Need::new(NeedKind::Hunger, level, 100.0, 1.0, 20.0)
}

fn rest(level: f64, rate: f64) -> Need {
    Need::new(NeedKind::Rest, level, 100.0, rate, 30.0)
}

/// One home, one hungry person, one food source (Eat, 30 min).
fn eat_world(hunger_level: f64) -> World {
    let mut b = PopulationBuilder::new();
    let home = b.add_home(HOME);
    b.add_person(home, PersonSpec::new(vec![hunger(hunger_level)]));
    b.add_home_asset(home, AssetSpec::new(AssetKind::FoodSource, 1, 30));
    b.build().unwrap()
}

fn single_ad(world: &World, person: PersonId, now: Tick) -> viv_activity::Advertisement {
    let mut ads = world.broadcast(person, now, false);
    assert_eq!(ads.len(), 1);
    ads.pop().unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

mod builder {
    use super::*;

    #[test]
    fn wires_homes_persons_and_slots() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        let p0 = b.add_person(home, PersonSpec::new(vec![hunger(100.0)]));
        let p1 = b.add_person(home, PersonSpec::new(vec![hunger(90.0)]));
        let bed = b.add_home_asset(home, AssetSpec::new(AssetKind::Bed, 2, 480));
        let world = b.build().unwrap();

        assert_eq!(world.homes[0].members, vec![p0, p1]);
        assert_eq!(world.homes[0].assets, vec![bed]);
        // One slot per capacity unit, all owned by the bed.
        let bed = &world.assets[bed.index()];
        assert_eq!(bed.slots.len(), 2);
        for &slot in &bed.slots {
            let a = &world.activities[slot.index()];
            assert_eq!(a.kind, ActivityKind::Sleep);
            assert_eq!(a.asset, bed.id);
            assert!(a.is_free());
        }
    }

    #[test]
    fn shared_assets_have_no_owner() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(home, PersonSpec::new(vec![hunger(100.0)]));
        let office = b.add_shared_asset(WORK, AssetSpec::new(AssetKind::Workplace, 4, 0));
        let world = b.build().unwrap();
        assert_eq!(world.assets[office.index()].home, HomeId::INVALID);
        assert!(world.homes[0].assets.is_empty());
    }

    #[test]
    fn rejects_person_without_needs() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(home, PersonSpec::new(vec![]));
        assert!(matches!(b.build(), Err(WorldError::Build(_))));
    }

    #[test]
    fn rejects_income_need_without_shift() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(
            home,
            PersonSpec::new(vec![Need::new(NeedKind::Income, 50.0, 100.0, 0.1, 20.0)]),
        );
        assert!(matches!(b.build(), Err(WorldError::Build(_))));
    }

    #[test]
    fn rejects_zero_duration_non_workplace() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(home, PersonSpec::new(vec![hunger(50.0)]));
        b.add_home_asset(home, AssetSpec::new(AssetKind::Bed, 1, 0));
        assert!(matches!(b.build(), Err(WorldError::Build(_))));
    }
}

// ── Asset capacity bookkeeping ────────────────────────────────────────────────

mod asset {
    use super::*;

    #[test]
    fn occupy_to_capacity_then_reject() {
        let mut world = eat_world(100.0);
        let food = &mut world.assets[0];
        assert_eq!(food.status(), AssetStatus::Free);
        food.occupy(PersonId(0)).unwrap();
        assert_eq!(food.status(), AssetStatus::Busy);
        // Saturated: the next occupant is refused, occupancy untouched.
        let err = food.occupy(PersonId(1)).unwrap_err();
        assert!(matches!(err, WorldError::AtCapacity { .. }));
        assert_eq!(food.occupants(), &[PersonId(0)]);
    }

    #[test]
    fn release_unknown_person_errors() {
        let mut world = eat_world(100.0);
        let err = world.assets[0].release(PersonId(7)).unwrap_err();
        assert!(matches!(err, WorldError::NotOccupant { .. }));
    }

    #[test]
    fn roaming_assets_serve_every_locale() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(home, PersonSpec::new(vec![hunger(50.0)]));
        let bus = b.add_shared_asset(LocaleId::INVALID, AssetSpec::new(AssetKind::Transport, 1, 40));
        let world = b.build().unwrap();
        let bus = &world.assets[bus.index()];
        assert!(bus.serves(HOME));
        assert!(bus.serves(WORK));
        assert!(!bus.locale.is_valid());
    }
}

// ── Broadcast ─────────────────────────────────────────────────────────────────

mod broadcast {
    use super::*;

    #[test]
    fn critical_person_sees_one_ad() {
        let world = eat_world(20.0);
        let ad = single_ad(&world, PersonId(0), Tick(0));
        assert_eq!(ad.person, PersonId(0));
        assert_eq!(ad.score.into_inner(), 0.0);
    }

    #[test]
    fn healthy_person_sees_nothing() {
        let world = eat_world(90.0);
        assert!(world.broadcast(PersonId(0), Tick(0), false).is_empty());
    }

    #[test]
    fn busy_asset_is_skipped() {
        let mut world = eat_world(20.0);
        let ad = single_ad(&world, PersonId(0), Tick(0));
        world.start_activity(&ad, Tick(0)).unwrap();
        // The food source is now saturated; a second broadcast finds nothing
        // (also: the person is committed, so standard bids abstain anyway).
        assert!(world.broadcast(PersonId(0), Tick(1), false).is_empty());
    }

    #[test]
    fn shared_assets_gated_by_locale() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(
            home,
            PersonSpec::new(vec![Need::new(NeedKind::Income, 10.0, 100.0, 0.05, 20.0)])
                .with_job(ShiftWindow::new(480, 1_020), 0.5, WORK),
        );
        b.add_shared_asset(WORK, AssetSpec::new(AssetKind::Workplace, 1, 0));
        let mut world = b.build().unwrap();

        // At home: the workplace is out of reach even during the shift.
        assert!(world.broadcast(PersonId(0), Tick(480), false).is_empty());
        // At the work locale it bids.
        world.persons[0].locale = WORK;
        assert_eq!(world.broadcast(PersonId(0), Tick(480), false).len(), 1);
    }

    #[test]
    fn interruption_pass_excludes_current_asset() {
        // Person eating; only the food source exists, so the interruption
        // broadcast has nowhere to bid from.
        let mut world = eat_world(20.0);
        let ad = single_ad(&world, PersonId(0), Tick(0));
        world.start_activity(&ad, Tick(0)).unwrap();
        assert!(world.broadcast(PersonId(0), Tick(10), true).is_empty());
    }
}

// ── Commit operations ─────────────────────────────────────────────────────────

mod commits {
    use super::*;

    #[test]
    fn start_binds_person_asset_and_slot() {
        let mut world = eat_world(20.0);
        let ad = single_ad(&world, PersonId(0), Tick(80));
        world.start_activity(&ad, Tick(80)).unwrap();

        let p = &world.persons[0];
        assert_eq!(p.state, PersonState::Committed);
        assert_eq!(p.active, ad.activity);
        let a = &world.activities[ad.activity.index()];
        assert_eq!(a.status, ActivityStatus::Active);
        assert_eq!(a.scheduled_end(), Some(Tick(110)));
        assert_eq!(world.assets[0].occupants(), &[PersonId(0)]);
        world.check_invariants().unwrap();
    }

    #[test]
    fn complete_restores_releases_and_records() {
        let mut world = eat_world(20.0);
        let ad = single_ad(&world, PersonId(0), Tick(80));
        world.start_activity(&ad, Tick(80)).unwrap();
        assert_eq!(world.due_completions(Tick(110)), vec![ad.activity]);

        world.complete_activity(ad.activity, Tick(110)).unwrap();
        let p = &world.persons[0];
        assert_eq!(p.state, PersonState::Idle);
        assert_eq!(p.needs.get(NeedKind::Hunger).unwrap().level(), 100.0);
        assert_eq!(p.diary.len(), 1);
        assert_eq!(p.diary[0].start, Tick(80));
        assert_eq!(p.diary[0].end, Tick(110));
        assert_eq!(p.diary[0].kind, ActivityKind::Eat);
        assert!(world.assets[0].occupants().is_empty());
        assert!(world.activities[ad.activity.index()].is_free());
        world.check_invariants().unwrap();
    }

    #[test]
    fn same_instant_contention_resolves_by_identity() {
        // Two hungry persons, one single-capacity food source.
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(home, PersonSpec::new(vec![hunger(20.0)]));
        b.add_person(home, PersonSpec::new(vec![hunger(20.0)]));
        b.add_home_asset(home, AssetSpec::new(AssetKind::FoodSource, 1, 30));
        let mut world = b.build().unwrap();

        // Person 0 commits first (ascending id order).
        let ad = single_ad(&world, PersonId(0), Tick(0));
        world.start_activity(&ad, Tick(0)).unwrap();
        // Person 1's snapshot now shows no free slot: abstention, not error.
        assert!(world.broadcast(PersonId(1), Tick(0), false).is_empty());
        world.check_invariants().unwrap();

        // After completion the loser's re-issued bid wins.
        world.complete_activity(ad.activity, Tick(30)).unwrap();
        let ad1 = single_ad(&world, PersonId(1), Tick(30));
        assert_eq!(ad1.person, PersonId(1));
        world.start_activity(&ad1, Tick(30)).unwrap();
        world.check_invariants().unwrap();
    }

    #[test]
    fn work_completion_credits_household_revenue() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(
            home,
            PersonSpec::new(vec![Need::new(NeedKind::Income, 10.0, 100.0, 0.05, 20.0)])
                .with_job(ShiftWindow::new(480, 1_020), 0.5, HOME),
        );
        b.add_shared_asset(HOME, AssetSpec::new(AssetKind::Workplace, 1, 0));
        let mut world = b.build().unwrap();

        let ad = single_ad(&world, PersonId(0), Tick(600));
        world.start_activity(&ad, Tick(600)).unwrap();
        // Work runs to the end of the shift: 1020 - 600 = 420 minutes.
        assert_eq!(world.activities[ad.activity.index()].scheduled_end(), Some(Tick(1_020)));
        world.complete_activity(ad.activity, Tick(1_020)).unwrap();
        assert_eq!(world.homes[0].revenue, 0.5 * 420.0);
    }

    #[test]
    fn commute_completion_toggles_locale() {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(
            home,
            PersonSpec::new(vec![
                Need::new(NeedKind::Travel, 10.0, 100.0, 0.1, 20.0),
                Need::new(NeedKind::Income, 50.0, 100.0, 0.0, 20.0),
            ])
            .with_job(ShiftWindow::new(480, 1_020), 0.5, WORK),
        );
        b.add_shared_asset(LocaleId::INVALID, AssetSpec::new(AssetKind::Transport, 1, 40));
        let mut world = b.build().unwrap();

        let ad = single_ad(&world, PersonId(0), Tick(0));
        world.start_activity(&ad, Tick(0)).unwrap();
        world.complete_activity(ad.activity, Tick(40)).unwrap();
        assert_eq!(world.persons[0].locale, WORK);

        // A later commute brings them home again.
        world.persons[0].needs.get_mut(NeedKind::Travel).unwrap().decay(1_000);
        let ad = single_ad(&world, PersonId(0), Tick(100));
        world.start_activity(&ad, Tick(100)).unwrap();
        world.complete_activity(ad.activity, Tick(140)).unwrap();
        assert_eq!(world.persons[0].locale, HOME);
    }
}

// ── Interruption and resume ───────────────────────────────────────────────────

mod interruption {
    use super::*;

    /// Eating person preempted by an overdue rest need.
    fn preempt_world() -> World {
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(
            home,
            // Rest far past its preemption bar; hunger critical.
            PersonSpec::new(vec![hunger(20.0), rest(0.0, 1.0)]),
        );
        b.add_home_asset(home, AssetSpec::new(AssetKind::FoodSource, 1, 120));
        b.add_home_asset(home, AssetSpec::new(AssetKind::Bed, 1, 60));
        b.build().unwrap()
    }

    #[test]
    fn interrupt_then_resume_preserves_restoration_and_occupancy() {
        let mut world = preempt_world();

        // Start the 120-minute meal at t=0 (hunger ad scores 0, bed's sleep
        // ad scores -30; sleep wins, so pick the eat ad explicitly).
        let ads = world.broadcast(PersonId(0), Tick(0), false);
        let eat = ads
            .iter()
            .find(|ad| world.activities[ad.activity.index()].kind == ActivityKind::Eat)
            .copied()
            .unwrap();
        world.start_activity(&eat, Tick(0)).unwrap();

        // 40 minutes in, the rest need preempts.
        let ads = world.broadcast(PersonId(0), Tick(40), true);
        assert_eq!(ads.len(), 1);
        let sleep = ads[0];
        assert_eq!(
            world.activities[sleep.activity.index()].kind,
            ActivityKind::Sleep
        );
        world.interrupt_current(PersonId(0), Tick(40)).unwrap();
        world.start_activity(&sleep, Tick(40)).unwrap();

        let p = &world.persons[0];
        assert_eq!(p.state, PersonState::Preempted);
        let parked = p.interruption.unwrap();
        assert_eq!(parked.activity, eat.activity);
        assert_eq!(parked.activity_start, Tick(0));
        assert_eq!(parked.remaining_mins, 80);
        // The food source keeps its occupant across the interruption.
        assert_eq!(world.assets[0].occupants(), &[PersonId(0)]);
        // Pro-rata share applied: 40/120 of 80 units on top of level 20.
        let hunger_level = p.needs.get(NeedKind::Hunger).unwrap().level();
        assert!((hunger_level - (20.0 + 80.0 * 40.0 / 120.0)).abs() < 1e-9);
        world.check_invariants().unwrap();

        // Sleep ends at t=100; the meal resumes automatically.
        world.complete_activity(sleep.activity, Tick(100)).unwrap();
        let p = &world.persons[0];
        assert_eq!(p.state, PersonState::Committed);
        assert_eq!(p.active, eat.activity);
        assert_eq!(
            world.activities[eat.activity.index()].scheduled_end(),
            Some(Tick(180))
        );
        world.check_invariants().unwrap();

        // Final completion: total restored hunger equals the uninterrupted
        // amount, and the diary shows both meal segments.
        world.complete_activity(eat.activity, Tick(180)).unwrap();
        let p = &world.persons[0];
        assert_eq!(p.needs.get(NeedKind::Hunger).unwrap().level(), 100.0);
        let kinds: Vec<ActivityKind> = p.diary.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Eat, ActivityKind::Sleep, ActivityKind::Eat]
        );
        let eaten: u64 = p
            .diary
            .iter()
            .filter(|d| d.kind == ActivityKind::Eat)
            .map(|d| d.end - d.start)
            .sum();
        assert_eq!(eaten, 120);
        world.check_invariants().unwrap();
    }

    #[test]
    fn commute_preemption_resumes_work_away_from_the_workplace() {
        // Co-location gates bidding only: a parked work shift keeps its
        // slot and resumes wherever the commute left the person.
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        b.add_person(
            home,
            PersonSpec::new(vec![
                Need::new(NeedKind::Travel, 5.0, 100.0, 0.5, 20.0),
                Need::new(NeedKind::Income, 10.0, 100.0, 0.05, 40.0),
            ])
            .with_job(ShiftWindow::new(480, 1_020), 0.5, WORK),
        );
        let office = b.add_shared_asset(WORK, AssetSpec::new(AssetKind::Workplace, 1, 0));
        b.add_shared_asset(LocaleId::INVALID, AssetSpec::new(AssetKind::Transport, 1, 40));
        let mut world = b.build().unwrap();
        world.persons[0].locale = WORK;

        // The shift opens; the income need outbids the travel need.
        let ads = world.broadcast(PersonId(0), Tick(480), false);
        let work = ads.into_iter().min().unwrap();
        assert_eq!(world.activities[work.activity.index()].kind, ActivityKind::Work);
        world.start_activity(&work, Tick(480)).unwrap();

        // Travel is exactly at the preemption bar: the commute preempts.
        let ads = world.broadcast(PersonId(0), Tick(480), true);
        assert_eq!(ads.len(), 1);
        let commute = ads[0];
        assert_eq!(
            world.activities[commute.activity.index()].kind,
            ActivityKind::Commute
        );
        world.interrupt_current(PersonId(0), Tick(480)).unwrap();
        world.start_activity(&commute, Tick(480)).unwrap();
        world.check_invariants().unwrap();

        // The commute relocates the person home, then the shift resumes
        // there with its remaining 540 minutes intact.
        world.complete_activity(commute.activity, Tick(520)).unwrap();
        let p = &world.persons[0];
        assert_eq!(p.locale, HOME);
        assert_eq!(p.state, PersonState::Committed);
        assert_eq!(p.active, work.activity);
        assert_eq!(
            world.activities[work.activity.index()].scheduled_end(),
            Some(Tick(1_060))
        );
        assert_eq!(world.assets[office.index()].occupants(), &[PersonId(0)]);
        world.check_invariants().unwrap();
    }
}

// ── Invariant audit ───────────────────────────────────────────────────────────

mod invariants {
    use super::*;

    #[test]
    fn fresh_world_is_clean() {
        eat_world(50.0).check_invariants().unwrap();
    }

    #[test]
    fn detects_state_slot_mismatch() {
        let mut world = eat_world(50.0);
        world.persons[0].state = PersonState::Committed; // no active slot
        assert!(matches!(
            world.check_invariants(),
            Err(WorldError::Invariant(_))
        ));
    }

    #[test]
    fn detects_capacity_overflow() {
        let mut world = eat_world(50.0);
        // Bypass occupy() bookkeeping to simulate a broken broker.
        world.assets[0].occupy(PersonId(0)).unwrap();
        world.assets[0].capacity = 0;
        assert!(matches!(
            world.check_invariants(),
            Err(WorldError::Invariant(_))
        ));
    }
}

// ── Reset ─────────────────────────────────────────────────────────────────────

mod reset {
    use super::*;

    #[test]
    fn reset_restores_a_used_population() {
        let mut world = eat_world(20.0);
        let ad = single_ad(&world, PersonId(0), Tick(0));
        world.start_activity(&ad, Tick(0)).unwrap();
        world.complete_activity(ad.activity, Tick(30)).unwrap();
        assert!(!world.persons[0].diary.is_empty());

        world.reset();
        let p = &world.persons[0];
        assert_eq!(p.state, PersonState::Idle);
        assert!(p.diary.is_empty());
        assert_eq!(p.needs.get(NeedKind::Hunger).unwrap().level(), 20.0);
        assert!(world.assets[0].occupants().is_empty());
        assert!(world.activities.iter().all(|a| a.is_free()));
        world.check_invariants().unwrap();
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

mod loader {
    use super::*;

    const CSV: &str = "\
person_id,home_id,need,level,max,rate_per_min,threshold,shift_start,shift_end,pay_rate,work_locale\n\
0,0,rest,100,100,0.12,30,,,,\n\
0,0,hunger,90,100,0.07,25,,,,\n\
0,0,income,60,100,0.03,40,480,1020,0.5,1\n\
1,0,rest,95,100,0.11,30,,,,\n\
";

    #[test]
    fn loads_specs_in_person_order() {
        let specs = load_population_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(specs.len(), 2);

        let (home, spec) = &specs[0];
        assert_eq!(*home, HomeId(0));
        assert_eq!(spec.needs.len(), 3);
        let shift = spec.shift.unwrap();
        assert_eq!((shift.start_min, shift.end_min), (480, 1_020));
        assert_eq!(spec.pay_rate_per_min, 0.5);
        assert_eq!(spec.work_locale, Some(LocaleId(1)));

        let (_, spec) = &specs[1];
        assert_eq!(spec.needs.len(), 1);
        assert!(spec.shift.is_none());
    }

    #[test]
    fn loaded_specs_build_a_world() {
        let specs = load_population_reader(Cursor::new(CSV)).unwrap();
        let mut b = PopulationBuilder::new();
        let home = b.add_home(HOME);
        for (_, spec) in specs {
            b.add_person(home, spec);
        }
        b.add_home_asset(home, AssetSpec::new(AssetKind::Bed, 2, 480));
        let world = b.build().unwrap();
        assert_eq!(world.persons.len(), 2);
        world.check_invariants().unwrap();
    }

    #[test]
    fn rejects_sparse_person_ids() {
        let csv = "\
person_id,home_id,need,level,max,rate_per_min,threshold,shift_start,shift_end,pay_rate,work_locale\n\
0,0,rest,100,100,0.12,30,,,,\n\
2,0,rest,95,100,0.11,30,,,,\n\
";
        assert!(matches!(
            load_population_reader(Cursor::new(csv)),
            Err(WorldError::Parse(_))
        ));
    }

    #[test]
    fn rejects_unknown_need_kind() {
        let csv = "\
person_id,home_id,need,level,max,rate_per_min,threshold,shift_start,shift_end,pay_rate,work_locale\n\
0,0,thirst,100,100,0.12,30,,,,\n\
";
        assert!(matches!(
            load_population_reader(Cursor::new(csv)),
            Err(WorldError::Parse(_))
        ));
    }

    #[test]
    fn rejects_income_without_shift() {
        let csv = "\
person_id,home_id,need,level,max,rate_per_min,threshold,shift_start,shift_end,pay_rate,work_locale\n\
0,0,income,60,100,0.03,40,,,,\n\
";
        assert!(matches!(
            load_population_reader(Cursor::new(csv)),
            Err(WorldError::Parse(_))
        ));
    }
}
