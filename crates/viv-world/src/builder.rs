//! Fluent builder for constructing a `World` in one pass.
//!
//! The external calibration driver samples per-person parameters from its
//! distributions and feeds them in here; the builder only wires entities
//! together and validates shape.  Activity slots are created eagerly — one
//! per capacity unit — so nothing is allocated per use at run time.

use viv_activity::{Activity, ShiftWindow};
use viv_core::{ActivityId, AssetId, HomeId, LocaleId, PersonId};
use viv_need::Need;
use viv_need::NeedSet;

use crate::{Asset, AssetKind, Home, Person, World, WorldError, WorldResult};

/// Per-person construction parameters, pre-sampled by the caller.
pub struct PersonSpec {
    pub needs: Vec<Need>,
    /// Shift window for workers; `None` otherwise.
    pub shift: Option<ShiftWindow>,
    /// Household revenue per worked minute.
    pub pay_rate_per_min: f64,
    /// Locale of the person's workplace; `None` for non-workers.
    pub work_locale: Option<LocaleId>,
}

impl PersonSpec {
    /// A non-working person with the given needs.
    pub fn new(needs: Vec<Need>) -> Self {
        Self {
            needs,
            shift: None,
            pay_rate_per_min: 0.0,
            work_locale: None,
        }
    }

    pub fn with_job(
        mut self,
        shift: ShiftWindow,
        pay_rate_per_min: f64,
        work_locale: LocaleId,
    ) -> Self {
        self.shift = Some(shift);
        self.pay_rate_per_min = pay_rate_per_min;
        self.work_locale = Some(work_locale);
        self
    }
}

/// Per-asset construction parameters.
pub struct AssetSpec {
    pub kind: AssetKind,
    pub capacity: u32,
    /// Default duration of one use, in minutes.  Ignored for workplaces
    /// (work runs to the end of the shift window).
    pub duration_mins: u64,
}

impl AssetSpec {
    pub fn new(kind: AssetKind, capacity: u32, duration_mins: u64) -> Self {
        Self { kind, capacity, duration_mins }
    }
}

/// Accumulates homes, persons, and assets, then validates and produces a
/// [`World`].
#[derive(Default)]
pub struct PopulationBuilder {
    homes: Vec<Home>,
    persons: Vec<Person>,
    assets: Vec<Asset>,
    activities: Vec<Activity>,
}

impl PopulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a household at `locale`.
    pub fn add_home(&mut self, locale: LocaleId) -> HomeId {
        let id = HomeId(self.homes.len() as u32);
        self.homes.push(Home::new(id, locale));
        id
    }

    /// Create a person residing in `home`.  Member lists stay ascending by
    /// id because ids are handed out in insertion order.
    pub fn add_person(&mut self, home: HomeId, spec: PersonSpec) -> PersonId {
        let id = PersonId(self.persons.len() as u32);
        let home_locale = self.homes[home.index()].locale;

        let mut needs = NeedSet::new();
        for need in spec.needs {
            needs.insert(need);
        }
        let mut person = Person::new(id, home, home_locale, needs);
        person.base_shift = spec.shift;
        person.shift = spec.shift;
        person.pay_rate_per_min = spec.pay_rate_per_min;
        person.work_locale = spec.work_locale.unwrap_or(LocaleId::INVALID);

        self.homes[home.index()].members.push(id);
        self.persons.push(person);
        id
    }

    /// Create an asset owned by `home`, located at the home's locale.
    pub fn add_home_asset(&mut self, home: HomeId, spec: AssetSpec) -> AssetId {
        let locale = self.homes[home.index()].locale;
        let id = self.push_asset(spec, home, locale);
        self.homes[home.index()].assets.push(id);
        id
    }

    /// Create a shared asset reachable by locale only (workplace,
    /// cafeteria).  Pass `LocaleId::INVALID` for roaming transport.
    pub fn add_shared_asset(&mut self, locale: LocaleId, spec: AssetSpec) -> AssetId {
        self.push_asset(spec, HomeId::INVALID, locale)
    }

    fn push_asset(&mut self, spec: AssetSpec, home: HomeId, locale: LocaleId) -> AssetId {
        let id = AssetId(self.assets.len() as u32);
        let mut asset = Asset::new(id, spec.kind, home, locale, spec.capacity);
        // One reusable slot per capacity unit, created with the asset and
        // destroyed with it.
        for _ in 0..spec.capacity {
            let slot_id = ActivityId(self.activities.len() as u32);
            self.activities
                .push(Activity::new(slot_id, spec.kind.offers(), id, spec.duration_mins));
            asset.slots.push(slot_id);
        }
        self.assets.push(asset);
        id
    }

    /// Validate shape and produce the `World`.
    pub fn build(self) -> WorldResult<World> {
        for asset in &self.assets {
            if asset.capacity == 0 {
                return Err(WorldError::Build(format!("asset {} has zero capacity", asset.id)));
            }
            let needs_duration = asset.kind != AssetKind::Workplace;
            let zero = self.activities[asset.slots[0].index()].default_mins == 0;
            if needs_duration && zero {
                return Err(WorldError::Build(format!(
                    "asset {} ({}) has zero use duration",
                    asset.id, asset.kind
                )));
            }
        }
        for person in &self.persons {
            if person.needs.is_empty() {
                return Err(WorldError::Build(format!("{} has no needs", person.id)));
            }
            let has_income = person.needs.get(viv_need::NeedKind::Income).is_some();
            if has_income && person.base_shift.is_none() {
                return Err(WorldError::Build(format!(
                    "{} has an income need but no shift window",
                    person.id
                )));
            }
        }
        Ok(World::new(self.persons, self.homes, self.assets, self.activities))
    }
}
