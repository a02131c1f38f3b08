//! CSV population loader.
//!
//! # CSV format
//!
//! One row per (person, need).  All rows for the same person must agree on
//! `home_id`; the shift columns are read from the `income` row and may be
//! left empty everywhere else.
//!
//! ```csv
//! person_id,home_id,need,level,max,rate_per_min,threshold,shift_start,shift_end,pay_rate,work_locale
//! 0,0,rest,100,100,0.12,30,,,,
//! 0,0,hunger,90,100,0.07,25,,,,
//! 0,0,income,60,100,0.03,40,480,1020,0.5,7
//! 1,0,rest,95,100,0.11,30,,,,
//! ```
//!
//! `home_id` values must match the `HomeId`s handed out by the caller's
//! `PopulationBuilder` (homes are declared in code, persons in data).
//! Person ids must be dense from 0 — the loader returns specs in id order
//! so they can be fed to `add_person` directly.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use viv_activity::ShiftWindow;
use viv_core::{HomeId, LocaleId};
use viv_need::{Need, NeedKind};

use crate::{PersonSpec, WorldError, WorldResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PersonRecord {
    person_id: u32,
    home_id: u32,
    need: String,
    level: f64,
    max: f64,
    rate_per_min: f64,
    threshold: f64,
    shift_start: Option<u64>,
    shift_end: Option<u64>,
    pay_rate: Option<f64>,
    work_locale: Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load `(home, spec)` pairs from a CSV file, ordered by person id.
pub fn load_population_csv(path: &Path) -> WorldResult<Vec<(HomeId, PersonSpec)>> {
    let file = std::fs::File::open(path).map_err(WorldError::Io)?;
    load_population_reader(file)
}

/// Like [`load_population_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded populations.
pub fn load_population_reader<R: Read>(reader: R) -> WorldResult<Vec<(HomeId, PersonSpec)>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_person: HashMap<u32, Vec<PersonRecord>> = HashMap::new();

    for result in csv_reader.deserialize::<PersonRecord>() {
        let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
        by_person.entry(row.person_id).or_default().push(row);
    }

    let count = by_person.len();
    let mut specs = Vec::with_capacity(count);

    for i in 0..count as u32 {
        let rows = by_person.remove(&i).ok_or_else(|| {
            WorldError::Parse(format!("person ids must be dense from 0; id {i} is missing"))
        })?;
        let home = HomeId(rows[0].home_id);
        if rows.iter().any(|r| r.home_id != home.0) {
            return Err(WorldError::Parse(format!(
                "person {i} appears under more than one home_id"
            )));
        }

        let mut spec = PersonSpec::new(Vec::new());
        for row in rows {
            let kind = NeedKind::from_label(&row.need).ok_or_else(|| {
                WorldError::Parse(format!("unknown need kind {:?} for person {i}", row.need))
            })?;
            spec.needs
                .push(Need::new(kind, row.level, row.max, row.rate_per_min, row.threshold));

            if kind == NeedKind::Income {
                let (start, end) = match (row.shift_start, row.shift_end) {
                    (Some(s), Some(e)) if s < e => (s, e),
                    _ => {
                        return Err(WorldError::Parse(format!(
                            "person {i}: income row needs shift_start < shift_end"
                        )));
                    }
                };
                spec.shift = Some(ShiftWindow::new(start, end));
                spec.pay_rate_per_min = row.pay_rate.unwrap_or(0.0);
                spec.work_locale = row.work_locale.map(LocaleId);
            }
        }
        specs.push((home, spec));
    }

    Ok(specs)
}
