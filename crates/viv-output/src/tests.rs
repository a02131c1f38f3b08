//! Unit tests for viv-output.

use std::path::Path;

use viv_core::SimConfig;
use viv_need::{Need, NeedKind};
use viv_sim::UniverseBuilder;
use viv_world::{AssetKind, AssetSpec, PersonSpec, PopulationBuilder};

use crate::{CsvWriter, DiaryRow, OutputWriter, RunSummaryRow, SimOutputObserver};

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

mod csv_backend {
    use super::*;

    #[test]
    fn writes_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();

        writer
            .write_diary(&[
                DiaryRow { person_id: 0, day: 0, start_min: 80, end_min: 110, activity: "eat" },
                DiaryRow { person_id: 1, day: 1, start_min: 1_500, end_min: 1_560, activity: "sleep" },
            ])
            .unwrap();
        writer
            .write_run_summary(&RunSummaryRow {
                home_id: 0,
                members: 2,
                revenue: 216.5,
                worked_mins: 540,
            })
            .unwrap();
        writer.finish().unwrap();

        let diaries = read(&dir.path().join("diaries.csv"));
        assert_eq!(
            diaries,
            "person_id,day,start_min,end_min,activity\n\
             0,0,80,110,eat\n\
             1,1,1500,1560,sleep\n"
        );
        let summary = read(&dir.path().join("run_summary.csv"));
        assert_eq!(
            summary,
            "home_id,members,revenue,worked_mins\n\
             0,2,216.50,540\n"
        );
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

mod observer {
    use super::*;

    #[test]
    fn drains_a_finished_run_into_csv() {
        // One hungry person who eats once at t=80.
        let mut b = PopulationBuilder::new();
        let home = b.add_home(viv_core::LocaleId(0));
        b.add_person(
            home,
            PersonSpec::new(vec![Need::new(NeedKind::Hunger, 100.0, 100.0, 1.0, 20.0)]),
        );
        b.add_home_asset(home, AssetSpec::new(AssetKind::FoodSource, 1, 30));
        let world = b.build().unwrap();

        let config = SimConfig { horizon_mins: 120, seed: 7, validate_invariants: true };
        let mut universe = UniverseBuilder::new(config, world).build().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        universe.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let diaries = read(&dir.path().join("diaries.csv"));
        assert_eq!(
            diaries,
            "person_id,day,start_min,end_min,activity\n\
             0,0,80,110,eat\n"
        );
        let summary = read(&dir.path().join("run_summary.csv"));
        assert_eq!(
            summary,
            "home_id,members,revenue,worked_mins\n\
             0,1,0.00,0\n"
        );
    }
}
