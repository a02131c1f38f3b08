//! `SimOutputObserver<W>` — bridges `UniverseObserver` to an `OutputWriter`.

use viv_activity::ActivityKind;
use viv_sim::UniverseObserver;
use viv_world::World;

use crate::OutputError;
use crate::row::{DiaryRow, RunSummaryRow};
use crate::writer::OutputWriter;

/// A [`UniverseObserver`] that drains diaries and household summaries into
/// any [`OutputWriter`] backend at the end of a run.
///
/// Errors from the writer are stored internally because `UniverseObserver`
/// methods have no return value.  After `universe.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `universe.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> UniverseObserver for SimOutputObserver<W> {
    fn on_run_end(&mut self, world: &World) {
        for person in &world.persons {
            let rows: Vec<DiaryRow> = person
                .diary
                .iter()
                .map(|seg| DiaryRow {
                    person_id: person.id.0,
                    day: seg.start.day(),
                    start_min: seg.start.0,
                    end_min: seg.end.0,
                    activity: seg.kind.label(),
                })
                .collect();
            let result = self.writer.write_diary(&rows);
            self.store_err(result);
        }

        for home in &world.homes {
            let worked_mins: u64 = home
                .members
                .iter()
                .flat_map(|&m| world.persons[m.index()].diary.iter())
                .filter(|seg| seg.kind == ActivityKind::Work)
                .map(|seg| seg.end - seg.start)
                .sum();
            let row = RunSummaryRow {
                home_id: home.id.0,
                members: home.members.len() as u64,
                revenue: home.revenue,
                worked_mins,
            };
            let result = self.writer.write_run_summary(&row);
            self.store_err(result);
        }

        let result = self.writer.finish();
        self.store_err(result);
    }
}
