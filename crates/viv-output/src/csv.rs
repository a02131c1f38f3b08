//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `diaries.csv`
//! - `run_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DiaryRow, OutputResult, RunSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    diaries: Writer<File>,
    summaries: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut diaries = Writer::from_path(dir.join("diaries.csv"))?;
        diaries.write_record(["person_id", "day", "start_min", "end_min", "activity"])?;

        let mut summaries = Writer::from_path(dir.join("run_summary.csv"))?;
        summaries.write_record(["home_id", "members", "revenue", "worked_mins"])?;

        Ok(Self {
            diaries,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_diary(&mut self, rows: &[DiaryRow]) -> OutputResult<()> {
        for row in rows {
            self.diaries.write_record(&[
                row.person_id.to_string(),
                row.day.to_string(),
                row.start_min.to_string(),
                row.end_min.to_string(),
                row.activity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.home_id.to_string(),
            row.members.to_string(),
            format!("{:.2}", row.revenue),
            row.worked_mins.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.diaries.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
