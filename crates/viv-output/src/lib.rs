//! `viv-output` — simulation output writers for the vivarium framework.
//!
//! The CSV backend creates two files:
//!
//! | File              | Contents                                      |
//! |-------------------|-----------------------------------------------|
//! | `diaries.csv`     | One row per contiguous activity segment       |
//! | `run_summary.csv` | One row per household (members, revenue, …)   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `viv_sim::UniverseObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use viv_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! universe.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DiaryRow, RunSummaryRow};
pub use writer::OutputWriter;
