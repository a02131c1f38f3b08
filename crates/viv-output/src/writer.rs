//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DiaryRow, OutputResult, RunSummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
pub trait OutputWriter {
    /// Write a batch of diary segments.
    fn write_diary(&mut self, rows: &[DiaryRow]) -> OutputResult<()>;

    /// Write one household summary row.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
