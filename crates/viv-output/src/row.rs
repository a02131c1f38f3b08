//! Plain data row types written by output backends.

/// One contiguous diary segment of one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaryRow {
    pub person_id: u32,
    /// Zero-based day the segment starts in.
    pub day: u64,
    /// Absolute start minute (inclusive).
    pub start_min: u64,
    /// Absolute end minute (exclusive).
    pub end_min: u64,
    /// Stable lower-case activity label (`sleep`, `eat`, `commute`, `work`).
    pub activity: &'static str,
}

/// End-of-run summary for one household.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummaryRow {
    pub home_id: u32,
    pub members: u64,
    /// Revenue accumulated from members' completed work.
    pub revenue: f64,
    /// Total minutes of completed work across all members.
    pub worked_mins: u64,
}
