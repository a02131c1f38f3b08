//! The closed set of need kinds.
//!
//! The kind set is fixed at design time, so kinds are a plain enum with an
//! immutable label table built into the binary — never a runtime-mutable
//! registry.

use std::fmt;

/// What a person must keep above threshold.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NeedKind {
    /// Restored by sleeping in a bed.
    Rest,
    /// Restored by eating at a food source.
    Hunger,
    /// Restored by commuting on transport (the urge to be elsewhere).
    Travel,
    /// Restored by working a shift at a workplace.
    Income,
}

impl NeedKind {
    /// All kinds, in canonical order.  The order is load-bearing: it is the
    /// slot order inside `NeedSet`.
    pub const ALL: [NeedKind; 4] = [
        NeedKind::Rest,
        NeedKind::Hunger,
        NeedKind::Travel,
        NeedKind::Income,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Canonical slot index, `0..COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            NeedKind::Rest => 0,
            NeedKind::Hunger => 1,
            NeedKind::Travel => 2,
            NeedKind::Income => 3,
        }
    }

    /// Stable lower-case label used in CSV input and diary output.
    pub fn label(self) -> &'static str {
        match self {
            NeedKind::Rest => "rest",
            NeedKind::Hunger => "hunger",
            NeedKind::Travel => "travel",
            NeedKind::Income => "income",
        }
    }

    /// Parse a label produced by [`label`](Self::label).
    pub fn from_label(s: &str) -> Option<NeedKind> {
        match s.trim() {
            "rest" => Some(NeedKind::Rest),
            "hunger" => Some(NeedKind::Hunger),
            "travel" => Some(NeedKind::Travel),
            "income" => Some(NeedKind::Income),
            _ => None,
        }
    }
}

impl fmt::Display for NeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
