//! The closed set of activity kinds.

use std::fmt;

use viv_need::NeedKind;

/// What a person can do with an asset.  The set is fixed at design time and
/// dispatched by pattern matching, not runtime subclassing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActivityKind {
    /// Sleep in a bed; restores [`NeedKind::Rest`].
    Sleep,
    /// Eat at a food source; restores [`NeedKind::Hunger`].
    Eat,
    /// Ride transport; restores [`NeedKind::Travel`] and moves the person
    /// between home and work locales.
    Commute,
    /// Work a shift at a workplace; restores [`NeedKind::Income`] and earns
    /// household revenue.  Only bids inside the person's shift window.
    Work,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::Sleep,
        ActivityKind::Eat,
        ActivityKind::Commute,
        ActivityKind::Work,
    ];

    /// The need this activity restores.
    #[inline]
    pub fn restores(self) -> NeedKind {
        match self {
            ActivityKind::Sleep => NeedKind::Rest,
            ActivityKind::Eat => NeedKind::Hunger,
            ActivityKind::Commute => NeedKind::Travel,
            ActivityKind::Work => NeedKind::Income,
        }
    }

    /// Stable lower-case label used in diary output.
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Sleep => "sleep",
            ActivityKind::Eat => "eat",
            ActivityKind::Commute => "commute",
            ActivityKind::Work => "work",
        }
    }

    /// Parse a label produced by [`label`](Self::label).
    pub fn from_label(s: &str) -> Option<ActivityKind> {
        match s.trim() {
            "sleep" => Some(ActivityKind::Sleep),
            "eat" => Some(ActivityKind::Eat),
            "commute" => Some(ActivityKind::Commute),
            "work" => Some(ActivityKind::Work),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
