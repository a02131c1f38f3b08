//! `NeedSet` — one person's needs, stored in fixed per-kind slots.
//!
//! A plain array indexed by `NeedKind::index()` instead of a hash map:
//! the kind set is closed, lookups are branch-free, and iteration order is
//! the canonical kind order, which keeps every downstream computation
//! deterministic.

use crate::{Need, NeedKind};

/// Fixed-slot container for one person's needs.  A person need not carry
/// every kind (a retiree has no income need).
#[derive(Clone, Debug, Default)]
pub struct NeedSet {
    slots: [Option<Need>; NeedKind::COUNT],
}

impl NeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the need of `need.kind`.
    pub fn insert(&mut self, need: Need) {
        let slot = need.kind.index();
        self.slots[slot] = Some(need);
    }

    pub fn get(&self, kind: NeedKind) -> Option<&Need> {
        self.slots[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: NeedKind) -> Option<&mut Need> {
        self.slots[kind.index()].as_mut()
    }

    /// Present needs in canonical kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Need> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Need> {
        self.slots.iter_mut().filter_map(|slot| slot.as_mut())
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Decay every need by `dt_mins`, except `skip` (the kind currently
    /// being restored by an in-progress activity, if any).
    pub fn decay_all(&mut self, dt_mins: u64, skip: Option<NeedKind>) {
        for need in self.iter_mut() {
            if Some(need.kind) != skip {
                need.decay(dt_mins);
            }
        }
    }

    /// Reset every need to its construction-time level.  Start-of-run only.
    pub fn reset(&mut self) {
        for need in self.iter_mut() {
            need.reset();
        }
    }
}
