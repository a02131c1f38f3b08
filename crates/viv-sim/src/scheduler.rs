//! Next-event computation.
//!
//! The engine never steps minute-by-minute: between rounds it jumps straight
//! to the earliest tick at which anything can change.  That tick is the
//! minimum over a closed candidate set:
//!
//! 1. **Threshold crossings** — the tick each decaying need becomes
//!    critical, excluding the need currently being restored by an active
//!    activity (its level is frozen until completion or interruption).
//! 2. **Preemption-bar crossings** — for committed persons, the tick a need
//!    becomes overdue enough for a penalized interruption bid to beat the
//!    continuation score.
//! 3. **Scheduled ends** of every active activity slot.
//! 4. **Shift-window openings** — the next start of each worker's daily
//!    window, where a critical income need first gets a work slot to bid.
//! 5. **The next day boundary**, where shift jitter is re-seeded.
//!
//! Candidate 5 always exists and is strictly in the future, so the result
//! is always a strict advance and runs over long quiet stretches still cost
//! at most one round per simulated day.

use viv_activity::{ActivityStatus, PREEMPT_PENALTY_MINS};
use viv_core::Tick;
use viv_world::{PersonState, World};

/// Earliest tick strictly after `now` at which world state can change.
pub fn next_event(world: &World, now: Tick) -> Tick {
    let mut next = now.next_day_start();
    let mut consider = |t: Tick| {
        if t > now && t < next {
            next = t;
        }
    };

    for activity in &world.activities {
        if let Some(end) = activity.scheduled_end() {
            consider(end);
        }
    }

    for person in &world.persons {
        // A need under active restoration has a frozen level; its crossings
        // are recomputed once the activity completes or is interrupted.
        let restoring = if person.active.is_valid() {
            let a = &world.activities[person.active.index()];
            (a.status == ActivityStatus::Active).then(|| a.kind.restores())
        } else {
            None
        };
        let committed = matches!(person.state, PersonState::Committed | PersonState::Preempted);

        for need in person.needs.iter() {
            if restoring == Some(need.kind) {
                continue;
            }
            if let Some(t) = need.threshold_crossing(now) {
                consider(t);
            }
            if committed {
                // The level at which a penalized interruption bid first ties
                // the continuation score.  Below zero it is unreachable.
                let bar = need.threshold - PREEMPT_PENALTY_MINS * need.rate_per_min;
                if bar >= 0.0
                    && let Some(dt) = need.time_to_level(bar)
                    && dt > 0
                {
                    consider(now.offset(dt));
                }
            }
        }

        if let Some(shift) = person.shift {
            consider(shift.next_start(now));
        }
    }

    next
}
