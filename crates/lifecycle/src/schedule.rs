//! Fixed claim timeline, expressed as absolute offsets from a trigger.

use std::time::Duration;

use shared::domain::LifecycleState;

pub const ANTICIPATION_DURATION: Duration = Duration::from_millis(500);
pub const OPENING_DURATION: Duration = Duration::from_millis(1500);
pub const REVEALING_DURATION: Duration = Duration::from_millis(1500);
pub const CLAIMED_DURATION: Duration = Duration::from_millis(3000);

/// Number of lock layers the multi-stage box peels off while opening.
pub const UNLOCK_STAGES: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Enter(LifecycleState),
    Stage(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub offset: Duration,
    pub milestone: Milestone,
}

/// Steps after the trigger itself, ordered by offset. The trigger enters
/// `anticipation` at offset zero and is not part of the table.
pub const TIMELINE: [ScheduledStep; 7] = [
    step(500, Milestone::Enter(LifecycleState::Opening)),
    step(875, Milestone::Stage(1)),
    step(1250, Milestone::Stage(2)),
    step(1625, Milestone::Stage(3)),
    step(2000, Milestone::Enter(LifecycleState::Revealing)),
    step(3500, Milestone::Enter(LifecycleState::Claimed)),
    step(6500, Milestone::Enter(LifecycleState::Idle)),
];

const fn step(offset_ms: u64, milestone: Milestone) -> ScheduledStep {
    ScheduledStep {
        offset: Duration::from_millis(offset_ms),
        milestone,
    }
}

/// Offset at which `state` is entered after a trigger.
pub fn entry_offset(state: LifecycleState) -> Option<Duration> {
    if state == LifecycleState::Anticipation {
        return Some(Duration::ZERO);
    }
    TIMELINE
        .iter()
        .find(|step| step.milestone == Milestone::Enter(state))
        .map(|step| step.offset)
}

/// Full length of one sequence, trigger to reset.
pub fn sequence_length() -> Duration {
    ANTICIPATION_DURATION + OPENING_DURATION + REVEALING_DURATION + CLAIMED_DURATION
}
