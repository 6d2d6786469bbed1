use std::{collections::BTreeMap, time::Duration};

use shared::{
    domain::{all_box_ids, reward_for, BoxId, BoxVariant, LifecycleState},
    protocol::BoxSnapshot,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::schedule::{Milestone, TIMELINE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("unknown box {0}")]
    UnknownBox(BoxId),
    #[error("box {box_id} is mid-sequence ({state}); wait for it to be claimed")]
    SequenceInFlight {
        box_id: BoxId,
        state: LifecycleState,
    },
}

/// One applied change, stamped with the deadline it was due at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub box_id: BoxId,
    pub state: LifecycleState,
    pub stage: u8,
    pub at: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    started_at: Duration,
    next_step: usize,
}

impl Run {
    fn next_deadline(&self) -> Option<Duration> {
        TIMELINE
            .get(self.next_step)
            .map(|step| self.started_at + step.offset)
    }
}

#[derive(Debug, Clone)]
struct BoxRecord {
    variant: BoxVariant,
    reward: &'static str,
    state: LifecycleState,
    stage: u8,
    run: Option<Run>,
}

impl BoxRecord {
    fn new(variant: BoxVariant, reward: &'static str) -> Self {
        Self {
            variant,
            reward,
            state: LifecycleState::Idle,
            stage: 0,
            run: None,
        }
    }

    /// Applies every step due at or before `now`, oldest first.
    fn catch_up(&mut self, box_id: BoxId, now: Duration, applied: &mut Vec<Transition>) {
        while let Some(run) = self.run {
            let Some(step) = TIMELINE.get(run.next_step) else {
                self.run = None;
                break;
            };
            let due = run.started_at + step.offset;
            if due > now {
                break;
            }

            match step.milestone {
                Milestone::Enter(state) => {
                    self.state = state;
                    if state == LifecycleState::Idle {
                        self.stage = 0;
                    }
                }
                Milestone::Stage(stage) => self.stage = stage,
            }
            self.run = if self.state == LifecycleState::Idle {
                None
            } else {
                Some(Run {
                    next_step: run.next_step + 1,
                    ..run
                })
            };

            debug!(
                %box_id,
                state = %self.state,
                stage = self.stage,
                due = ?due,
                "applied lifecycle step"
            );
            applied.push(Transition {
                box_id,
                state: self.state,
                stage: self.stage,
                at: due,
            });
        }
    }

    fn snapshot(&self, box_id: BoxId) -> BoxSnapshot {
        BoxSnapshot {
            box_id,
            variant: self.variant,
            state: self.state,
            stage: self.stage,
            reward: self.reward.to_string(),
        }
    }
}

/// Owns the state of every box and advances it along the fixed timeline.
#[derive(Debug, Clone)]
pub struct LifecycleController {
    boxes: BTreeMap<BoxId, BoxRecord>,
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleController {
    /// One idle box per catalogue entry.
    pub fn new() -> Self {
        let boxes = all_box_ids()
            .filter_map(|box_id| {
                let variant = BoxVariant::for_box(box_id)?;
                let reward = reward_for(box_id)?;
                Some((box_id, BoxRecord::new(variant, reward)))
            })
            .collect();
        Self { boxes }
    }

    pub fn box_ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes.keys().copied()
    }

    /// Starts the claim sequence for `box_id` at `now`.
    ///
    /// Steps that fell due before `now` are applied first, so the returned
    /// list may hold catch-up transitions; the last entry is always the
    /// entry into `anticipation`. Triggering from `claimed` supersedes the
    /// pending reset. Any other non-idle state is rejected and the running
    /// sequence is left untouched.
    pub fn trigger(
        &mut self,
        box_id: BoxId,
        now: Duration,
    ) -> Result<Vec<Transition>, LifecycleError> {
        let record = self
            .boxes
            .get_mut(&box_id)
            .ok_or(LifecycleError::UnknownBox(box_id))?;

        let mut applied = Vec::new();
        record.catch_up(box_id, now, &mut applied);

        if record.state.is_in_flight() {
            debug!(%box_id, state = %record.state, "rejected trigger for in-flight box");
            return Err(LifecycleError::SequenceInFlight {
                box_id,
                state: record.state,
            });
        }

        record.state = LifecycleState::Anticipation;
        record.stage = 0;
        record.run = Some(Run {
            started_at: now,
            next_step: 0,
        });
        info!(%box_id, variant = ?record.variant, at = ?now, "claim sequence started");

        applied.push(Transition {
            box_id,
            state: LifecycleState::Anticipation,
            stage: 0,
            at: now,
        });
        Ok(applied)
    }

    /// Applies every step due at or before `now` across all boxes, ordered
    /// by deadline.
    pub fn advance(&mut self, now: Duration) -> Vec<Transition> {
        let mut applied = Vec::new();
        for (box_id, record) in self.boxes.iter_mut() {
            record.catch_up(*box_id, now, &mut applied);
        }
        applied.sort_by_key(|transition| transition.at);
        applied
    }

    /// Earliest pending deadline, or `None` when every box is at rest.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.boxes
            .values()
            .filter_map(|record| record.run.as_ref().and_then(Run::next_deadline))
            .min()
    }

    pub fn state(&self, box_id: BoxId) -> Option<LifecycleState> {
        self.boxes.get(&box_id).map(|record| record.state)
    }

    pub fn reward(&self, box_id: BoxId) -> Option<&'static str> {
        self.boxes.get(&box_id).map(|record| record.reward)
    }

    pub fn stage(&self, box_id: BoxId) -> Option<u8> {
        self.boxes.get(&box_id).map(|record| record.stage)
    }

    pub fn snapshot(&self, box_id: BoxId) -> Option<BoxSnapshot> {
        self.boxes
            .get(&box_id)
            .map(|record| record.snapshot(box_id))
    }

    pub fn snapshots(&self) -> Vec<BoxSnapshot> {
        self.boxes
            .iter()
            .map(|(box_id, record)| record.snapshot(*box_id))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
