use std::{sync::Arc, time::Duration};

use chrono::Utc;
use lifecycle::{LifecycleController, LifecycleError, Transition};
use render::render_box;
use shared::{
    domain::BoxId,
    error::{ApiError, ErrorCode},
    protocol::{BoxSnapshot, ServerEvent},
};
use tokio::{
    sync::{broadcast, Mutex, Notify},
    time::Instant,
};
use tracing::debug;

/// Maps controller offsets onto the runtime clock.
#[derive(Debug, Clone, Copy)]
pub struct ShowcaseClock {
    epoch: Instant,
}

impl ShowcaseClock {
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn instant_at(&self, offset: Duration) -> Instant {
        self.epoch + offset
    }
}

#[derive(Clone)]
pub struct ShowcaseContext {
    pub controller: Arc<Mutex<LifecycleController>>,
    pub clock: ShowcaseClock,
    /// Wakes the driver when a trigger adds new deadlines.
    pub wake: Arc<Notify>,
}

impl Default for ShowcaseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseContext {
    pub fn new() -> Self {
        Self {
            controller: Arc::new(Mutex::new(LifecycleController::new())),
            clock: ShowcaseClock::start(),
            wake: Arc::new(Notify::new()),
        }
    }
}

pub async fn list_boxes(ctx: &ShowcaseContext) -> Vec<BoxSnapshot> {
    ctx.controller.lock().await.snapshots()
}

pub async fn box_snapshot(ctx: &ShowcaseContext, box_id: BoxId) -> Result<BoxSnapshot, ApiError> {
    ctx.controller
        .lock()
        .await
        .snapshot(box_id)
        .ok_or_else(|| unknown_box(box_id))
}

/// Starts a claim sequence and publishes the resulting transitions.
pub async fn trigger_box(
    ctx: &ShowcaseContext,
    events: &broadcast::Sender<ServerEvent>,
    box_id: BoxId,
) -> Result<BoxSnapshot, ApiError> {
    let (snapshots, current) = {
        let mut controller = ctx.controller.lock().await;
        let applied = controller
            .trigger(box_id, ctx.clock.now())
            .map_err(lifecycle_error)?;
        let snapshots = transition_snapshots(&controller, &applied);
        let current = controller
            .snapshot(box_id)
            .ok_or_else(|| unknown_box(box_id))?;
        (snapshots, current)
    };

    ctx.wake.notify_one();
    publish(events, snapshots);
    Ok(current)
}

/// Snapshot of each transition as it looked when applied, which differs
/// from the box's current snapshot when several steps were caught up at once.
pub fn transition_snapshots(
    controller: &LifecycleController,
    transitions: &[Transition],
) -> Vec<BoxSnapshot> {
    transitions
        .iter()
        .filter_map(|transition| {
            let mut snapshot = controller.snapshot(transition.box_id)?;
            snapshot.state = transition.state;
            snapshot.stage = transition.stage;
            Some(snapshot)
        })
        .collect()
}

pub fn publish(events: &broadcast::Sender<ServerEvent>, snapshots: Vec<BoxSnapshot>) {
    for snapshot in snapshots {
        let html = render_box(&snapshot);
        debug!(box_id = %snapshot.box_id, state = %snapshot.state, stage = snapshot.stage, "publishing box state");
        // No subscribers is normal before the page connects.
        let _ = events.send(ServerEvent::BoxStateChanged {
            snapshot,
            html,
            emitted_at: Utc::now(),
        });
    }
}

fn unknown_box(box_id: BoxId) -> ApiError {
    lifecycle_error(LifecycleError::UnknownBox(box_id))
}

fn lifecycle_error(err: LifecycleError) -> ApiError {
    let code = match err {
        LifecycleError::UnknownBox(_) => ErrorCode::NotFound,
        LifecycleError::SequenceInFlight { .. } => ErrorCode::Conflict,
    };
    ApiError::new(code, err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
