//! Background task that advances the lifecycle in real time.

use shared::protocol::ServerEvent;
use tokio::{sync::broadcast, time};
use tracing::{debug, info};

use crate::api::{publish, transition_snapshots, ShowcaseContext};

/// Sleeps until the next deadline, applies what is due, publishes it, and
/// repeats. Parks on the wake signal while every box is at rest.
pub async fn run(ctx: ShowcaseContext, events: broadcast::Sender<ServerEvent>) {
    info!("lifecycle driver started");
    loop {
        let next_deadline = ctx.controller.lock().await.next_deadline();

        let Some(deadline) = next_deadline else {
            ctx.wake.notified().await;
            continue;
        };

        tokio::select! {
            _ = time::sleep_until(ctx.clock.instant_at(deadline)) => {}
            _ = ctx.wake.notified() => continue,
        }

        let snapshots = {
            let mut controller = ctx.controller.lock().await;
            let applied = controller.advance(ctx.clock.now());
            transition_snapshots(&controller, &applied)
        };
        debug!(
            deadline = ?deadline,
            applied = snapshots.len(),
            "driver tick"
        );
        publish(&events, snapshots);
    }
}
