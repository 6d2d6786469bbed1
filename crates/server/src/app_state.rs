use crate::api::ShowcaseContext;
use shared::protocol::ServerEvent;
use tokio::sync::broadcast;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) showcase: ShowcaseContext,
    pub(crate) events: broadcast::Sender<ServerEvent>,
}
