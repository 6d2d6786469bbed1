use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::PathRejection, Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use shared::{
    domain::BoxId,
    error::{ApiError, ErrorCode},
    protocol::BoxSnapshot,
};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;
mod driver;

use api::{box_snapshot, list_boxes, trigger_box, ShowcaseContext};
use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let showcase = ShowcaseContext::new();
    let (events, _) = broadcast::channel(settings.event_buffer);

    tokio::spawn(driver::run(showcase.clone(), events.clone()));

    let state = AppState { showcase, events };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "showcase listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/boxes", get(http_list_boxes))
        .route("/boxes/:box_id", get(http_box_snapshot))
        .route("/boxes/:box_id/fragment", get(http_box_fragment))
        .route("/boxes/:box_id/trigger", post(http_trigger_box))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    }
}

fn box_id_from(path: Result<Path<u32>, PathRejection>) -> Result<BoxId, ApiError> {
    path.map(|Path(box_id)| BoxId(box_id))
        .map_err(|rejection| ApiError::new(ErrorCode::Validation, rejection.body_text()))
}

fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let snapshots = list_boxes(&state.showcase).await;
    Html(render::render_page(&snapshots))
}

async fn http_list_boxes(State(state): State<Arc<AppState>>) -> Json<Vec<BoxSnapshot>> {
    Json(list_boxes(&state.showcase).await)
}

async fn http_box_snapshot(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u32>, PathRejection>,
) -> ApiResult<Json<BoxSnapshot>> {
    let box_id = box_id_from(path).map_err(reject)?;
    let snapshot = box_snapshot(&state.showcase, box_id)
        .await
        .map_err(reject)?;
    Ok(Json(snapshot))
}

async fn http_box_fragment(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u32>, PathRejection>,
) -> ApiResult<Html<String>> {
    let box_id = box_id_from(path).map_err(reject)?;
    let snapshot = box_snapshot(&state.showcase, box_id)
        .await
        .map_err(reject)?;
    Ok(Html(render::render_box(&snapshot)))
}

async fn http_trigger_box(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u32>, PathRejection>,
) -> ApiResult<Json<BoxSnapshot>> {
    let box_id = box_id_from(path).map_err(reject)?;
    let snapshot = trigger_box(&state.showcase, &state.events, box_id)
        .await
        .map_err(|err| {
            info!(%box_id, error = %err.message, "trigger rejected");
            reject(err)
        })?;
    Ok(Json(snapshot))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: axum::extract::ws::WebSocket) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let mut events_rx = state.events.subscribe();

    let send_task = tokio::spawn(async move {
        loop {
            let event = match events_rx.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "websocket subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
