use super::*;
use axum::{body, body::Body, http::Request};
use shared::{domain::LifecycleState, protocol::ServerEvent};
use tower::ServiceExt;

fn test_app() -> (Router, broadcast::Receiver<ServerEvent>) {
    let (events, rx) = broadcast::channel(32);
    let app = build_router(Arc::new(AppState {
        showcase: ShowcaseContext::new(),
        events,
    }));
    (app, rx)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _rx) = test_app();
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn index_renders_every_box() {
    let (app, _rx) = test_app();
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let page = String::from_utf8(body_bytes(response).await).expect("utf8");
    assert!(page.contains(render::PAGE_TITLE));
    for box_id in 0..8 {
        assert!(page.contains(&format!("id=\"box-{box_id}\"")), "box {box_id}");
    }
}

#[tokio::test]
async fn boxes_route_lists_idle_boxes() {
    let (app, _rx) = test_app();
    let request = Request::get("/boxes").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let boxes: Vec<BoxSnapshot> =
        serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(boxes.len(), 8);
    assert!(boxes.iter().all(|b| b.state == LifecycleState::Idle));
    assert_eq!(boxes[0].reward, "🏆 Legendary Sword");
    let ids: Vec<u32> = boxes.iter().map(|b| b.box_id.0).collect();
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
}

#[tokio::test]
async fn unknown_box_is_not_found() {
    let (app, _rx) = test_app();
    let request = Request::get("/boxes/42")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let err: ApiError = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn trigger_route_starts_sequence_and_rejects_reentry() {
    let (app, mut rx) = test_app();

    let request = Request::post("/boxes/3/trigger")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let snapshot: BoxSnapshot =
        serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(snapshot.state, LifecycleState::Anticipation);

    let ServerEvent::BoxStateChanged { snapshot, html, .. } = rx.recv().await.expect("event");
    assert_eq!(snapshot.box_id, BoxId(3));
    assert!(html.contains("data-state=\"anticipation\""));

    let again = Request::post("/boxes/3/trigger")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(again).await.expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let err: ApiError = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(err.code, ErrorCode::Conflict);

    let other = Request::post("/boxes/4/trigger")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(other).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn fragment_route_renders_single_box() {
    let (app, _rx) = test_app();
    let request = Request::get("/boxes/5/fragment")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).expect("utf8");
    assert!(html.starts_with("<section id=\"box-5\""));
    assert!(html.contains("Multi-Stage Unlock"));
}

#[tokio::test]
async fn non_numeric_box_id_is_a_validation_error() {
    let (app, _rx) = test_app();

    for request in [
        Request::get("/boxes/abc").body(Body::empty()).expect("request"),
        Request::get("/boxes/abc/fragment")
            .body(Body::empty())
            .expect("request"),
        Request::post("/boxes/-1/trigger")
            .body(Body::empty())
            .expect("request"),
    ] {
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body_bytes(response).await).expect("json");
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(!err.message.is_empty());
    }
}

#[tokio::test]
async fn websocket_streams_published_box_events() {
    use futures::StreamExt;
    use std::time::Duration;
    use tokio_tungstenite::{connect_async, tungstenite::Message};

    let (events, _rx) = broadcast::channel(32);
    let showcase = ShowcaseContext::new();
    let app = build_router(Arc::new(AppState {
        showcase: showcase.clone(),
        events: events.clone(),
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let (mut socket, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("websocket handshake");

    // The subscription is registered after the upgrade completes, so keep
    // publishing until the first frame arrives.
    let snapshot = showcase
        .controller
        .lock()
        .await
        .snapshot(BoxId(6))
        .expect("snapshot");
    let mut received = None;
    for _ in 0..50 {
        api::publish(&events, vec![snapshot.clone()]);
        if let Ok(frame) = tokio::time::timeout(Duration::from_millis(100), socket.next()).await {
            received = frame;
            break;
        }
    }

    let Some(Ok(Message::Text(text))) = received else {
        panic!("expected a text frame, got {received:?}");
    };
    let ServerEvent::BoxStateChanged { snapshot, html, .. } =
        serde_json::from_str(&text).expect("event json");
    assert_eq!(snapshot.box_id, BoxId(6));
    assert_eq!(snapshot.state, LifecycleState::Idle);
    assert!(html.starts_with("<section id=\"box-6\""));

    server.abort();
}
