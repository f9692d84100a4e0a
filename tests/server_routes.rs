use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use support_chat::AppState;
use support_chat::config::AppConfig;
use support_chat::replies::ReplyService;
use support_chat::server::router;

fn app() -> Router {
    let config = AppConfig::load_from_args(["support-chat"]).expect("default config");
    router(AppState {
        replies: Arc::new(ReplyService::default()),
        config: Arc::new(config),
    })
}

async fn post_chat(body: impl Into<Body>, json_content: bool) -> (StatusCode, Value) {
    let mut req = Request::builder().method("POST").uri("/chat");
    if json_content {
        req = req.header(header::CONTENT_TYPE, "application/json");
    }
    let response = app()
        .oneshot(req.body(body.into()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_chat_returns_predefined_reply() {
    let (status, body) = post_chat(json!({ "message": "What are your hours?" }).to_string(), true).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "Predefined");
    assert_eq!(
        body["response"],
        "Our business hours are Monday-Friday 9 AM to 6 PM EST."
    );
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let (status, body) = post_chat(json!({ "message": "   " }).to_string(), true).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn test_chat_missing_message_field() {
    let (status, body) = post_chat("{}", true).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn test_chat_unreadable_body() {
    let (status, body) = post_chat("not json", true).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Sorry, I encountered an error. Please try again."
    );

    let (status, _) = post_chat(json!({ "message": "hi" }).to_string(), false).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Customer Support Chatbot is running!");
}
