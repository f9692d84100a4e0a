use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::AppState;
use crate::config::AppConfig;
use crate::llm::{ChatCompletionsClient, LlmSettings};
use crate::replies::ReplyService;
use crate::types::{ChatRequest, ChatResponse, HealthResponse};

const INTERNAL_ERROR: &str = "Sorry, I encountered an error. Please try again.";

/// Build the application state from configuration.
pub fn build_state(config: Arc<AppConfig>) -> AppState {
    let llm = LlmSettings::from_config(&config.llm).map(|settings| {
        info!(
            name: "llm.config.loaded",
            base_url = %settings.base_url,
            model = %settings.model,
            "LLM configuration loaded"
        );
        ChatCompletionsClient::new(settings)
    });
    if llm.is_none() {
        info!(name: "llm.config.absent", "No LLM configured; using predefined replies");
    }

    AppState {
        replies: Arc::new(ReplyService::new(llm)),
        config,
    }
}

/// Routes served by the backend.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = router(build_state(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %format!("http://{addr}"),
        "Server started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            error!(name: "chat.request.invalid", error = %rejection, "Unreadable chat request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::failure(INTERNAL_ERROR)),
            )
                .into_response();
        }
    };

    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::failure("Message is required")),
        )
            .into_response();
    }

    let reply = state.replies.reply(message).await;
    info!(
        name: "chat.reply.sent",
        source = reply.source.label(),
        "Reply sent"
    );

    Json(ChatResponse::reply(reply.text, reply.source.label())).into_response()
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Customer Support Chatbot is running!".to_string(),
    })
}
