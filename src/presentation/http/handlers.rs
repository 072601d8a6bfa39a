//! Request handlers.

use std::convert::Infallible;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use futures_util::StreamExt;
use futures_util::future::ready;
use futures_util::stream::{self, BoxStream};
use serde_json::json;
use tracing::debug;

use super::error::{ApiError, validation_body};
use super::state::AppState;
use crate::application::dto::{
    AnalyzeRequest, ChatStreamRequest, GossipReply, GossipRequest, HealthReport,
};
use crate::domain::entities::SpiritProfile;

/// Terminator of every chat stream.
pub const DONE_MARKER: &str = "[DONE]";

type EventStream = BoxStream<'static, Result<Event, Infallible>>;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        cache_size: state.analysis_cache.len(),
        openai_configured: state.openai_configured,
        upstream_failures: state.health.failures(),
    })
}

/// `POST /spirit-gossip`
pub async fn spirit_gossip(
    State(state): State<AppState>,
    payload: Result<Json<GossipRequest>, JsonRejection>,
) -> Result<Json<GossipReply>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.gossip.execute(request).await?))
}

/// `POST /api/v1/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SpiritProfile>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.analyze.analyze(&request).await?))
}

/// `POST /api/v1/spirit-chat/stream`
///
/// Emits `data: {"content": ...}` events followed by `data: [DONE]`. A
/// request without text gets one `error` event before the terminator.
pub async fn spirit_chat_stream(
    State(state): State<AppState>,
    payload: Result<Json<ChatStreamRequest>, JsonRejection>,
) -> Result<Sse<KeepAliveStream<EventStream>>, ApiError> {
    let Json(request) = payload?;

    let events: BoxStream<'static, Event> = match state.chat.stream(request).await {
        Ok(fragments) => fragments.map(|content| content_event(&content)).boxed(),
        Err(e) => {
            debug!(error = %e, "Rejecting chat stream request");
            let body = validation_body(&e);
            let event = Event::default()
                .event("error")
                .data(json!({ "error": body.error, "message": body.message }).to_string());
            stream::once(ready(event)).boxed()
        }
    };

    let done = Event::default().data(DONE_MARKER);
    let stream = events.chain(stream::once(ready(done))).map(Ok).boxed();

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn content_event(content: &str) -> Event {
    Event::default().data(json!({ "content": content }).to_string())
}
