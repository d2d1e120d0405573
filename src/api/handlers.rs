//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, error};

use crate::state::{AppState, TimerSnapshot};
use super::{
    responses::{CommandResponse, HealthResponse, PageMeta, StatusResponse},
    view::render_page,
};

/// Handle GET / - Render the timer page
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    match state.get_timer_state() {
        Ok(timer) => Ok(Html(render_page(&timer))),
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start-stop - Toggle the countdown
pub async fn start_stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    match state.start_stop() {
        Ok(timer) => {
            let message = if timer.running { "Timer started" } else { "Timer paused" };
            Ok(Json(CommandResponse::new("start-stop", message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /skip - Jump to the other phase
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    match state.skip() {
        Ok(timer) => {
            let message = format!("Skipped to {} phase", timer.phase.as_str());
            Ok(Json(CommandResponse::new("skip", message, timer)))
        }
        Err(e) => {
            error!("Failed to skip phase: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Pause and rewind the current phase
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<CommandResponse>, StatusCode> {
    match state.reset() {
        Ok(timer) => {
            let message = format!("Reset {} phase", timer.phase.as_str());
            Ok(Json(CommandResponse::new("reset", message, timer)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        clock: timer.clock(),
        page: PageMeta::from_snapshot(&timer),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

fn timer_event(timer: &TimerSnapshot) -> Result<Event, axum::Error> {
    Event::default().event("timer").json_data(timer)
}

/// Handle GET /events - Stream a snapshot on every timer change
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let mut rx = state.subscribe();
    let current = rx.borrow_and_update().clone();
    debug!("Event stream opened");

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let timer = rx.borrow_and_update().clone();
        Some((timer_event(&timer), rx))
    });

    let events = stream::once(async move { timer_event(&current) }).chain(updates);
    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
