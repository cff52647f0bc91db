use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures_util::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::IntervalStream;
use tracing::debug;

use crate::{
    api::app_state::AppState,
    error::AppError,
    models::breathing::{BreathingSnapshot, BreathingStatus},
    services::session::SessionService,
};

pub async fn start_breathing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Starting breathing exercise for session {}", id);

    let snapshot = state.session_service.start_breathing(&id).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

pub async fn get_breathing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.session_service.breathing_snapshot(&id).await?;
    Ok(Json(snapshot))
}

pub async fn cancel_breathing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Cancelling breathing exercise for session {}", id);

    let snapshot = state.session_service.cancel_breathing(&id).await?;
    Ok(Json(snapshot))
}

fn event_name(status: BreathingStatus) -> &'static str {
    match status {
        BreathingStatus::Running => "progress",
        BreathingStatus::Completed => "completed",
        BreathingStatus::Cancelled => "cancelled",
    }
}

fn snapshot_event(snapshot: &BreathingSnapshot) -> Event {
    Event::default()
        .event(event_name(snapshot.status))
        .json_data(snapshot)
        .unwrap_or_else(|e| Event::default().event("error").data(e.to_string()))
}

/// Streams one progress event per tick and closes after the terminal event.
pub async fn stream_breathing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let first = state.session_service.breathing_snapshot(&id).await?;
    debug!(
        "Streaming breathing exercise {} for session {}",
        first.exercise_id, id
    );

    let ticks = IntervalStream::new(tokio::time::interval(state.stream_tick));
    let service: Arc<dyn SessionService> = Arc::clone(&state.session_service);

    let events = stream::unfold(
        (ticks, service, id, false),
        |(mut ticks, service, id, finished)| async move {
            if finished {
                return None;
            }
            ticks.next().await?;

            let (event, finished) = match service.breathing_snapshot(&id).await {
                Ok(snapshot) => (
                    snapshot_event(&snapshot),
                    snapshot.status != BreathingStatus::Running,
                ),
                Err(e) => (Event::default().event("error").data(e.to_string()), true),
            };
            Some((Ok(event), (ticks, service, id, finished)))
        },
    );

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(event_name(BreathingStatus::Running), "progress");
        assert_eq!(event_name(BreathingStatus::Completed), "completed");
        assert_eq!(event_name(BreathingStatus::Cancelled), "cancelled");
    }
}
