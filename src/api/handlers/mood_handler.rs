use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::mood_dto::{MoodResponse, SubmitMoodRequest},
    },
    error::AppError,
    security::validation::Validatable,
};

/// Blank input is a no-op and answers 204 without touching the mood log.
pub async fn submit_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubmitMoodRequest>,
) -> Result<Response, AppError> {
    request.validate(&state.limits)?;
    debug!("Submitting mood for session {}", id);

    match state.session_service.submit_mood(&id, &request.text).await? {
        Some(outcome) => Ok((StatusCode::OK, Json(MoodResponse::from(outcome))).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
