use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::{
            feedback_dto::{FeedbackResponse, SubmitFeedbackRequest},
            session_dto::SessionResponse,
        },
    },
    error::AppError,
    security::validation::Validatable,
};

/// "Give Feedback"
pub async fn open_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Opening feedback form for session {}", id);

    let session = state.session_service.open_feedback(&id).await?;
    Ok(Json(SessionResponse::from(session)))
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate(&state.limits)?;
    debug!("Submitting feedback for session {}", id);

    let outcome = state
        .session_service
        .submit_feedback(&id, request.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(FeedbackResponse::from(outcome))))
}
