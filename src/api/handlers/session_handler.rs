use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::session_dto::SessionResponse},
    error::AppError,
};

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session_service.create().await?;
    debug!("Created session: {}", session.id);

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting session: {}", id);

    let session = state.session_service.get(&id).await?;
    Ok(Json(SessionResponse::from(session)))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Deleting session: {}", id);

    state.session_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// "Reset": clears every flag and the detected mood
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Resetting session: {}", id);

    let session = state.session_service.reset(&id).await?;
    Ok(Json(SessionResponse::from(session)))
}
