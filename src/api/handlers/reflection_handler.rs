use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::reflection_dto::{ReflectionResponse, SaveReflectionRequest},
    },
    error::AppError,
    security::validation::Validatable,
};

/// A failed write still answers 200; the body carries `saved: false` and the message to show.
pub async fn save_reflection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SaveReflectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate(&state.limits)?;
    debug!("Saving reflection for session {}", id);

    let outcome = state.session_service.save_reflection(&id, &request.text).await?;
    Ok(Json(ReflectionResponse::from(outcome)))
}
