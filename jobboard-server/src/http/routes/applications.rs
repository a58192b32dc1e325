//! Application endpoints
//!
//! Submitting is public. Review actions (status, delete) follow the gate
//! policy.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};

use super::Deleted;
use crate::auth::AuthContext;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidUuid};
use crate::models::{ApplicationInput, ApplicationView, StatusInput};
use crate::state::AppState;

async fn list_applications(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<ApplicationView>>, ApiError> {
    Ok(Json(state.board().applications(&ctx).await?))
}

async fn get_application(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<ApplicationView>, ApiError> {
    Ok(Json(state.board().application(&ctx, id).await?))
}

async fn create_application(
    State(state): State<AppState>,
    ctx: AuthContext,
    JsonBody(input): JsonBody<ApplicationInput>,
) -> Result<(StatusCode, Json<ApplicationView>), ApiError> {
    let application = state.board().create_application(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// PATCH /applications/{id}/status
async fn update_status(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
    JsonBody(input): JsonBody<StatusInput>,
) -> Result<Json<ApplicationView>, ApiError> {
    Ok(Json(
        state
            .board()
            .update_application_status(&ctx, id, input)
            .await?,
    ))
}

async fn delete_application(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Deleted>, ApiError> {
    state.board().delete_application(&ctx, id).await?;
    Ok(Json(Deleted::YES))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(list_applications).post(create_application),
        )
        .route(
            "/applications/{id}",
            get(get_application).delete(delete_application),
        )
        .route("/applications/{id}/status", patch(update_status))
}
