//! Category endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use super::Deleted;
use crate::auth::AuthContext;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidUuid};
use crate::models::{Category, CategoryInput};
use crate::state::AppState;

async fn list_categories(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.board().categories(&ctx).await?))
}

async fn get_category(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.board().category(&ctx, id).await?))
}

async fn create_category(
    State(state): State<AppState>,
    ctx: AuthContext,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.board().create_category(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.board().update_category(&ctx, id, input).await?))
}

/// DELETE /categories/{id} - jobs in it become uncategorised
async fn delete_category(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Deleted>, ApiError> {
    state.board().delete_category(&ctx, id).await?;
    Ok(Json(Deleted::YES))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
