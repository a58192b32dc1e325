//! Company endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use super::Deleted;
use crate::auth::AuthContext;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidUuid};
use crate::models::{Company, CompanyInput, CompanyView};
use crate::state::AppState;

/// GET /companies - by name, each with its jobs
async fn list_companies(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<CompanyView>>, ApiError> {
    Ok(Json(state.board().companies(&ctx).await?))
}

async fn get_company(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<CompanyView>, ApiError> {
    Ok(Json(state.board().company(&ctx, id).await?))
}

async fn create_company(
    State(state): State<AppState>,
    ctx: AuthContext,
    JsonBody(input): JsonBody<CompanyInput>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let company = state.board().create_company(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn update_company(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
    JsonBody(input): JsonBody<CompanyInput>,
) -> Result<Json<Company>, ApiError> {
    Ok(Json(state.board().update_company(&ctx, id, input).await?))
}

async fn delete_company(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Deleted>, ApiError> {
    state.board().delete_company(&ctx, id).await?;
    Ok(Json(Deleted::YES))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
}
