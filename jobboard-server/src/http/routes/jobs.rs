//! Job endpoints

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::{routing::get, Json, Router};

use super::Deleted;
use crate::auth::AuthContext;
use crate::filter::{JobSearch, JobSearchParams};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidUuid};
use crate::models::{Application, JobInput, JobPage, JobView};
use crate::state::AppState;

/// Search parameters never reject a request. Each key is read on its own,
/// so a repeated or malformed field cannot clear the others.
fn search_from_uri(uri: &Uri) -> JobSearch {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => JobSearchParams::from_pairs(pairs).into(),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unreadable job search query");
            JobSearch::default()
        }
    }
}

/// GET /jobs?location&remote&tags&categoryId&search&limit&offset
async fn list_jobs(
    State(state): State<AppState>,
    ctx: AuthContext,
    uri: Uri,
) -> Result<Json<JobPage>, ApiError> {
    let page = state.board().jobs(&ctx, search_from_uri(&uri)).await?;
    Ok(Json(page))
}

/// GET /jobs/{id}
async fn get_job(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<JobView>, ApiError> {
    Ok(Json(state.board().job(&ctx, id).await?))
}

/// GET /jobs/{id}/applications
async fn job_applications(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Vec<Application>>, ApiError> {
    Ok(Json(state.board().job_applications(&ctx, id).await?))
}

/// POST /jobs
async fn create_job(
    State(state): State<AppState>,
    ctx: AuthContext,
    JsonBody(input): JsonBody<JobInput>,
) -> Result<(StatusCode, Json<JobView>), ApiError> {
    let job = state.board().create_job(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /jobs/{id}
async fn update_job(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
    JsonBody(input): JsonBody<JobInput>,
) -> Result<Json<JobView>, ApiError> {
    Ok(Json(state.board().update_job(&ctx, id, input).await?))
}

/// DELETE /jobs/{id}
async fn delete_job(
    State(state): State<AppState>,
    ctx: AuthContext,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Deleted>, ApiError> {
    state.board().delete_job(&ctx, id).await?;
    Ok(Json(Deleted::YES))
}

/// Job routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).put(update_job).delete(delete_job))
        .route("/jobs/{id}/applications", get(job_applications))
}
