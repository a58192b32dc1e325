//! Current caller

use axum::{routing::get, Json, Router};

use crate::auth::AuthContext;
use crate::state::AppState;

/// GET /me - authentication outcome of this request
async fn me(ctx: AuthContext) -> Json<AuthContext> {
    Json(ctx)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
