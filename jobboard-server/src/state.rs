//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::config::AppConfig;
use crate::service::JobBoard;
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    board: JobBoard,
    identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(board: JobBoard, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { board, identity }),
        }
    }

    /// Wire a store to the configured provider and gate policy.
    pub fn from_config(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let board = JobBoard::new(store, config.policy());
        Self::new(board, config.identity.into_provider())
    }

    pub fn board(&self) -> &JobBoard {
        &self.inner.board
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }
}
