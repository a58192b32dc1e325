//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use jobboard_server::auth::{AuthContext, GatePolicy, Identity};
use jobboard_server::models::{CategoryInput, Company, CompanyInput, JobInput, JobView};
use jobboard_server::store::{MemoryStore, Store};
use jobboard_server::JobBoard;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("jobboard_server=debug")
        .try_init();
}

pub fn admin() -> AuthContext {
    AuthContext::authenticated(Identity {
        uid: "admin-uid".into(),
        email: Some("admin@example.com".into()),
    })
}

pub fn anonymous() -> AuthContext {
    AuthContext::anonymous()
}

pub fn board() -> (JobBoard, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let board = JobBoard::new(store.clone() as Arc<dyn Store>, GatePolicy::default());
    (board, store)
}

pub async fn company(board: &JobBoard, name: &str) -> Company {
    board
        .create_company(
            &admin(),
            CompanyInput {
                name: Some(name.into()),
                ..Default::default()
            },
        )
        .await
        .expect("create company")
}

pub fn job_input(company: &Company, title: &str) -> JobInput {
    JobInput {
        title: Some(title.into()),
        description: Some(format!("{title} wanted")),
        location: Some("Berlin".into()),
        remote: Some(false),
        company_id: Some(company.id.to_string()),
        ..Default::default()
    }
}

pub async fn job(board: &JobBoard, input: JobInput) -> JobView {
    board.create_job(&admin(), input).await.expect("create job")
}

pub fn category_input(name: &str, slug: &str) -> CategoryInput {
    CategoryInput {
        name: Some(name.into()),
        slug: Some(slug.into()),
        description: None,
    }
}
