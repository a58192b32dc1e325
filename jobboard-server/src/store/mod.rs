//! Persistence boundary
//!
//! The store owns all record state. Implementations:
//! - `db::PgStore`: PostgreSQL via sqlx
//! - `MemoryStore`: in-process tables for tests and local runs
//!
//! Both apply the same referential rules: deleting a company removes its
//! jobs, deleting a category detaches its jobs, deleting a job removes its
//! applications.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::filter::JobFilter;
use crate::models::{
    Application, ApplicationView, Category, Company, CompanyView, JobPage, JobView,
    NewApplication, NewCategory, NewCompany, NewJob, PageWindow,
};

pub use memory::MemoryStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} with this {field} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
    },

    #[error("invalid reference: {resource} '{id}' does not exist")]
    InvalidReference { resource: &'static str, id: String },
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn invalid_reference(resource: &'static str, id: Uuid) -> Self {
        Self::InvalidReference {
            resource,
            id: id.to_string(),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Filtered, newest-first page of jobs plus the unwindowed match count.
    async fn search_jobs(
        &self,
        filter: &JobFilter,
        window: PageWindow,
    ) -> Result<JobPage, StoreError>;
    async fn get_job(&self, id: Uuid) -> Result<Option<JobView>, StoreError>;
    async fn create_job(&self, job: NewJob) -> Result<JobView, StoreError>;
    async fn update_job(&self, id: Uuid, job: NewJob) -> Result<JobView, StoreError>;
    async fn delete_job(&self, id: Uuid) -> Result<(), StoreError>;

    /// Companies ordered by name.
    async fn list_companies(&self) -> Result<Vec<CompanyView>, StoreError>;
    async fn get_company(&self, id: Uuid) -> Result<Option<CompanyView>, StoreError>;
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError>;
    async fn update_company(&self, id: Uuid, company: NewCompany) -> Result<Company, StoreError>;
    async fn delete_company(&self, id: Uuid) -> Result<(), StoreError>;

    /// Categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, StoreError>;
    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError>;
    async fn update_category(
        &self,
        id: Uuid,
        category: NewCategory,
    ) -> Result<Category, StoreError>;
    async fn delete_category(&self, id: Uuid) -> Result<(), StoreError>;

    /// Applications, newest first.
    async fn list_applications(&self) -> Result<Vec<ApplicationView>, StoreError>;
    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationView>, StoreError>;
    /// Applications for one job, newest first.
    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError>;
    async fn create_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationView, StoreError>;
    async fn update_application_status(
        &self,
        id: Uuid,
        status: String,
    ) -> Result<ApplicationView, StoreError>;
    async fn delete_application(&self, id: Uuid) -> Result<(), StoreError>;
}
