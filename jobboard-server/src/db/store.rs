//! `Store` backed by PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repos::{ApplicationRepo, CategoryRepo, CompanyRepo, JobRepo};
use crate::filter::JobFilter;
use crate::models::{
    Application, ApplicationView, Category, Company, CompanyView, JobPage, JobView,
    NewApplication, NewCategory, NewCompany, NewJob, PageWindow,
};
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn search_jobs(
        &self,
        filter: &JobFilter,
        window: PageWindow,
    ) -> Result<JobPage, StoreError> {
        JobRepo::new(&self.pool).search(filter, window).await
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobView>, StoreError> {
        JobRepo::new(&self.pool).get(id).await
    }

    async fn create_job(&self, job: NewJob) -> Result<JobView, StoreError> {
        JobRepo::new(&self.pool).create(job).await
    }

    async fn update_job(&self, id: Uuid, job: NewJob) -> Result<JobView, StoreError> {
        JobRepo::new(&self.pool).update(id, job).await
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), StoreError> {
        JobRepo::new(&self.pool).delete(id).await
    }

    async fn list_companies(&self) -> Result<Vec<CompanyView>, StoreError> {
        CompanyRepo::new(&self.pool).list().await
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<CompanyView>, StoreError> {
        CompanyRepo::new(&self.pool).get(id).await
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        CompanyRepo::new(&self.pool).create(company).await
    }

    async fn update_company(&self, id: Uuid, company: NewCompany) -> Result<Company, StoreError> {
        CompanyRepo::new(&self.pool).update(id, company).await
    }

    async fn delete_company(&self, id: Uuid) -> Result<(), StoreError> {
        CompanyRepo::new(&self.pool).delete(id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        CategoryRepo::new(&self.pool).list().await
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        CategoryRepo::new(&self.pool).get(id).await
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        CategoryRepo::new(&self.pool).create(category).await
    }

    async fn update_category(
        &self,
        id: Uuid,
        category: NewCategory,
    ) -> Result<Category, StoreError> {
        CategoryRepo::new(&self.pool).update(id, category).await
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), StoreError> {
        CategoryRepo::new(&self.pool).delete(id).await
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationView>, StoreError> {
        ApplicationRepo::new(&self.pool).list().await
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationView>, StoreError> {
        ApplicationRepo::new(&self.pool).get(id).await
    }

    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError> {
        ApplicationRepo::new(&self.pool).for_job(job_id).await
    }

    async fn create_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationView, StoreError> {
        ApplicationRepo::new(&self.pool).create(application).await
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: String,
    ) -> Result<ApplicationView, StoreError> {
        ApplicationRepo::new(&self.pool).update_status(id, &status).await
    }

    async fn delete_application(&self, id: Uuid) -> Result<(), StoreError> {
        ApplicationRepo::new(&self.pool).delete(id).await
    }
}
