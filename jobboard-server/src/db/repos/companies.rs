//! Company repository

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use super::JobRepo;
use crate::models::{Company, CompanyView, Job, NewCompany};
use crate::store::StoreError;

const COMPANY_COLUMNS: &str = "id, name, website, logo, description, created_at, updated_at";

pub struct CompanyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All companies by name, each with its jobs.
    pub async fn list(&self) -> Result<Vec<CompanyView>, StoreError> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name, created_at");
        let companies = sqlx::query_as::<_, Company>(&sql)
            .fetch_all(self.pool)
            .await?;

        self.attach_jobs(companies).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<CompanyView>, StoreError> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match company {
            Some(company) => Ok(self.attach_jobs(vec![company]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn create(&self, company: NewCompany) -> Result<Company, StoreError> {
        let sql = format!(
            "INSERT INTO companies (name, website, logo, description) \
             VALUES ($1, $2, $3, $4) RETURNING {COMPANY_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Company>(&sql)
            .bind(&company.name)
            .bind(company.website.as_deref())
            .bind(company.logo.as_deref())
            .bind(company.description.as_deref())
            .fetch_one(self.pool)
            .await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, company: NewCompany) -> Result<Company, StoreError> {
        let sql = format!(
            "UPDATE companies SET name = $2, website = $3, logo = $4, description = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING {COMPANY_COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .bind(&company.name)
            .bind(company.website.as_deref())
            .bind(company.logo.as_deref())
            .bind(company.description.as_deref())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("company", id))
    }

    /// Delete a company along with its jobs and their applications.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("company", id));
        }
        Ok(())
    }

    async fn attach_jobs(&self, companies: Vec<Company>) -> Result<Vec<CompanyView>, StoreError> {
        let ids: Vec<Uuid> = companies.iter().map(|c| c.id).collect();
        let mut by_company: HashMap<Uuid, Vec<Job>> = HashMap::new();
        for job in JobRepo::new(self.pool).for_companies(&ids).await? {
            by_company.entry(job.company_id).or_default().push(job);
        }

        Ok(companies
            .into_iter()
            .map(|company| CompanyView {
                jobs: by_company.remove(&company.id).unwrap_or_default(),
                company,
            })
            .collect())
    }
}
