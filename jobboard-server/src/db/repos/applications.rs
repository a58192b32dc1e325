//! Application repository

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, PgPool, Row};
use uuid::Uuid;

use crate::models::{
    Application, ApplicationView, CompanySummary, JobSummary, NewApplication, DEFAULT_STATUS,
};
use crate::store::StoreError;

const APPLICATION_COLUMNS: &str = "id, job_id, name, email, resume, cover_letter, status, \
     created_at, updated_at";

const APPLICATION_VIEW_SELECT: &str = r#"
    SELECT
        a.id, a.job_id, a.name, a.email, a.resume, a.cover_letter, a.status,
        a.created_at, a.updated_at,
        j.title AS job_title,
        j.location AS job_location,
        c.id AS job_company_id,
        c.name AS job_company_name,
        c.logo AS job_company_logo
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN companies c ON c.id = j.company_id
"#;

fn view_from_row(r: &PgRow) -> Result<ApplicationView, sqlx::Error> {
    let application = Application::from_row(r)?;
    let job = JobSummary {
        id: application.job_id,
        title: r.try_get("job_title")?,
        location: r.try_get("job_location")?,
        company: CompanySummary {
            id: r.try_get("job_company_id")?,
            name: r.try_get("job_company_name")?,
            logo: r.try_get("job_company_logo")?,
        },
    };
    Ok(ApplicationView { application, job })
}

async fn fetch_view<'e, E>(executor: E, id: Uuid) -> Result<Option<ApplicationView>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{APPLICATION_VIEW_SELECT} WHERE a.id = $1");
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    row.as_ref().map(view_from_row).transpose()
}

pub struct ApplicationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ApplicationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ApplicationView>, StoreError> {
        let sql = format!("{APPLICATION_VIEW_SELECT} ORDER BY a.created_at DESC, a.seq DESC");
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;
        let views = rows
            .iter()
            .map(view_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ApplicationView>, StoreError> {
        Ok(fetch_view(self.pool, id).await?)
    }

    pub async fn for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_id = $1 \
             ORDER BY created_at DESC, seq DESC"
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(job_id)
            .fetch_all(self.pool)
            .await?;
        Ok(applications)
    }

    /// Insert with the default status. The job must exist.
    pub async fn create(&self, application: NewApplication) -> Result<ApplicationView, StoreError> {
        let mut tx = self.pool.begin().await?;

        let (job_exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
            .bind(application.job_id)
            .fetch_one(&mut *tx)
            .await?;
        if !job_exists {
            return Err(StoreError::invalid_reference("job", application.job_id));
        }

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO applications (job_id, name, email, resume, cover_letter, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(application.job_id)
        .bind(&application.name)
        .bind(application.email.as_str())
        .bind(application.resume.as_deref())
        .bind(application.cover_letter.as_deref())
        .bind(DEFAULT_STATUS)
        .fetch_one(&mut *tx)
        .await?;

        let view = fetch_view(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::not_found("application", id))?;

        tx.commit().await?;
        Ok(view)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<ApplicationView, StoreError> {
        let result = sqlx::query(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("application", id));
        }

        fetch_view(self.pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("application", id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("application", id));
        }
        Ok(())
    }
}
