//! Job repository
//!
//! - search: one page query and one count query, both rendered from the
//!   same `JobFilter`, run concurrently
//! - create/update: reference checks and write in one transaction

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::filter::JobFilter;
use crate::models::{Category, Company, Job, JobPage, JobView, NewJob, Page, PageWindow};
use crate::store::StoreError;

/// Plain job columns, unqualified
const JOB_COLUMNS: &str = "id, title, description, location, remote, salary, \
     company_id, category_id, tags, created_at, updated_at";

/// Job joined with its company and category. Filter predicates refer to `j`.
const JOB_VIEW_SELECT: &str = r#"
    SELECT
        j.id, j.title, j.description, j.location, j.remote, j.salary,
        j.company_id, j.category_id, j.tags, j.created_at, j.updated_at,
        c.name AS company_name,
        c.website AS company_website,
        c.logo AS company_logo,
        c.description AS company_description,
        c.created_at AS company_created_at,
        c.updated_at AS company_updated_at,
        cat.name AS category_name,
        cat.slug AS category_slug,
        cat.description AS category_description,
        cat.created_at AS category_created_at,
        cat.updated_at AS category_updated_at
    FROM jobs j
    JOIN companies c ON c.id = j.company_id
    LEFT JOIN categories cat ON cat.id = j.category_id
"#;

fn job_view_from_row(r: &PgRow) -> Result<JobView, sqlx::Error> {
    let job = Job::from_row(r)?;

    let company = Company {
        id: job.company_id,
        name: r.try_get("company_name")?,
        website: r.try_get("company_website")?,
        logo: r.try_get("company_logo")?,
        description: r.try_get("company_description")?,
        created_at: r.try_get("company_created_at")?,
        updated_at: r.try_get("company_updated_at")?,
    };

    let category = match (job.category_id, r.try_get::<Option<String>, _>("category_name")?) {
        (Some(id), Some(name)) => Some(Category {
            id,
            name,
            slug: r.try_get("category_slug")?,
            description: r.try_get("category_description")?,
            created_at: r.try_get("category_created_at")?,
            updated_at: r.try_get("category_updated_at")?,
        }),
        _ => None,
    };

    Ok(JobView {
        job,
        company,
        category,
    })
}

async fn fetch_view<'e, E>(executor: E, id: Uuid) -> Result<Option<JobView>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{JOB_VIEW_SELECT} WHERE j.id = $1");
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    row.as_ref().map(job_view_from_row).transpose()
}

/// Fail with `InvalidReference` unless the company (and category, if any) exist.
async fn check_refs(conn: &mut PgConnection, job: &NewJob) -> Result<(), StoreError> {
    let (company_exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
            .bind(job.company_id)
            .fetch_one(&mut *conn)
            .await?;
    if !company_exists {
        return Err(StoreError::invalid_reference("company", job.company_id));
    }

    if let Some(category_id) = job.category_id {
        let (category_exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(category_id)
                .fetch_one(&mut *conn)
                .await?;
        if !category_exists {
            return Err(StoreError::invalid_reference("category", category_id));
        }
    }

    Ok(())
}

/// Job repository
pub struct JobRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> JobRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Filtered page (newest first) and total match count.
    pub async fn search(&self, filter: &JobFilter, window: PageWindow) -> Result<JobPage, StoreError> {
        let mut page_query = QueryBuilder::<Postgres>::new(JOB_VIEW_SELECT);
        filter.push_predicate(&mut page_query);
        page_query
            .push(" ORDER BY j.created_at DESC, j.seq DESC LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs j");
        filter.push_predicate(&mut count_query);

        let (rows, total) = tokio::try_join!(
            page_query.build().fetch_all(self.pool),
            count_query.build_query_scalar::<i64>().fetch_one(self.pool),
        )?;

        let items = rows
            .iter()
            .map(job_view_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { items, total })
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<JobView>, StoreError> {
        Ok(fetch_view(self.pool, id).await?)
    }

    pub async fn create(&self, job: NewJob) -> Result<JobView, StoreError> {
        let mut tx = self.pool.begin().await?;
        check_refs(&mut tx, &job).await?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO jobs (title, description, location, remote, salary, company_id, category_id, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(job.remote)
        .bind(job.salary.as_deref())
        .bind(job.company_id)
        .bind(job.category_id)
        .bind(&job.tags)
        .fetch_one(&mut *tx)
        .await?;

        let view = fetch_view(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::not_found("job", id))?;

        tx.commit().await?;
        Ok(view)
    }

    pub async fn update(&self, id: Uuid, job: NewJob) -> Result<JobView, StoreError> {
        let mut tx = self.pool.begin().await?;
        check_refs(&mut tx, &job).await?;

        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE jobs
            SET title = $2, description = $3, location = $4, remote = $5, salary = $6,
                company_id = $7, category_id = $8, tags = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(job.remote)
        .bind(job.salary.as_deref())
        .bind(job.company_id)
        .bind(job.category_id)
        .bind(&job.tags)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Err(StoreError::not_found("job", id));
        }

        let view = fetch_view(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::not_found("job", id))?;

        tx.commit().await?;
        Ok(view)
    }

    /// Delete a job; its applications go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("job", id));
        }
        Ok(())
    }

    /// Jobs of the given companies, newest first.
    pub async fn for_companies(&self, company_ids: &[Uuid]) -> Result<Vec<Job>, StoreError> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE company_id = ANY($1) \
             ORDER BY created_at DESC, seq DESC"
        );
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(company_ids)
            .fetch_all(self.pool)
            .await?;
        Ok(jobs)
    }
}
