//! In-memory store
//!
//! Tables are plain vectors in insertion order behind one `RwLock`.
//! Newest-first ordering breaks timestamp ties by insertion order, matching
//! the `seq` tiebreak of the Postgres store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::filter::JobFilter;
use crate::models::{
    Application, ApplicationView, Category, Company, CompanySummary, CompanyView, Job, JobPage,
    JobSummary, JobView, NewApplication, NewCategory, NewCompany, NewJob, Page, PageWindow,
    DEFAULT_STATUS,
};

#[derive(Debug, Default)]
struct Tables {
    companies: Vec<Company>,
    categories: Vec<Category>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

impl Tables {
    fn company(&self, id: Uuid) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn job(&self, id: Uuid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    fn check_job_refs(&self, job: &NewJob) -> Result<(), StoreError> {
        if self.company(job.company_id).is_none() {
            return Err(StoreError::invalid_reference("company", job.company_id));
        }
        if let Some(category_id) = job.category_id {
            if self.category(category_id).is_none() {
                return Err(StoreError::invalid_reference("category", category_id));
            }
        }
        Ok(())
    }

    fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
        self.categories
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != except)
    }

    fn job_view(&self, job: &Job) -> Result<JobView, StoreError> {
        let company = self
            .company(job.company_id)
            .cloned()
            .ok_or_else(|| StoreError::invalid_reference("company", job.company_id))?;
        let category = job.category_id.and_then(|id| self.category(id)).cloned();

        Ok(JobView {
            job: job.clone(),
            company,
            category,
        })
    }

    /// Jobs newest first; equal timestamps keep the later insert first.
    fn jobs_newest_first<'a>(&'a self, filter: &JobFilter) -> Vec<&'a Job> {
        let mut jobs: Vec<&Job> = self.jobs.iter().rev().filter(|j| filter.matches(j)).collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    fn company_view(&self, company: &Company) -> CompanyView {
        let jobs = self
            .jobs_newest_first(&JobFilter::default())
            .into_iter()
            .filter(|j| j.company_id == company.id)
            .cloned()
            .collect();

        CompanyView {
            company: company.clone(),
            jobs,
        }
    }

    fn application_view(&self, application: &Application) -> Result<ApplicationView, StoreError> {
        let job = self
            .job(application.job_id)
            .ok_or_else(|| StoreError::invalid_reference("job", application.job_id))?;
        let company = self
            .company(job.company_id)
            .ok_or_else(|| StoreError::invalid_reference("company", job.company_id))?;

        Ok(ApplicationView {
            application: application.clone(),
            job: JobSummary {
                id: job.id,
                title: job.title.clone(),
                location: job.location.clone(),
                company: CompanySummary {
                    id: company.id,
                    name: company.name.clone(),
                    logo: company.logo.clone(),
                },
            },
        })
    }

    fn applications_newest_first(&self) -> Vec<&Application> {
        let mut applications: Vec<&Application> = self.applications.iter().rev().collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        applications
    }

    fn remove_jobs_where(&mut self, pred: impl Fn(&Job) -> bool) {
        let removed: Vec<Uuid> = self.jobs.iter().filter(|j| pred(j)).map(|j| j.id).collect();
        self.jobs.retain(|j| !removed.contains(&j.id));
        self.applications.retain(|a| !removed.contains(&a.job_id));
    }
}

/// In-memory [`Store`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn search_jobs(
        &self,
        filter: &JobFilter,
        window: PageWindow,
    ) -> Result<JobPage, StoreError> {
        let tables = self.tables.read().await;
        let matching = tables.jobs_newest_first(filter);
        let total = matching.len() as i64;

        let items = window
            .slice(matching)
            .into_iter()
            .map(|j| tables.job_view(j))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { items, total })
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobView>, StoreError> {
        let tables = self.tables.read().await;
        tables.job(id).map(|j| tables.job_view(j)).transpose()
    }

    async fn create_job(&self, job: NewJob) -> Result<JobView, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_job_refs(&job)?;

        let now = Utc::now();
        let record = Job {
            id: Uuid::new_v4(),
            title: job.title,
            description: job.description,
            location: job.location,
            remote: job.remote,
            salary: job.salary,
            company_id: job.company_id,
            category_id: job.category_id,
            tags: job.tags,
            created_at: now,
            updated_at: now,
        };
        let view = tables.job_view(&record)?;
        tables.jobs.push(record);
        Ok(view)
    }

    async fn update_job(&self, id: Uuid, job: NewJob) -> Result<JobView, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_job_refs(&job)?;

        let record = tables
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| StoreError::not_found("job", id))?;
        record.title = job.title;
        record.description = job.description;
        record.location = job.location;
        record.remote = job.remote;
        record.salary = job.salary;
        record.company_id = job.company_id;
        record.category_id = job.category_id;
        record.tags = job.tags;
        record.updated_at = Utc::now();

        let record = record.clone();
        tables.job_view(&record)
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.job(id).is_none() {
            return Err(StoreError::not_found("job", id));
        }
        tables.remove_jobs_where(|j| j.id == id);
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<CompanyView>, StoreError> {
        let tables = self.tables.read().await;
        let mut companies: Vec<&Company> = tables.companies.iter().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies.into_iter().map(|c| tables.company_view(c)).collect())
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<CompanyView>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.company(id).map(|c| tables.company_view(c)))
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let record = Company {
            id: Uuid::new_v4(),
            name: company.name,
            website: company.website,
            logo: company.logo,
            description: company.description,
            created_at: now,
            updated_at: now,
        };
        tables.companies.push(record.clone());
        Ok(record)
    }

    async fn update_company(&self, id: Uuid, company: NewCompany) -> Result<Company, StoreError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("company", id))?;
        record.name = company.name;
        record.website = company.website;
        record.logo = company.logo;
        record.description = company.description;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_company(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.company(id).is_none() {
            return Err(StoreError::not_found("company", id));
        }
        tables.companies.retain(|c| c.id != id);
        tables.remove_jobs_where(|j| j.company_id == id);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().await.category(id).cloned())
    }

    async fn create_category(&self, category: NewCategory) -> Result<Category, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.slug_taken(category.slug.as_str(), None) {
            return Err(StoreError::Conflict {
                resource: "category",
                field: "slug",
            });
        }

        let now = Utc::now();
        let record = Category {
            id: Uuid::new_v4(),
            name: category.name,
            slug: category.slug.into_string(),
            description: category.description,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(record.clone());
        Ok(record)
    }

    async fn update_category(
        &self,
        id: Uuid,
        category: NewCategory,
    ) -> Result<Category, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.category(id).is_none() {
            return Err(StoreError::not_found("category", id));
        }
        if tables.slug_taken(category.slug.as_str(), Some(id)) {
            return Err(StoreError::Conflict {
                resource: "category",
                field: "slug",
            });
        }

        let record = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("category", id))?;
        record.name = category.name;
        record.slug = category.slug.into_string();
        record.description = category.description;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.category(id).is_none() {
            return Err(StoreError::not_found("category", id));
        }
        tables.categories.retain(|c| c.id != id);
        for job in tables.jobs.iter_mut().filter(|j| j.category_id == Some(id)) {
            job.category_id = None;
        }
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationView>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .applications_newest_first()
            .into_iter()
            .map(|a| tables.application_view(a))
            .collect()
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<ApplicationView>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .applications
            .iter()
            .find(|a| a.id == id)
            .map(|a| tables.application_view(a))
            .transpose()
    }

    async fn applications_for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications_newest_first()
            .into_iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn create_application(
        &self,
        application: NewApplication,
    ) -> Result<ApplicationView, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.job(application.job_id).is_none() {
            return Err(StoreError::invalid_reference("job", application.job_id));
        }

        let now = Utc::now();
        let record = Application {
            id: Uuid::new_v4(),
            job_id: application.job_id,
            name: application.name,
            email: application.email.into_string(),
            resume: application.resume,
            cover_letter: application.cover_letter,
            status: DEFAULT_STATUS.to_owned(),
            created_at: now,
            updated_at: now,
        };
        let view = tables.application_view(&record)?;
        tables.applications.push(record);
        Ok(view)
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: String,
    ) -> Result<ApplicationView, StoreError> {
        let mut tables = self.tables.write().await;
        let record = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("application", id))?;
        record.status = status;
        record.updated_at = Utc::now();

        let record = record.clone();
        tables.application_view(&record)
    }

    async fn delete_application(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        if tables.applications.len() == before {
            return Err(StoreError::not_found("application", id));
        }
        Ok(())
    }
}
