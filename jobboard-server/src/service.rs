//! Named board operations
//!
//! Every operation goes through the [`Gate`] with its [`Operation`] name, so
//! the configured policy decides which ones need a signed-in caller. Input is
//! validated inside the guarded call: a rejected caller never reaches
//! validation or the store.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::auth::{AuthContext, Gate, GatePolicy, Operation};
use crate::error::{BoardError, Result};
use crate::filter::JobSearch;
use crate::models::{
    Application, ApplicationInput, ApplicationView, Category, CategoryInput, Company,
    CompanyInput, CompanyView, JobInput, JobPage, JobView, StatusInput,
};
use crate::store::Store;

/// The job board: a store behind an authorization gate.
#[derive(Clone)]
pub struct JobBoard {
    store: Arc<dyn Store>,
    gate: Gate,
}

impl JobBoard {
    pub fn new(store: Arc<dyn Store>, policy: GatePolicy) -> Self {
        Self {
            store,
            gate: Gate::new(policy),
        }
    }

    pub fn policy(&self) -> &GatePolicy {
        self.gate.policy()
    }

    /// True when the store answers.
    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store ping failed");
                false
            }
        }
    }

    // ---- jobs -------------------------------------------------------------

    /// Filtered, newest-first page of jobs with the total match count.
    pub async fn jobs(&self, ctx: &AuthContext, search: JobSearch) -> Result<JobPage> {
        self.gate
            .guard(Operation::Jobs, ctx, || async move {
                let filter = search.filter();
                let window = search.window();
                Ok(self.store.search_jobs(&filter, window).await?)
            })
            .await
    }

    pub async fn job(&self, ctx: &AuthContext, id: Uuid) -> Result<JobView> {
        self.gate
            .guard(Operation::Job, ctx, || async move {
                self.store
                    .get_job(id)
                    .await?
                    .ok_or_else(|| BoardError::not_found("job", id))
            })
            .await
    }

    /// Applications for one job, newest first. Unknown job is `NotFound`.
    pub async fn job_applications(&self, ctx: &AuthContext, job_id: Uuid) -> Result<Vec<Application>> {
        self.gate
            .guard(Operation::JobApplications, ctx, || async move {
                if self.store.get_job(job_id).await?.is_none() {
                    return Err(BoardError::not_found("job", job_id));
                }
                Ok(self.store.applications_for_job(job_id).await?)
            })
            .await
    }

    pub async fn create_job(&self, ctx: &AuthContext, input: JobInput) -> Result<JobView> {
        self.gate
            .guard(Operation::CreateJob, ctx, move || async move {
                let job = input.validate()?;
                let view = self.store.create_job(job).await?;
                info!(job_id = %view.job.id, company_id = %view.job.company_id, "Job created");
                Ok(view)
            })
            .await
    }

    pub async fn update_job(&self, ctx: &AuthContext, id: Uuid, input: JobInput) -> Result<JobView> {
        self.gate
            .guard(Operation::UpdateJob, ctx, move || async move {
                let job = input.validate()?;
                let view = self.store.update_job(id, job).await?;
                info!(job_id = %id, "Job updated");
                Ok(view)
            })
            .await
    }

    pub async fn delete_job(&self, ctx: &AuthContext, id: Uuid) -> Result<()> {
        self.gate
            .guard(Operation::DeleteJob, ctx, || async move {
                self.store.delete_job(id).await?;
                info!(job_id = %id, "Job deleted");
                Ok(())
            })
            .await
    }

    // ---- companies --------------------------------------------------------

    pub async fn companies(&self, ctx: &AuthContext) -> Result<Vec<CompanyView>> {
        self.gate
            .guard(Operation::Companies, ctx, || async move {
                Ok(self.store.list_companies().await?)
            })
            .await
    }

    pub async fn company(&self, ctx: &AuthContext, id: Uuid) -> Result<CompanyView> {
        self.gate
            .guard(Operation::Company, ctx, || async move {
                self.store
                    .get_company(id)
                    .await?
                    .ok_or_else(|| BoardError::not_found("company", id))
            })
            .await
    }

    pub async fn create_company(&self, ctx: &AuthContext, input: CompanyInput) -> Result<Company> {
        self.gate
            .guard(Operation::CreateCompany, ctx, move || async move {
                let company = self.store.create_company(input.validate()?).await?;
                info!(company_id = %company.id, "Company created");
                Ok(company)
            })
            .await
    }

    pub async fn update_company(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        input: CompanyInput,
    ) -> Result<Company> {
        self.gate
            .guard(Operation::UpdateCompany, ctx, move || async move {
                let company = self.store.update_company(id, input.validate()?).await?;
                info!(company_id = %id, "Company updated");
                Ok(company)
            })
            .await
    }

    /// Deletes the company's jobs and their applications as well.
    pub async fn delete_company(&self, ctx: &AuthContext, id: Uuid) -> Result<()> {
        self.gate
            .guard(Operation::DeleteCompany, ctx, || async move {
                self.store.delete_company(id).await?;
                info!(company_id = %id, "Company deleted");
                Ok(())
            })
            .await
    }

    // ---- categories -------------------------------------------------------

    pub async fn categories(&self, ctx: &AuthContext) -> Result<Vec<Category>> {
        self.gate
            .guard(Operation::Categories, ctx, || async move {
                Ok(self.store.list_categories().await?)
            })
            .await
    }

    pub async fn category(&self, ctx: &AuthContext, id: Uuid) -> Result<Category> {
        self.gate
            .guard(Operation::Category, ctx, || async move {
                self.store
                    .get_category(id)
                    .await?
                    .ok_or_else(|| BoardError::not_found("category", id))
            })
            .await
    }

    pub async fn create_category(&self, ctx: &AuthContext, input: CategoryInput) -> Result<Category> {
        self.gate
            .guard(Operation::CreateCategory, ctx, move || async move {
                let category = self.store.create_category(input.validate()?).await?;
                info!(category_id = %category.id, slug = %category.slug, "Category created");
                Ok(category)
            })
            .await
    }

    pub async fn update_category(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category> {
        self.gate
            .guard(Operation::UpdateCategory, ctx, move || async move {
                let category = self.store.update_category(id, input.validate()?).await?;
                info!(category_id = %id, "Category updated");
                Ok(category)
            })
            .await
    }

    /// Jobs in the category are kept and lose their category.
    pub async fn delete_category(&self, ctx: &AuthContext, id: Uuid) -> Result<()> {
        self.gate
            .guard(Operation::DeleteCategory, ctx, || async move {
                self.store.delete_category(id).await?;
                info!(category_id = %id, "Category deleted");
                Ok(())
            })
            .await
    }

    // ---- applications -----------------------------------------------------

    pub async fn applications(&self, ctx: &AuthContext) -> Result<Vec<ApplicationView>> {
        self.gate
            .guard(Operation::Applications, ctx, || async move {
                Ok(self.store.list_applications().await?)
            })
            .await
    }

    pub async fn application(&self, ctx: &AuthContext, id: Uuid) -> Result<ApplicationView> {
        self.gate
            .guard(Operation::Application, ctx, || async move {
                self.store
                    .get_application(id)
                    .await?
                    .ok_or_else(|| BoardError::not_found("application", id))
            })
            .await
    }

    pub async fn create_application(
        &self,
        ctx: &AuthContext,
        input: ApplicationInput,
    ) -> Result<ApplicationView> {
        self.gate
            .guard(Operation::CreateApplication, ctx, move || async move {
                let application = self.store.create_application(input.validate()?).await?;
                info!(
                    application_id = %application.application.id,
                    job_id = %application.application.job_id,
                    "Application submitted"
                );
                Ok(application)
            })
            .await
    }

    pub async fn update_application_status(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        input: StatusInput,
    ) -> Result<ApplicationView> {
        self.gate
            .guard(Operation::UpdateApplicationStatus, ctx, move || async move {
                let status = input.validate()?;
                let application = self.store.update_application_status(id, status).await?;
                info!(application_id = %id, status = %application.application.status, "Application status changed");
                Ok(application)
            })
            .await
    }

    pub async fn delete_application(&self, ctx: &AuthContext, id: Uuid) -> Result<()> {
        self.gate
            .guard(Operation::DeleteApplication, ctx, || async move {
                self.store.delete_application(id).await?;
                info!(application_id = %id, "Application deleted");
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;
    use crate::store::MemoryStore;

    fn board() -> JobBoard {
        JobBoard::new(Arc::new(MemoryStore::new()), GatePolicy::default())
    }

    fn admin() -> AuthContext {
        AuthContext::authenticated(Identity {
            uid: "admin-1".into(),
            email: Some("admin@example.com".into()),
        })
    }

    fn company_input(name: &str) -> CompanyInput {
        CompanyInput {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn anonymous_create_is_rejected_before_validation() {
        let board = board();
        // Input is invalid too; the gate answers first.
        let err = board
            .create_company(&AuthContext::anonymous(), CompanyInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::AuthenticationRequired));
    }

    #[tokio::test]
    async fn authenticated_create_validates() {
        let err = board()
            .create_company(&admin(), CompanyInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let board = board();
        let ctx = AuthContext::anonymous();
        let id = Uuid::new_v4();

        assert!(matches!(board.job(&ctx, id).await, Err(BoardError::NotFound { resource: "job", .. })));
        assert!(matches!(
            board.job_applications(&ctx, id).await,
            Err(BoardError::NotFound { resource: "job", .. })
        ));
        assert!(matches!(
            board.company(&ctx, id).await,
            Err(BoardError::NotFound { resource: "company", .. })
        ));
        assert!(matches!(
            board.delete_job(&admin(), id).await,
            Err(BoardError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_company_is_invalid_reference() {
        let err = board()
            .create_job(
                &admin(),
                JobInput {
                    title: Some("Engineer".into()),
                    description: Some("Build things".into()),
                    location: Some("Berlin".into()),
                    remote: Some(false),
                    company_id: Some(Uuid::new_v4().to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidReference { resource: "company", .. }));
    }

    #[tokio::test]
    async fn review_actions_follow_policy() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let open = JobBoard::new(store.clone(), GatePolicy::default());
        let strict = JobBoard::new(store, GatePolicy::from_flags(true));

        let company = open.create_company(&admin(), company_input("Acme")).await.unwrap();
        let job = open
            .create_job(
                &admin(),
                JobInput {
                    title: Some("Engineer".into()),
                    description: Some("Build things".into()),
                    location: Some("Berlin".into()),
                    remote: Some(true),
                    company_id: Some(company.id.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let anon = AuthContext::anonymous();
        let application = strict
            .create_application(
                &anon,
                ApplicationInput {
                    job_id: Some(job.job.id.to_string()),
                    name: Some("Ada".into()),
                    email: Some("ada@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(application.application.status, "pending");

        let status = || StatusInput {
            status: Some("reviewed".into()),
        };
        let id = application.application.id;

        let err = strict
            .update_application_status(&anon, id, status())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::AuthenticationRequired));

        let updated = open.update_application_status(&anon, id, status()).await.unwrap();
        assert_eq!(updated.application.status, "reviewed");
    }
}
