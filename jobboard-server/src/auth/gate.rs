//! Authorization gate for mutating operations
//!
//! The gate is a stateless per-call predicate: if the operation is gated by
//! the configured [`GatePolicy`] and the caller is not authenticated, the
//! call fails with [`AuthError::AuthenticationRequired`] and the wrapped
//! operation is never invoked.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;

use tracing::debug;

use super::context::AuthContext;
use super::identity::Identity;

/// Named API operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Jobs,
    Job,
    JobApplications,
    CreateJob,
    UpdateJob,
    DeleteJob,
    Companies,
    Company,
    CreateCompany,
    UpdateCompany,
    DeleteCompany,
    Categories,
    Category,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    Applications,
    Application,
    CreateApplication,
    UpdateApplicationStatus,
    DeleteApplication,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::Job => "job",
            Self::JobApplications => "jobApplications",
            Self::CreateJob => "createJob",
            Self::UpdateJob => "updateJob",
            Self::DeleteJob => "deleteJob",
            Self::Companies => "companies",
            Self::Company => "company",
            Self::CreateCompany => "createCompany",
            Self::UpdateCompany => "updateCompany",
            Self::DeleteCompany => "deleteCompany",
            Self::Categories => "categories",
            Self::Category => "category",
            Self::CreateCategory => "createCategory",
            Self::UpdateCategory => "updateCategory",
            Self::DeleteCategory => "deleteCategory",
            Self::Applications => "applications",
            Self::Application => "application",
            Self::CreateApplication => "createApplication",
            Self::UpdateApplicationStatus => "updateApplicationStatus",
            Self::DeleteApplication => "deleteApplication",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which operations require an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePolicy {
    gated: HashSet<Operation>,
}

impl GatePolicy {
    /// Listing management (jobs, companies, categories) is gated.
    /// Application mutations are open.
    pub fn listings_only() -> Self {
        Self {
            gated: HashSet::from([
                Operation::CreateJob,
                Operation::UpdateJob,
                Operation::DeleteJob,
                Operation::CreateCompany,
                Operation::UpdateCompany,
                Operation::DeleteCompany,
                Operation::CreateCategory,
                Operation::UpdateCategory,
                Operation::DeleteCategory,
            ]),
        }
    }

    /// Also gate review actions on applications. Submitting an application
    /// stays public.
    pub fn with_application_review_gated(mut self) -> Self {
        self.gated.insert(Operation::UpdateApplicationStatus);
        self.gated.insert(Operation::DeleteApplication);
        self
    }

    pub fn from_flags(gate_application_mutations: bool) -> Self {
        let policy = Self::listings_only();
        if gate_application_mutations {
            policy.with_application_review_gated()
        } else {
            policy
        }
    }

    pub fn requires_auth(&self, op: Operation) -> bool {
        self.gated.contains(&op)
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::listings_only()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authentication required")]
    AuthenticationRequired,
}

/// Require an authenticated caller.
pub fn require_auth(ctx: &AuthContext) -> Result<&Identity, AuthError> {
    match (&ctx.user, ctx.is_authenticated) {
        (Some(user), true) => Ok(user),
        _ => Err(AuthError::AuthenticationRequired),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gate {
    policy: GatePolicy,
}

impl Gate {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Run `call` if `ctx` may perform `op`.
    ///
    /// `call` is only constructed and awaited after the check passes.
    pub async fn guard<T, E, F, Fut>(&self, op: Operation, ctx: &AuthContext, call: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<AuthError>,
    {
        if self.policy.requires_auth(op) {
            let user = require_auth(ctx).map_err(|e| {
                debug!(operation = %op, "Rejected unauthenticated call");
                e
            })?;
            debug!(operation = %op, uid = %user.uid, "Authorized");
        }

        call().await
    }
}
