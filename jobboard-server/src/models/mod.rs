//! Records, typed projections and validated mutation inputs
//!
//! All client input is validated when converting `*Input` into `New*`.
//! Invalid input returns ValidationError, not panic.

pub mod application;
pub mod category;
pub mod company;
pub mod job;
pub mod pagination;
pub mod text;
pub mod validation;

pub use application::{
    Application, ApplicationInput, ApplicationView, CompanySummary, JobSummary, NewApplication,
    StatusInput, DEFAULT_STATUS,
};
pub use category::{Category, CategoryInput, NewCategory};
pub use company::{Company, CompanyInput, CompanyView, NewCompany};
pub use job::{Job, JobInput, JobPage, JobView, NewJob};
pub use pagination::{Page, PageWindow, DEFAULT_LIMIT, MAX_LIMIT};
pub use text::{Email, Slug};
pub use validation::ValidationError;
