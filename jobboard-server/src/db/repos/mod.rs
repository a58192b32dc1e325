//! Repository pattern for database operations
//!
//! Each repository borrows the pool and maps sqlx failures into `StoreError`.

mod applications;
mod categories;
mod companies;
mod jobs;

pub use applications::ApplicationRepo;
pub use categories::CategoryRepo;
pub use companies::CompanyRepo;
pub use jobs::JobRepo;
