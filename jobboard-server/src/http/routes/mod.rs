//! Route handlers organized by resource

pub mod applications;
pub mod categories;
pub mod companies;
pub mod health;
pub mod jobs;
pub mod viewer;

use serde::Serialize;

/// Body returned by every delete
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

impl Deleted {
    pub const YES: Deleted = Deleted { deleted: true };
}
