//! Applications submitted by job seekers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text::{self, Email, MAX_BODY_LEN, MAX_NAME_LEN, MAX_URL_LEN};
use super::ValidationError;

/// Status given to new applications
pub const DEFAULT_STATUS: &str = "pending";

/// Application record. `status` is free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company fields shown next to an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
}

/// Job fields shown next to an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub company: CompanySummary,
}

/// Application with the job (and its company) applied to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub job: JobSummary,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub job_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub name: String,
    pub email: Email,
    pub resume: Option<String>,
    pub cover_letter: Option<String>,
}

impl ApplicationInput {
    pub fn validate(self) -> Result<NewApplication, ValidationError> {
        Ok(NewApplication {
            job_id: text::required_id("jobId", self.job_id)?,
            name: text::required("name", self.name, MAX_NAME_LEN)?,
            email: Email::new(self.email)?,
            resume: text::optional("resume", self.resume, MAX_URL_LEN)?,
            cover_letter: text::optional("coverLetter", self.cover_letter, MAX_BODY_LEN)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusInput {
    pub status: Option<String>,
}

impl StatusInput {
    pub fn validate(self) -> Result<String, ValidationError> {
        text::required("status", self.status, 64)
    }
}
