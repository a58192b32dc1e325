//! Company records and mutation input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text::{self, MAX_BODY_LEN, MAX_NAME_LEN, MAX_URL_LEN};
use super::{Job, ValidationError};

/// Company record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Company with its jobs (newest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyView {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

/// Validated company fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

impl CompanyInput {
    pub fn validate(self) -> Result<NewCompany, ValidationError> {
        Ok(NewCompany {
            name: text::required("name", self.name, MAX_NAME_LEN)?,
            website: text::optional("website", self.website, MAX_URL_LEN)?,
            logo: text::optional("logo", self.logo, MAX_URL_LEN)?,
            description: text::optional("description", self.description, MAX_BODY_LEN)?,
        })
    }
}
