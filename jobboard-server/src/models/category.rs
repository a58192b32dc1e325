//! Category records and mutation input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text::{self, Slug, MAX_BODY_LEN, MAX_NAME_LEN};
use super::ValidationError;

/// Category record. Slug uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn validate(self) -> Result<NewCategory, ValidationError> {
        Ok(NewCategory {
            name: text::required("name", self.name, MAX_NAME_LEN)?,
            slug: Slug::new(self.slug)?,
            description: text::optional("description", self.description, MAX_BODY_LEN)?,
        })
    }
}
