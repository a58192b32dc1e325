//! Job records, projections and mutation input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::text::{self, MAX_BODY_LEN, MAX_NAME_LEN};
use super::{Category, Company, Page, ValidationError};

/// Maximum number of tags on a job
pub const MAX_TAGS: usize = 30;

/// Maximum length of a single tag
pub const MAX_TAG_LEN: usize = 50;

/// Job record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub remote: bool,
    pub salary: Option<String>,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job with its company and category, as returned by job reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub company: Company,
    pub category: Option<Category>,
}

/// Result of a job search
pub type JobPage = Page<JobView>;

/// Job fields as sent by clients on create and update.
///
/// Every field is optional at the wire level so a missing field surfaces
/// as a validation error naming it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub salary: Option<String>,
    pub company_id: Option<String>,
    pub category_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Validated job fields, ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub remote: bool,
    pub salary: Option<String>,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
}

impl JobInput {
    pub fn validate(self) -> Result<NewJob, ValidationError> {
        Ok(NewJob {
            title: text::required("title", self.title, MAX_NAME_LEN)?,
            description: text::required("description", self.description, MAX_BODY_LEN)?,
            location: text::required("location", self.location, MAX_NAME_LEN)?,
            remote: self.remote.ok_or(ValidationError::Empty { field: "remote" })?,
            salary: text::optional("salary", self.salary, MAX_NAME_LEN)?,
            company_id: text::required_id("companyId", self.company_id)?,
            category_id: text::optional_id("categoryId", self.category_id)?,
            tags: validate_tags(self.tags.unwrap_or_default())?,
        })
    }
}

/// Trim tags, drop blanks and duplicates (first occurrence wins).
fn validate_tags(raw: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(ValidationError::TooLong {
                field: "tags",
                max: MAX_TAG_LEN,
            });
        }
        tags.push(tag.to_owned());
    }

    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooMany {
            field: "tags",
            max: MAX_TAGS,
        });
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> JobInput {
        JobInput {
            title: Some("Backend Developer".into()),
            description: Some("Build APIs".into()),
            location: Some("Berlin".into()),
            remote: Some(false),
            salary: None,
            company_id: Some(Uuid::new_v4().to_string()),
            category_id: None,
            tags: Some(vec!["Rust".into(), " Rust ".into(), "".into(), "SQL".into()]),
        }
    }

    #[test]
    fn valid_input() {
        let job = input().validate().unwrap();
        assert_eq!(job.title, "Backend Developer");
        assert_eq!(job.tags, vec!["Rust".to_string(), "SQL".to_string()]);
        assert_eq!(job.category_id, None);
    }

    #[test]
    fn missing_fields_are_named() {
        let err = JobInput {
            title: None,
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), "title");

        let err = JobInput {
            remote: None,
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "remote" });

        let err = JobInput {
            company_id: None,
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), "companyId");
    }

    #[test]
    fn absent_tags_become_empty() {
        let job = JobInput {
            tags: None,
            ..input()
        }
        .validate()
        .unwrap();
        assert!(job.tags.is_empty());
    }

    #[test]
    fn too_many_tags() {
        let tags = (0..=MAX_TAGS).map(|i| format!("tag-{i}")).collect();
        let err = JobInput {
            tags: Some(tags),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::TooMany { field: "tags", .. }));
    }

    #[test]
    fn view_serializes_flat_camel_case() {
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            website: None,
            logo: None,
            description: None,
            created_at: now,
            updated_at: now,
        };
        let view = JobView {
            job: Job {
                id: Uuid::new_v4(),
                title: "SRE".into(),
                description: "Keep it up".into(),
                location: "Remote".into(),
                remote: true,
                salary: None,
                company_id: company.id,
                category_id: None,
                tags: vec![],
                created_at: now,
                updated_at: now,
            },
            company,
            category: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "SRE");
        assert_eq!(json["company"]["name"], "Acme");
        assert!(json.get("companyId").is_some());
        assert!(json["category"].is_null());
    }
}
