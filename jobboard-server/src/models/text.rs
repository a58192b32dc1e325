//! Text field validation shared by all mutation inputs
//!
//! Required fields are trimmed and must be non-empty. Optional fields that
//! are blank after trimming are stored as absent.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for titles, names and locations
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for long-form text (descriptions, cover letters)
pub const MAX_BODY_LEN: usize = 20_000;

/// Maximum length for URLs (website, logo, resume)
pub const MAX_URL_LEN: usize = 2_048;

/// Slug pattern: lowercase alphanumeric with hyphens, starting with alphanumeric
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{0,79}$").expect("invalid slug regex"));

/// Loose email shape: something@something.tld, no whitespace
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Validate a required text field.
pub fn required(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Validate an optional text field. Blank means absent.
pub fn optional(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => required(field, Some(v), max).map(Some),
        _ => Ok(None),
    }
}

/// Validate a required identifier reference.
pub fn required_id(field: &'static str, value: Option<String>) -> Result<Uuid, ValidationError> {
    let raw = required(field, value, 64)?;
    parse_id(field, &raw)
}

/// Validate an optional identifier reference. Blank means absent.
pub fn optional_id(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Uuid>, ValidationError> {
    match optional(field, value, 64)? {
        Some(raw) => parse_id(field, &raw).map(Some),
        None => Ok(None),
    }
}

fn parse_id(field: &'static str, raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be a UUID",
    })
}

/// Validated category slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Create a new slug.
    ///
    /// # Rules
    /// - Max 80 characters
    /// - Lowercase alphanumeric and hyphens
    /// - Must start with alphanumeric
    ///
    /// # Example
    /// ```
    /// use jobboard_server::models::Slug;
    ///
    /// assert!(Slug::new(Some("data-science".into())).is_ok());
    /// assert!(Slug::new(Some("Data Science".into())).is_err());
    /// assert!(Slug::new(None).is_err());
    /// ```
    pub fn new(value: Option<String>) -> Result<Self, ValidationError> {
        let raw = required("slug", value, 80)?;

        if !SLUG_RE.is_match(&raw) {
            return Err(ValidationError::InvalidFormat {
                field: "slug",
                reason: "must be lowercase alphanumeric with hyphens, starting with alphanumeric",
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated applicant email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(value: Option<String>) -> Result<Self, ValidationError> {
        let raw = required("email", value, 320)?;

        if !EMAIL_RE.is_match(&raw) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be an email address",
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        let v = required("title", Some("  Engineer ".into()), MAX_NAME_LEN).unwrap();
        assert_eq!(v, "Engineer");
    }

    #[test]
    fn required_rejects_missing_and_blank() {
        assert_eq!(
            required("title", None, MAX_NAME_LEN).unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
        assert_eq!(
            required("title", Some("   ".into()), MAX_NAME_LEN).unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
    }

    #[test]
    fn required_counts_chars_not_bytes() {
        let accented = "é".repeat(MAX_NAME_LEN);
        assert!(required("name", Some(accented), MAX_NAME_LEN).is_ok());

        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            required("name", Some(too_long), MAX_NAME_LEN).unwrap_err(),
            ValidationError::TooLong { max: MAX_NAME_LEN, .. }
        ));
    }

    #[test]
    fn optional_blank_is_absent() {
        assert_eq!(optional("salary", Some(" ".into()), 100).unwrap(), None);
        assert_eq!(optional("salary", None, 100).unwrap(), None);
        assert_eq!(
            optional("salary", Some("$100k".into()), 100).unwrap(),
            Some("$100k".into())
        );
    }

    #[test]
    fn ids() {
        let id = Uuid::new_v4();
        assert_eq!(required_id("companyId", Some(id.to_string())).unwrap(), id);
        assert!(matches!(
            required_id("companyId", Some("nope".into())).unwrap_err(),
            ValidationError::InvalidFormat { field: "companyId", .. }
        ));
        assert_eq!(optional_id("categoryId", Some("".into())).unwrap(), None);
    }

    #[test]
    fn slugs() {
        assert!(Slug::new(Some("engineering".into())).is_ok());
        assert!(Slug::new(Some("dev-ops-2".into())).is_ok());
        assert!(Slug::new(Some("-leading".into())).is_err());
        assert!(Slug::new(Some("under_score".into())).is_err());
    }

    #[test]
    fn emails() {
        assert!(Email::new(Some("ada@example.com".into())).is_ok());
        assert!(Email::new(Some("ada@example".into())).is_err());
        assert!(Email::new(Some("ada example.com".into())).is_err());
    }
}
