//! Job search filter construction
//!
//! Search arguments are normalised into a [`JobFilter`] plus a
//! [`PageWindow`]. The same filter value renders the SQL predicate for the
//! page query and the count query, and evaluates records directly for the
//! in-memory store, so `total` always describes the set the page is cut from.
//!
//! Normalisation never fails: blank, unparsable or negative inputs impose no
//! constraint (or fall back to the window defaults).

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Job, PageWindow};

/// Typed job search arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearch {
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    /// Exact remote flag; `None` means either
    pub remote: Option<bool>,
    /// Any-of tag match; empty means no constraint
    pub tags: Option<Vec<String>>,
    /// Exact category reference
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl JobSearch {
    pub fn filter(&self) -> JobFilter {
        JobFilter {
            location: non_blank(self.location.as_deref()),
            remote: self.remote,
            tags: normalize_tags(self.tags.iter().flatten().map(String::as_str)),
            category_id: self.category_id,
            search: non_blank(self.search.as_deref()),
        }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.limit, self.offset)
    }
}

/// Raw search arguments as they arrive in a query string.
///
/// Every field is text so that a malformed value can be ignored instead of
/// rejecting the request. `tags` is comma-separated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearchParams {
    pub location: Option<String>,
    pub remote: Option<String>,
    pub tags: Option<String>,
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl JobSearchParams {
    /// Collect parameters from decoded query pairs, one key at a time.
    ///
    /// Repeated `tags` keys extend the tag list; for any other repeated key
    /// the first value wins. Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "location" => &mut params.location,
                "remote" => &mut params.remote,
                "categoryId" => &mut params.category_id,
                "search" => &mut params.search,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                "tags" => {
                    match &mut params.tags {
                        Some(tags) => {
                            tags.push(',');
                            tags.push_str(&value);
                        }
                        None => params.tags = Some(value),
                    }
                    continue;
                }
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl From<JobSearchParams> for JobSearch {
    fn from(params: JobSearchParams) -> Self {
        Self {
            location: params.location,
            remote: params.remote.as_deref().and_then(parse_flag),
            tags: params
                .tags
                .map(|t| t.split(',').map(str::to_owned).collect()),
            category_id: params
                .category_id
                .as_deref()
                .and_then(|s| Uuid::parse_str(s.trim()).ok()),
            search: params.search,
            limit: params.limit.as_deref().and_then(parse_int),
            offset: params.offset.as_deref().and_then(parse_int),
        }
    }
}

/// Normalised job search predicate.
///
/// All present constraints are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub location: Option<String>,
    pub remote: Option<bool>,
    /// Trimmed, non-empty, de-duplicated
    pub tags: Vec<String>,
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}

impl JobFilter {
    /// Evaluate the predicate against a single record.
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(location) = &self.location {
            if !contains_ci(&job.location, location) {
                return false;
            }
        }

        if let Some(remote) = self.remote {
            if job.remote != remote {
                return false;
            }
        }

        // any-of: one shared tag qualifies
        if !self.tags.is_empty() && !job.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if let Some(category_id) = self.category_id {
            if job.category_id != Some(category_id) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !contains_ci(&job.title, search) && !contains_ci(&job.description, search) {
                return false;
            }
        }

        true
    }

    /// Append the predicate as a `WHERE` clause over the `jobs` table aliased `j`.
    pub fn push_predicate(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE TRUE");

        if let Some(location) = &self.location {
            qb.push(" AND j.location ILIKE ")
                .push_bind(like_pattern(location));
        }

        if let Some(remote) = self.remote {
            qb.push(" AND j.remote = ").push_bind(remote);
        }

        if !self.tags.is_empty() {
            qb.push(" AND j.tags && ").push_bind(self.tags.clone());
        }

        if let Some(category_id) = self.category_id {
            qb.push(" AND j.category_id = ").push_bind(category_id);
        }

        if let Some(search) = &self.search {
            let pattern = like_pattern(search);
            qb.push(" AND (j.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR j.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn normalize_tags<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `%needle%` with LIKE metacharacters escaped (backslash is the default
/// ILIKE escape character).
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
