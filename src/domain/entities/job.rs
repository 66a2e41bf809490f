use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    grade::Grade,
    validation::{normalize_codes, validate_codes, validate_not_blank},
};

const MAX_NAME_LENGTH: u64 = 120;
const MAX_TITLE_LENGTH: u64 = 200;
const MAX_DESCRIPTION_LENGTH: u64 = 5000;
const MAX_PACKAGE_LENGTH: u64 = 60;

pub const JOB_COLUMNS: &str = "id, company_name, title, description, location, package, \
    min_cgpa::TEXT AS min_cgpa, allowed_branches, allowed_courses, deadline, posted_by, posted_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub package: String,
    pub min_cgpa: Grade,
    pub allowed_branches: Vec<String>,
    pub allowed_courses: Vec<String>,
    pub deadline: DateTime<Utc>,
    pub posted_by: Uuid,
    pub posted_at: DateTime<Utc>,
}

impl Job {
    pub fn is_open_at(&self, at: DateTime<Utc>) -> bool {
        at <= self.deadline
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewJobRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH), custom(function = "validate_not_blank"))]
    pub company_name: String,

    #[validate(length(min = 1, max = MAX_TITLE_LENGTH), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH), custom(function = "validate_not_blank"))]
    pub location: String,

    #[validate(length(min = 1, max = MAX_PACKAGE_LENGTH), custom(function = "validate_not_blank"))]
    pub package: String,

    /// Defaults to 0.00 (open to every grade) when omitted.
    #[serde(default)]
    pub min_cgpa: Option<Grade>,

    #[validate(custom(function = "validate_codes"))]
    pub allowed_branches: Vec<String>,

    #[validate(custom(function = "validate_codes"))]
    pub allowed_courses: Vec<String>,

    #[serde(deserialize_with = "deserialize_deadline")]
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH), custom(function = "validate_not_blank"))]
    pub company_name: Option<String>,

    #[validate(length(min = 1, max = MAX_TITLE_LENGTH), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH), custom(function = "validate_not_blank"))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = MAX_PACKAGE_LENGTH), custom(function = "validate_not_blank"))]
    pub package: Option<String>,

    pub min_cgpa: Option<Grade>,

    #[validate(custom(function = "validate_codes"))]
    pub allowed_branches: Option<Vec<String>>,

    #[validate(custom(function = "validate_codes"))]
    pub allowed_courses: Option<Vec<String>>,

    #[serde(deserialize_with = "deserialize_optional_deadline")]
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobInsert {
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub package: String,
    pub min_cgpa: Grade,
    pub allowed_branches: Vec<String>,
    pub allowed_courses: Vec<String>,
    pub deadline: DateTime<Utc>,
    pub posted_by: Uuid,
}

impl NewJobRequest {
    pub fn prepare_for_insert(self, posted_by: Uuid) -> JobInsert {
        JobInsert {
            company_name: self.company_name.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description,
            location: self.location.trim().to_string(),
            package: self.package.trim().to_string(),
            min_cgpa: self.min_cgpa.unwrap_or(Grade::default()),
            allowed_branches: normalize_codes(self.allowed_branches),
            allowed_courses: normalize_codes(self.allowed_courses),
            deadline: self.deadline,
            posted_by,
        }
    }
}

/// Partial job update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub package: Option<String>,
    pub min_cgpa: Option<Grade>,
    pub allowed_branches: Option<Vec<String>>,
    pub allowed_courses: Option<Vec<String>>,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<UpdateJobRequest> for JobChanges {
    fn from(request: UpdateJobRequest) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        JobChanges {
            company_name: trim(request.company_name),
            title: trim(request.title),
            description: request.description,
            location: trim(request.location),
            package: trim(request.package),
            min_cgpa: request.min_cgpa,
            allowed_branches: request.allowed_branches.map(normalize_codes),
            allowed_courses: request.allowed_courses.map(normalize_codes),
            deadline: request.deadline,
        }
    }
}

impl JobChanges {
    pub fn apply_to(self, job: &mut Job) {
        if let Some(v) = self.company_name { job.company_name = v; }
        if let Some(v) = self.title { job.title = v; }
        if let Some(v) = self.description { job.description = v; }
        if let Some(v) = self.location { job.location = v; }
        if let Some(v) = self.package { job.package = v; }
        if let Some(v) = self.min_cgpa { job.min_cgpa = v; }
        if let Some(v) = self.allowed_branches { job.allowed_branches = v; }
        if let Some(v) = self.allowed_courses { job.allowed_courses = v; }
        if let Some(v) = self.deadline { job.deadline = v; }
    }
}

/// A job as shown to a caller, with the caller-specific flags students see.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,
}

impl JobListing {
    pub fn plain(job: Job) -> Self {
        JobListing { job, eligible: None, has_applied: None }
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) or a bare
/// date, which closes at the end of that day.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid deadline '{raw}'"))
}

fn deserialize_deadline<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_deadline(&raw).map_err(de::Error::custom)
}

fn deserialize_optional_deadline<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_deadline(&raw).map_err(de::Error::custom))
        .transpose()
}
