use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Name of the HTTP-only cookie carrying the session token.
pub const AUTH_COOKIE: &str = "token";
