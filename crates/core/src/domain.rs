use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One cached image. A record is written the first time a content hash is
/// seen and never touched again; `hash` is the dedup key, not `id` or `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub path: PathBuf,
    pub size: u64,
    /// Lowercase hex SHA-256 of the raw image bytes.
    pub hash: String,
    /// Unix timestamp of first insertion.
    pub downloaded_at: i64,
}

/// Outcome of one pipeline run, reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// The URL the bytes were downloaded from (after video substitution).
    pub url: String,
    pub title: String,
    /// The local path handed to the wallpaper setter. On a dedup hit this is
    /// the path recorded when the content was first cached, which may differ
    /// from the path derived for the current URL.
    pub path: PathBuf,
    pub size: u64,
    pub hash: String,
    pub deduplicated: bool,
}

/// Parse a `YYYY-MM-DD` date string, rejecting anything else.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}
