use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated calendar date. Records posted strictly before it are purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PurgeBoundary(NaiveDate);

impl PurgeBoundary {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Boundary rendered as `YYYY-MM-DD`, the form storage backends compare against.
    pub fn as_iso(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    /// Whether a record with this `posted_date` falls before the boundary.
    ///
    /// Only the leading `YYYY-MM-DD` of the value is considered, so full
    /// timestamps work. Empty or unparsable dates are never covered since
    /// their age is unknown.
    pub fn covers(&self, posted_date: &str) -> bool {
        match posted_date.get(..10) {
            Some(prefix) if is_iso_date_shape(prefix) => {
                NaiveDate::parse_from_str(prefix, DATE_FORMAT)
                    .map(|posted| posted < self.0)
                    .unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl fmt::Display for PurgeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for PurgeBoundary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        validate_date_boundary(Some(s))
    }
}

/// Accepts only `YYYY-MM-DD` strings naming a real calendar date.
pub fn validate_date_boundary(raw: Option<&str>) -> Result<PurgeBoundary> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(Error::Validation("purge date is missing".to_string())),
    };

    if !is_iso_date_shape(raw) {
        return Err(Error::Validation(format!(
            "purge date must look like YYYY-MM-DD: {:?}",
            raw
        )));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(PurgeBoundary)
        .map_err(|e| Error::Validation(format!("purge date {:?} is not a calendar date: {}", raw, e)))
}

fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
