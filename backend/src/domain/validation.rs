//! Field validation shared by the services.
//!
//! A [`Validator`] collects every issue in a payload so the caller can fix
//! the whole form at once.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{AppointmentStatus, Species};

use crate::domain::errors::{DomainError, ValidationIssue};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_REASON_LEN: usize = 500;
pub const MAX_NOTES_LEN: usize = 2000;
pub const MIN_BIRTH_YEAR: i32 = 1900;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern is valid"));

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Non-blank text, trimmed
    pub fn required_text(&mut self, field: &'static str, value: &str, max_len: usize) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(ValidationIssue::Required(field));
        } else if trimmed.chars().count() > max_len {
            self.push(ValidationIssue::TooLong { field, max: max_len });
        }
        trimmed.to_string()
    }

    /// Optional text; blank collapses to `None`
    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>, max_len: usize) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
        if trimmed.chars().count() > max_len {
            self.push(ValidationIssue::TooLong { field, max: max_len });
        }
        Some(trimmed.to_string())
    }

    pub fn email(&mut self, field: &'static str, value: &str) -> String {
        let before = self.issues.len();
        let email = self.required_text(field, value, MAX_EMAIL_LEN);
        if self.issues.len() == before && !EMAIL_PATTERN.is_match(&email) {
            self.push(ValidationIssue::InvalidEmail {
                field,
                value: email.clone(),
            });
        }
        email
    }

    pub fn species(&mut self, field: &'static str, value: &str) -> Option<Species> {
        if value.trim().is_empty() {
            self.push(ValidationIssue::Required(field));
            return None;
        }
        match value.parse::<Species>() {
            Ok(species) => Some(species),
            Err(_) => {
                self.push(ValidationIssue::UnknownSpecies(value.trim().to_string()));
                None
            }
        }
    }

    pub fn status(&mut self, field: &'static str, value: &str) -> Option<AppointmentStatus> {
        if value.trim().is_empty() {
            self.push(ValidationIssue::Required(field));
            return None;
        }
        match value.parse::<AppointmentStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                self.push(ValidationIssue::UnknownStatus(value.trim().to_string()));
                None
            }
        }
    }

    /// A YYYY-MM-DD date no later than `today`
    pub fn birth_date(&mut self, field: &'static str, value: &str, today: NaiveDate) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            self.push(ValidationIssue::Required(field));
            return None;
        }

        let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
            self.push(ValidationIssue::InvalidDate {
                field,
                value: value.to_string(),
            });
            return None;
        };

        if date.year() < MIN_BIRTH_YEAR {
            self.push(ValidationIssue::TooOld {
                field,
                min_year: MIN_BIRTH_YEAR,
            });
        } else if date > today {
            self.push(ValidationIssue::InFuture(field));
        }
        Some(date)
    }

    pub fn date_time(&mut self, field: &'static str, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            self.push(ValidationIssue::Required(field));
            return None;
        }

        let parsed = parse_date_time(value);
        if parsed.is_none() {
            self.push(ValidationIssue::InvalidDate {
                field,
                value: value.to_string(),
            });
        }
        parsed
    }

    /// Rejects times before the current minute
    pub fn not_in_past(&mut self, field: &'static str, value: NaiveDateTime, now: NaiveDateTime) {
        if value < start_of_minute(now) {
            self.push(ValidationIssue::InPast(field));
        }
    }

    /// A positive record id; 0 is what an untouched form select submits
    pub fn reference(&mut self, field: &'static str, id: i64) -> Option<i64> {
        if id <= 0 {
            self.push(ValidationIssue::Required(field));
            None
        } else {
            Some(id)
        }
    }

    /// Fails when a parent reference was resubmitted with a different value
    pub fn unchanged(&mut self, field: &'static str, submitted: Option<i64>, current: i64) {
        if matches!(submitted, Some(id) if id != current) {
            self.push(ValidationIssue::Immutable(field));
        }
    }

    pub fn into_error(self) -> DomainError {
        DomainError::Validation(self.issues)
    }

    pub fn finish(self) -> Result<(), DomainError> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

/// Parses a clinic wall-clock time. RFC 3339 input is converted to local time.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn start_of_minute(now: NaiveDateTime) -> NaiveDateTime {
    now.date()
        .and_hms_opt(now.hour(), now.minute(), 0)
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_required_text_trims_and_checks_length() {
        let mut v = Validator::new();
        assert_eq!(v.required_text("name", "  Max  ", 10), "Max");
        assert!(v.is_clean());

        v.required_text("name", "   ", 10);
        v.required_text("breed", "abcdefghijk", 10);
        let err = v.finish().unwrap_err();
        match err {
            DomainError::Validation(issues) => {
                assert_eq!(issues, vec![
                    ValidationIssue::Required("name"),
                    ValidationIssue::TooLong { field: "breed", max: 10 },
                ]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_email_syntax() {
        for good in ["juan@mail.com", "a.b+c@clinic.co.uk", "x@y.io"] {
            let mut v = Validator::new();
            v.email("email", good);
            assert!(v.is_clean(), "{} should be accepted", good);
        }
        for bad in ["juan", "juan@", "@mail.com", "juan@mail", "ju an@mail.com", "juan@mail."] {
            let mut v = Validator::new();
            v.email("email", bad);
            assert!(!v.is_clean(), "{} should be rejected", bad);
        }

        // blank email reports only the missing field
        let mut v = Validator::new();
        v.email("email", "");
        assert!(matches!(v.into_error(), DomainError::Validation(issues) if issues == vec![ValidationIssue::Required("email")]));
    }

    #[test]
    fn test_birth_date_rules() {
        let today = date(2026, 10, 19);

        let mut v = Validator::new();
        assert_eq!(v.birth_date("birthDate", "2020-01-01", today), Some(date(2020, 1, 1)));
        assert_eq!(v.birth_date("birthDate", "2026-10-19", today), Some(today));
        assert!(v.is_clean());

        let mut v = Validator::new();
        v.birth_date("birthDate", "2026-10-20", today);
        assert!(matches!(v.into_error(), DomainError::Validation(issues) if issues == vec![ValidationIssue::InFuture("birthDate")]));

        for bad in ["2015/06/15", "2015-13-15", "2015-02-30", "yesterday"] {
            let mut v = Validator::new();
            assert_eq!(v.birth_date("birthDate", bad, today), None, "{} should not parse", bad);
            assert!(!v.is_clean());
        }

        let mut v = Validator::new();
        v.birth_date("birthDate", "1899-06-15", today);
        assert!(!v.is_clean());
    }

    #[test]
    fn test_parse_date_time_formats() {
        let expected = date(2030, 5, 1).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(parse_date_time("2030-05-01T10:30"), Some(expected));
        assert_eq!(parse_date_time("2030-05-01T10:30:00"), Some(expected));
        assert_eq!(parse_date_time("2030-05-01 10:30:00"), Some(expected));
        assert!(parse_date_time("2030-05-01T10:30:00Z").is_some());
        assert_eq!(parse_date_time("01/05/2030 10:30"), None);
        assert_eq!(parse_date_time("2030-05-01"), None);
    }

    #[test]
    fn test_not_in_past_allows_current_minute() {
        let now = date(2026, 10, 19).and_hms_opt(9, 15, 42).unwrap();

        let mut v = Validator::new();
        v.not_in_past("appointmentDate", date(2026, 10, 19).and_hms_opt(9, 15, 0).unwrap(), now);
        v.not_in_past("appointmentDate", date(2026, 10, 20).and_hms_opt(8, 0, 0).unwrap(), now);
        assert!(v.is_clean());

        v.not_in_past("appointmentDate", date(2026, 10, 19).and_hms_opt(9, 14, 59).unwrap(), now);
        assert!(!v.is_clean());
    }

    #[test]
    fn test_labels() {
        let mut v = Validator::new();
        assert_eq!(v.species("species", "Perro"), Some(Species::Dog));
        assert_eq!(v.status("status", "Completed"), Some(AppointmentStatus::Completed));
        assert!(v.is_clean());

        assert_eq!(v.species("species", "Dragon"), None);
        assert_eq!(v.status("status", "Pending"), None);
        assert!(matches!(v.into_error(), DomainError::Validation(issues) if issues == vec![
            ValidationIssue::UnknownSpecies("Dragon".to_string()),
            ValidationIssue::UnknownStatus("Pending".to_string()),
        ]));
    }

    #[test]
    fn test_references() {
        let mut v = Validator::new();
        assert_eq!(v.reference("ownerId", 3), Some(3));
        v.unchanged("ownerId", None, 3);
        v.unchanged("ownerId", Some(3), 3);
        assert!(v.is_clean());

        assert_eq!(v.reference("ownerId", 0), None);
        v.unchanged("ownerId", Some(4), 3);
        assert!(matches!(v.into_error(), DomainError::Validation(issues) if issues == vec![
            ValidationIssue::Required("ownerId"),
            ValidationIssue::Immutable("ownerId"),
        ]));
    }

    #[test]
    fn test_optional_text() {
        let mut v = Validator::new();
        assert_eq!(v.optional_text("notes", None, 5), None);
        assert_eq!(v.optional_text("notes", Some("   "), 5), None);
        assert_eq!(v.optional_text("notes", Some(" ok "), 5), Some("ok".to_string()));
        assert!(v.is_clean());
        v.optional_text("notes", Some("too long"), 5);
        assert!(!v.is_clean());
    }
}
