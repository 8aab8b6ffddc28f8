use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod notice;

/// Owner record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: i64,
    #[serde(alias = "firtsName")]
    pub first_name: String,
    pub last_name: String,
    /// Always `first_name + " " + last_name`
    pub full_name: String,
    pub phone: String,
    pub email: String,
    /// RFC 3339, UTC
    pub created_at: String,
    /// Number of pets registered under this owner
    pub pet_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOwnerRequest {
    /// The original web client spells this field `firtsName`
    #[serde(alias = "firtsName")]
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerRequest {
    #[serde(alias = "firtsName")]
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Pet record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    /// Canonical species label (see [`Species`])
    pub species: String,
    pub breed: String,
    /// YYYY-MM-DD
    pub birth_date: String,
    /// Whole years between birth date and the day the record was read
    pub age_in_years: u32,
    pub created_at: String,
    pub owner_id: i64,
    pub owner_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birth_date: String,
    /// 0 is what the web form sends when no owner was picked
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birth_date: String,
    /// Owners cannot be changed; when present it must match the current owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

/// Appointment record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    /// Clinic wall-clock time, YYYY-MM-DDTHH:MM:SS
    pub appointment_date: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    #[serde(rename = "canBeCanceled")]
    pub can_be_cancelled: bool,
    pub created_at: String,
    pub pet_id: i64,
    pub pet_name: String,
    pub owner_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub appointment_date: String,
    pub reason: String,
    pub pet_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub appointment_date: String,
    pub reason: String,
    /// One of `Scheduled`, `Completed`, `Cancelled`
    pub status: String,
    pub notes: Option<String>,
    /// Appointments cannot be moved to another pet; when present it must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
}

/// Lifecycle state of an appointment. Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LabelError::UnknownStatus(trimmed.to_string()))
    }
}

/// Fixed set of species offered by the clinic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Rabbit,
        Species::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
            Species::Rabbit => "Rabbit",
            Species::Other => "Other",
        }
    }

    /// Label used by the Spanish web form
    pub fn spanish_label(&self) -> &'static str {
        match self {
            Species::Dog => "Perro",
            Species::Cat => "Gato",
            Species::Bird => "Ave",
            Species::Rabbit => "Conejo",
            Species::Other => "Otro",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = LabelError;

    /// Accepts the English and the Spanish labels, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Species::ALL
            .into_iter()
            .find(|species| {
                species.as_str().eq_ignore_ascii_case(trimmed)
                    || species.spanish_label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| LabelError::UnknownSpecies(trimmed.to_string()))
    }
}

/// Errors that can occur when parsing an enumerated label
#[derive(Debug, Clone, PartialEq)]
pub enum LabelError {
    UnknownStatus(String),
    UnknownSpecies(String),
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::UnknownStatus(value) => write!(f, "Unknown appointment status: '{}'", value),
            LabelError::UnknownSpecies(value) => write!(f, "Unknown species: '{}'", value),
        }
    }
}

impl std::error::Error for LabelError {}

/// Category of a failed API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A field was missing or malformed; the user can fix the form and retry
    Validation,
    /// A referenced record does not exist
    NotFound,
    /// The operation would break a referential or status rule
    Conflict,
    /// The record store could not be reached
    Transport,
}

/// Body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Body of the health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
