use chrono::{DateTime, NaiveDateTime, Utc};
use shared::AppointmentStatus;

use crate::domain::errors::ConflictReason;

/// A clinic visit for one pet
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i64,
    /// Clinic wall-clock time
    pub appointment_date: NaiveDateTime,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Fixed at creation
    pub pet_id: i64,
    pub pet_name: String,
    pub owner_name: String,
}

impl Appointment {
    /// Only appointments that are still scheduled can be cancelled
    pub fn can_be_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    /// The editable fields of this appointment as they are now
    pub fn to_record(&self) -> AppointmentRecord {
        AppointmentRecord {
            appointment_date: self.appointment_date,
            reason: self.reason.clone(),
            status: self.status,
            notes: self.notes.clone(),
        }
    }
}

/// Editable appointment fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRecord {
    pub appointment_date: NaiveDateTime,
    pub reason: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Checks a status change of appointment `id`.
///
/// Scheduled may move to any status. Completed and Cancelled are terminal:
/// the status may be re-submitted unchanged but never replaced.
pub fn check_transition(
    id: i64,
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), ConflictReason> {
    if from.is_terminal() && from != to {
        return Err(ConflictReason::TerminalStatus { id, status: from });
    }
    Ok(())
}
