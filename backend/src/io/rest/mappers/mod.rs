//! Conversions between the wire DTOs in `shared` and the domain types.
//!
//! Domain types never derive serde; every field rename and date format lives
//! here.

pub mod appointment_mapper;
pub mod owner_mapper;
pub mod pet_mapper;

pub use appointment_mapper::AppointmentMapper;
pub use owner_mapper::OwnerMapper;
pub use pet_mapper::PetMapper;

use chrono::{DateTime, SecondsFormat, Utc};

/// `createdAt` on the wire: RFC 3339 in UTC, whole seconds
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
