//! Domain entities and the validated field sets that get persisted.

pub mod appointment;
pub mod owner;
pub mod pet;

pub use appointment::{Appointment, AppointmentRecord};
pub use owner::{Owner, OwnerRecord};
pub use pet::{Pet, PetRecord};

use std::fmt;

/// The three record types managed by the clinic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Owner,
    Pet,
    Appointment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Owner => "owner",
            EntityKind::Pet => "pet",
            EntityKind::Appointment => "appointment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
