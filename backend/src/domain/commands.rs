//! Domain-level command types.
//!
//! These are the raw drafts a caller submits; services validate them into
//! the typed records in [`models`](crate::domain::models). The REST layer
//! maps the public DTOs from the `shared` crate onto these.

pub mod owner {
    /// Input for creating or updating an owner
    #[derive(Debug, Clone, Default)]
    pub struct OwnerDraft {
        pub first_name: String,
        pub last_name: String,
        pub phone: String,
        pub email: String,
    }

    pub type CreateOwnerCommand = OwnerDraft;
    pub type UpdateOwnerCommand = OwnerDraft;
}

pub mod pet {
    /// Input for creating a new pet
    #[derive(Debug, Clone, Default)]
    pub struct CreatePetCommand {
        pub name: String,
        pub species: String,
        pub breed: String,
        /// YYYY-MM-DD
        pub birth_date: String,
        pub owner_id: i64,
    }

    /// Input for updating a pet. `owner_id` is only checked, never applied.
    #[derive(Debug, Clone, Default)]
    pub struct UpdatePetCommand {
        pub name: String,
        pub species: String,
        pub breed: String,
        pub birth_date: String,
        pub owner_id: Option<i64>,
    }
}

pub mod appointment {
    /// Input for booking an appointment
    #[derive(Debug, Clone, Default)]
    pub struct CreateAppointmentCommand {
        pub appointment_date: String,
        pub reason: String,
        pub pet_id: i64,
    }

    /// Input for editing an appointment. `pet_id` is only checked, never applied.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateAppointmentCommand {
        pub appointment_date: String,
        pub reason: String,
        pub status: String,
        pub notes: Option<String>,
        pub pet_id: Option<i64>,
    }
}
