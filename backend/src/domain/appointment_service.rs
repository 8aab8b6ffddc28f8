use std::sync::Arc;

use chrono::{Local, Utc};
use shared::AppointmentStatus;
use tracing::{info, warn};

use crate::domain::commands::appointment::{CreateAppointmentCommand, UpdateAppointmentCommand};
use crate::domain::errors::{ConflictReason, DomainError};
use crate::domain::models::appointment::check_transition;
use crate::domain::models::{Appointment, AppointmentRecord, EntityKind};
use crate::domain::validation::{Validator, MAX_NOTES_LEN, MAX_REASON_LEN};
use crate::storage::traits::{AppointmentStorage, PetStorage};

/// Service for booking clinic visits and moving them through their statuses
#[derive(Clone)]
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentStorage>,
    pets: Arc<dyn PetStorage>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<dyn AppointmentStorage>, pets: Arc<dyn PetStorage>) -> Self {
        Self { appointments, pets }
    }

    async fn require_pet(&self, pet_id: i64) -> Result<(), DomainError> {
        match self.pets.find_pet(pet_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(EntityKind::Pet, pet_id)),
        }
    }

    /// Book a visit. New appointments are always Scheduled and have no notes.
    pub async fn create_appointment(&self, command: CreateAppointmentCommand) -> Result<Appointment, DomainError> {
        info!("Creating appointment: pet={}, date={}", command.pet_id, command.appointment_date);

        let now = Local::now().naive_local();
        let mut v = Validator::new();
        let appointment_date = v.date_time("appointmentDate", &command.appointment_date);
        if let Some(date) = appointment_date {
            v.not_in_past("appointmentDate", date, now);
        }
        let reason = v.required_text("reason", &command.reason, MAX_REASON_LEN);
        let pet_id = v.reference("petId", command.pet_id);
        let (Some(appointment_date), Some(pet_id)) = (appointment_date, pet_id) else {
            let err = v.into_error();
            warn!("Rejected appointment: {}", err);
            return Err(err);
        };
        v.finish().map_err(|e| {
            warn!("Rejected appointment: {}", e);
            e
        })?;

        self.require_pet(pet_id).await?;
        let record = AppointmentRecord {
            appointment_date,
            reason,
            status: AppointmentStatus::Scheduled,
            notes: None,
        };
        let appointment = self.appointments.insert_appointment(pet_id, &record, Utc::now()).await?;

        info!("Created appointment {} for pet {}", appointment.id, pet_id);
        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, DomainError> {
        info!("Getting appointment: {}", appointment_id);

        self.appointments
            .find_appointment(appointment_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Appointment, appointment_id))
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, DomainError> {
        info!("Listing all appointments");

        let appointments = self.appointments.list_appointments(None).await?;
        info!("Found {} appointments", appointments.len());
        Ok(appointments)
    }

    pub async fn list_appointments_by_pet(&self, pet_id: i64) -> Result<Vec<Appointment>, DomainError> {
        info!("Listing appointments of pet: {}", pet_id);

        self.require_pet(pet_id).await?;
        let appointments = self.appointments.list_appointments(Some(pet_id)).await?;
        info!("Found {} appointments for pet {}", appointments.len(), pet_id);
        Ok(appointments)
    }

    /// Edit date, reason, status and notes.
    ///
    /// Completed and Cancelled are final: their status cannot be replaced,
    /// though their other fields stay editable. A new date must not be in the
    /// past while the appointment is still scheduled.
    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        command: UpdateAppointmentCommand,
    ) -> Result<Appointment, DomainError> {
        info!("Updating appointment: {}", appointment_id);

        let current = self.get_appointment(appointment_id).await?;

        let now = Local::now().naive_local();
        let mut v = Validator::new();
        let appointment_date = v.date_time("appointmentDate", &command.appointment_date);
        let reason = v.required_text("reason", &command.reason, MAX_REASON_LEN);
        let status = v.status("status", &command.status);
        let notes = v.optional_text("notes", command.notes.as_deref(), MAX_NOTES_LEN);
        v.unchanged("petId", command.pet_id, current.pet_id);
        if let (Some(date), Some(AppointmentStatus::Scheduled)) = (appointment_date, status) {
            if date != current.appointment_date {
                v.not_in_past("appointmentDate", date, now);
            }
        }
        let (Some(appointment_date), Some(status)) = (appointment_date, status) else {
            let err = v.into_error();
            warn!("Rejected update of appointment {}: {}", appointment_id, err);
            return Err(err);
        };
        v.finish().map_err(|e| {
            warn!("Rejected update of appointment {}: {}", appointment_id, e);
            e
        })?;

        check_transition(appointment_id, current.status, status).map_err(|reason| {
            warn!("Rejected status change of appointment {}: {}", appointment_id, reason);
            DomainError::from(reason)
        })?;

        let record = AppointmentRecord {
            appointment_date,
            reason,
            status,
            notes,
        };
        let appointment = self
            .appointments
            .save_appointment(appointment_id, &record, current.status)
            .await?;

        info!("Updated appointment {}: status {} -> {}", appointment.id, current.status, appointment.status);
        Ok(appointment)
    }

    /// Cancel a scheduled appointment; the other fields are kept as they are
    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<Appointment, DomainError> {
        info!("Cancelling appointment: {}", appointment_id);

        let current = self.get_appointment(appointment_id).await?;
        if !current.can_be_cancelled() {
            warn!("Appointment {} is already {}", appointment_id, current.status);
            return Err(ConflictReason::TerminalStatus {
                id: appointment_id,
                status: current.status,
            }
            .into());
        }

        let mut record = current.to_record();
        record.status = AppointmentStatus::Cancelled;
        let appointment = self
            .appointments
            .save_appointment(appointment_id, &record, AppointmentStatus::Scheduled)
            .await?;

        info!("Cancelled appointment {}", appointment_id);
        Ok(appointment)
    }

    /// Hard delete, allowed in any status
    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<(), DomainError> {
        info!("Deleting appointment: {}", appointment_id);

        self.appointments.remove_appointment(appointment_id).await?;

        info!("Deleted appointment: {}", appointment_id);
        Ok(())
    }
}
