use shared::{CreateAppointmentRequest, UpdateAppointmentRequest};

use crate::domain::commands::appointment::{CreateAppointmentCommand, UpdateAppointmentCommand};
use crate::domain::models::Appointment;
use crate::io::rest::mappers::format_timestamp;

/// Clinic wall-clock time, no offset
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct AppointmentMapper;

impl AppointmentMapper {
    pub fn to_dto(appointment: Appointment) -> shared::Appointment {
        shared::Appointment {
            can_be_cancelled: appointment.can_be_cancelled(),
            appointment_date: appointment.appointment_date.format(APPOINTMENT_DATE_FORMAT).to_string(),
            created_at: format_timestamp(&appointment.created_at),
            id: appointment.id,
            reason: appointment.reason,
            status: appointment.status,
            notes: appointment.notes,
            pet_id: appointment.pet_id,
            pet_name: appointment.pet_name,
            owner_name: appointment.owner_name,
        }
    }

    pub fn to_create_command(request: CreateAppointmentRequest) -> CreateAppointmentCommand {
        CreateAppointmentCommand {
            appointment_date: request.appointment_date,
            reason: request.reason,
            pet_id: request.pet_id,
        }
    }

    pub fn to_update_command(request: UpdateAppointmentRequest) -> UpdateAppointmentCommand {
        UpdateAppointmentCommand {
            appointment_date: request.appointment_date,
            reason: request.reason,
            status: request.status,
            notes: request.notes,
            pet_id: request.pet_id,
        }
    }
}
