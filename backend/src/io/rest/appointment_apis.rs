use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use shared::{CreateAppointmentRequest, UpdateAppointmentRequest};
use tracing::info;

use crate::io::rest::error::ApiError;
use crate::io::rest::mappers::AppointmentMapper;
use crate::io::rest::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route("/appointments/pet/:pet_id", get(list_appointments_by_pet))
        .route(
            "/appointments/:id",
            get(get_appointment).put(update_appointment).delete(delete_appointment),
        )
        .route("/appointments/:id/cancel", patch(cancel_appointment))
}

/// GET /api/appointments
pub async fn list_appointments(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/appointments");

    let appointments = state.appointment_service.list_appointments().await?;
    let dtos: Vec<shared::Appointment> = appointments.into_iter().map(AppointmentMapper::to_dto).collect();
    Ok(Json(dtos))
}

/// GET /api/appointments/pet/:pet_id
pub async fn list_appointments_by_pet(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(pet_id) = path?;
    info!("GET /api/appointments/pet/{}", pet_id);

    let appointments = state.appointment_service.list_appointments_by_pet(pet_id).await?;
    let dtos: Vec<shared::Appointment> = appointments.into_iter().map(AppointmentMapper::to_dto).collect();
    Ok(Json(dtos))
}

/// POST /api/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    info!("POST /api/appointments - request: {:?}", request);

    let appointment = state
        .appointment_service
        .create_appointment(AppointmentMapper::to_create_command(request))
        .await?;
    Ok((StatusCode::CREATED, Json(AppointmentMapper::to_dto(appointment))))
}

/// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    info!("GET /api/appointments/{}", id);

    let appointment = state.appointment_service.get_appointment(id).await?;
    Ok(Json(AppointmentMapper::to_dto(appointment)))
}

/// PUT /api/appointments/:id
pub async fn update_appointment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateAppointmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    info!("PUT /api/appointments/{} - request: {:?}", id, request);

    let appointment = state
        .appointment_service
        .update_appointment(id, AppointmentMapper::to_update_command(request))
        .await?;
    Ok(Json(AppointmentMapper::to_dto(appointment)))
}

/// PATCH /api/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    info!("PATCH /api/appointments/{}/cancel", id);

    let appointment = state.appointment_service.cancel_appointment(id).await?;
    Ok(Json(AppointmentMapper::to_dto(appointment)))
}

/// DELETE /api/appointments/:id
pub async fn delete_appointment(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    info!("DELETE /api/appointments/{}", id);

    state.appointment_service.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
