//! # REST API
//!
//! JSON endpoints under `/api`, one file per resource. Handlers log the
//! request, map the DTO to a domain command, call the service and map the
//! result back. Every failure is rendered by [`error::ApiError`].

pub mod appointment_apis;
pub mod error;
pub mod health_apis;
pub mod mappers;
pub mod owner_apis;
pub mod pet_apis;

use std::sync::Arc;

use axum::Router;

use crate::domain::{AppointmentService, OwnerService, PetService};
use crate::storage::{AppointmentRepository, DbConnection, OwnerRepository, PetRepository};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub owner_service: OwnerService,
    pub pet_service: PetService,
    pub appointment_service: AppointmentService,
    pub db: DbConnection,
}

impl AppState {
    /// Wire the services to SQLite repositories over `db`
    pub fn new(db: DbConnection) -> Self {
        let owners = Arc::new(OwnerRepository::new(db.clone()));
        let pets = Arc::new(PetRepository::new(db.clone()));
        let appointments = Arc::new(AppointmentRepository::new(db.clone()));

        Self {
            owner_service: OwnerService::new(owners.clone()),
            pet_service: PetService::new(pets.clone(), owners),
            appointment_service: AppointmentService::new(appointments, pets),
            db,
        }
    }
}

/// All resource routes, relative to `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(owner_apis::router())
        .merge(pet_apis::router())
        .merge(appointment_apis::router())
        .merge(health_apis::router())
}
