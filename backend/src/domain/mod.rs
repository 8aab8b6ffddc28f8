//! # Domain Module
//!
//! Business rules for the clinic records.
//!
//! ## Services
//!
//! - [`OwnerService`]: clients, deletable only once they have no pets
//! - [`PetService`]: pets, each bound for life to the owner it was created under
//! - [`AppointmentService`]: visits and their Scheduled / Completed / Cancelled lifecycle
//!
//! Every operation validates its input with [`validation::Validator`], works
//! against the storage traits only, and returns `Result<T, DomainError>`.
//! Derived values (full name, pet count, age, cancellable flag) are computed
//! on read and never accepted from callers.

pub mod appointment_service;
pub mod commands;
pub mod errors;
pub mod models;
pub mod owner_service;
pub mod pet_service;
pub mod validation;

pub use appointment_service::AppointmentService;
pub use errors::{ConflictReason, DomainError, ValidationIssue};
pub use owner_service::OwnerService;
pub use pet_service::PetService;
