//! # Storage Module
//!
//! Persistence for owners, pets and appointments.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! repositories in [`sqlite`] implement them over a single pooled
//! connection.
//!
//! ## Integrity
//!
//! - Foreign keys are enforced with `ON DELETE RESTRICT`, never cascade
//! - Removing a parent counts its children and deletes inside one transaction
//! - Appointment updates are compare-and-set on the previously read status
//! - Derived columns (pet count, owner and pet names) are computed in SQL on
//!   every read, never stored

pub mod connection;
pub mod error;
pub mod sqlite;
pub mod traits;

pub use connection::DbConnection;
pub use error::StorageError;
pub use sqlite::{AppointmentRepository, OwnerRepository, PetRepository};
pub use traits::{AppointmentStorage, OwnerStorage, PetStorage, StorageResult};
