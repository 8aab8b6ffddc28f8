//! # User-facing notices
//!
//! Turns API outcomes into the short banner messages shown above each list.
//! A failed call only tells the user *what kind* of failure happened
//! (bad input, missing record, blocked by dependents, or anything else);
//! server-side detail never reaches the banner.

use std::time::{Duration, Instant};

use crate::{AppointmentStatus, ErrorKind, Species};

/// How long a banner stays visible
pub const DEFAULT_FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// The record type a page manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Owner,
    Pet,
    Appointment,
}

/// The request a page issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    Delete,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    /// Confirmation for a successful mutation. Loading a list is silent.
    pub fn success(entity: Entity, action: Action, locale: Locale) -> Option<Self> {
        let text = match (locale, entity, action) {
            (_, _, Action::Load) => return None,
            (Locale::Es, Entity::Owner, Action::Create) => "Propietario creado",
            (Locale::Es, Entity::Owner, Action::Update) => "Propietario actualizado",
            (Locale::Es, Entity::Owner, _) => "Propietario eliminado",
            (Locale::Es, Entity::Pet, Action::Create) => "Mascota creada",
            (Locale::Es, Entity::Pet, Action::Update) => "Mascota actualizada",
            (Locale::Es, Entity::Pet, _) => "Mascota eliminada",
            (Locale::Es, Entity::Appointment, Action::Create) => "Cita creada",
            (Locale::Es, Entity::Appointment, Action::Update) => "Cita actualizada",
            (Locale::Es, Entity::Appointment, Action::Cancel) => "Cita cancelada",
            (Locale::Es, Entity::Appointment, _) => "Cita eliminada",
            (Locale::En, Entity::Owner, Action::Create) => "Owner created",
            (Locale::En, Entity::Owner, Action::Update) => "Owner updated",
            (Locale::En, Entity::Owner, _) => "Owner deleted",
            (Locale::En, Entity::Pet, Action::Create) => "Pet created",
            (Locale::En, Entity::Pet, Action::Update) => "Pet updated",
            (Locale::En, Entity::Pet, _) => "Pet deleted",
            (Locale::En, Entity::Appointment, Action::Create) => "Appointment created",
            (Locale::En, Entity::Appointment, Action::Update) => "Appointment updated",
            (Locale::En, Entity::Appointment, Action::Cancel) => "Appointment cancelled",
            (Locale::En, Entity::Appointment, _) => "Appointment deleted",
        };

        Some(Self {
            level: NoticeLevel::Success,
            text: text.to_string(),
        })
    }

    /// Message for a failed request, keyed on the failure category only
    pub fn failure(entity: Entity, action: Action, kind: ErrorKind, locale: Locale) -> Self {
        let headline = failure_headline(entity, action, locale);
        let hint = match kind {
            ErrorKind::Validation => Some(match locale {
                Locale::Es => "Revisa los datos del formulario.",
                Locale::En => "Please review the form.",
            }),
            ErrorKind::NotFound => Some(match locale {
                Locale::Es => "El registro ya no existe.",
                Locale::En => "The record no longer exists.",
            }),
            ErrorKind::Conflict => Some(conflict_hint(entity, action, locale)),
            ErrorKind::Transport => None,
        };

        let text = match hint {
            Some(hint) => format!("{}. {}", headline, hint),
            None => headline.to_string(),
        };

        Self {
            level: NoticeLevel::Error,
            text,
        }
    }
}

fn failure_headline(entity: Entity, action: Action, locale: Locale) -> &'static str {
    match (locale, action, entity) {
        (Locale::Es, Action::Load, Entity::Owner) => "Error al cargar propietarios",
        (Locale::Es, Action::Load, Entity::Pet) => "Error al cargar mascotas",
        (Locale::Es, Action::Load, Entity::Appointment) => "Error al cargar citas",
        (Locale::Es, Action::Create | Action::Update, Entity::Owner) => "Error al guardar propietario",
        (Locale::Es, Action::Create | Action::Update, Entity::Pet) => "Error al guardar mascota",
        (Locale::Es, Action::Create | Action::Update, Entity::Appointment) => "Error al guardar cita",
        (Locale::Es, Action::Cancel, _) => "Error al cancelar cita",
        (Locale::Es, Action::Delete, Entity::Appointment) => "Error al eliminar cita",
        (Locale::Es, Action::Delete, _) => "Error al eliminar",
        (Locale::En, Action::Load, Entity::Owner) => "Could not load owners",
        (Locale::En, Action::Load, Entity::Pet) => "Could not load pets",
        (Locale::En, Action::Load, Entity::Appointment) => "Could not load appointments",
        (Locale::En, Action::Create | Action::Update, Entity::Owner) => "Could not save owner",
        (Locale::En, Action::Create | Action::Update, Entity::Pet) => "Could not save pet",
        (Locale::En, Action::Create | Action::Update, Entity::Appointment) => "Could not save appointment",
        (Locale::En, Action::Cancel, _) => "Could not cancel appointment",
        (Locale::En, Action::Delete, Entity::Appointment) => "Could not delete appointment",
        (Locale::En, Action::Delete, _) => "Could not delete",
    }
}

fn conflict_hint(entity: Entity, action: Action, locale: Locale) -> &'static str {
    match (locale, entity, action) {
        (Locale::Es, Entity::Owner, Action::Delete) => "Puede tener mascotas asociadas.",
        (Locale::Es, Entity::Pet, Action::Delete) => "Puede tener citas asociadas.",
        (Locale::Es, Entity::Appointment, _) => "La cita ya está finalizada.",
        (Locale::Es, _, _) => "La operación entra en conflicto con otros registros.",
        (Locale::En, Entity::Owner, Action::Delete) => "The owner may still have pets.",
        (Locale::En, Entity::Pet, Action::Delete) => "The pet may still have appointments.",
        (Locale::En, Entity::Appointment, _) => "The appointment is already closed.",
        (Locale::En, _, _) => "The operation conflicts with other records.",
    }
}

/// Display label for an appointment status
pub fn status_label(status: AppointmentStatus, locale: Locale) -> &'static str {
    match (locale, status) {
        (Locale::Es, AppointmentStatus::Scheduled) => "Programada",
        (Locale::Es, AppointmentStatus::Completed) => "Completada",
        (Locale::Es, AppointmentStatus::Cancelled) => "Cancelada",
        (Locale::En, status) => status.as_str(),
    }
}

/// Display label for a species.
///
/// Records always carry the English label (`Dog`). Clients that key icons or
/// lookups on the Spanish names (`Perro`) should map through the `Es` label
/// here; parsing that label back yields the same species.
pub fn species_label(species: Species, locale: Locale) -> &'static str {
    match locale {
        Locale::Es => species.spanish_label(),
        Locale::En => species.as_str(),
    }
}

/// A notice that disappears on its own after a fixed time
#[derive(Debug, Clone)]
pub struct FlashMessage {
    notice: Notice,
    expires_at: Instant,
}

impl FlashMessage {
    pub fn new(notice: Notice, now: Instant) -> Self {
        Self::with_duration(notice, now, DEFAULT_FLASH_DURATION)
    }

    pub fn with_duration(notice: Notice, now: Instant, duration: Duration) -> Self {
        Self {
            notice,
            expires_at: now + duration,
        }
    }

    /// The notice, as long as it has not expired
    pub fn visible_at(&self, now: Instant) -> Option<&Notice> {
        if self.is_expired(now) {
            None
        } else {
            Some(&self.notice)
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Time left before the banner hides; zero once expired
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
