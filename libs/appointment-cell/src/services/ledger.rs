// libs/appointment-cell/src/services/ledger.rs
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{NaiveTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use provider_cell::models::SlotStatus;
use provider_cell::services::availability::AvailabilityCalendar;

use crate::models::{Appointment, AppointmentSearchQuery, AppointmentStatus, BookingError, SessionType};
use crate::services::lifecycle::AppointmentLifecycleService;

/// Owned, in-memory record of every appointment and its status transitions.
/// Slot release/reserve during transitions is delegated to the availability
/// calendar; the ledger's write lock makes each transition one logical
/// operation with respect to other ledger calls.
pub struct AppointmentLedger {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
    calendar: Arc<AvailabilityCalendar>,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentLedger {
    pub fn new(calendar: Arc<AvailabilityCalendar>) -> Self {
        Self {
            appointments: RwLock::new(HashMap::new()),
            calendar,
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    /// Record an appointment against a slot the coordinator has already
    /// reserved. The slot must be `Reserved` and belong to `provider_id`,
    /// otherwise the call fails with `SlotMismatch`.
    pub fn create(
        &self,
        provider_id: Uuid,
        day: u8,
        time: NaiveTime,
        consumer_id: &str,
        specialty: &str,
        session_type: SessionType,
    ) -> Result<Appointment, BookingError> {
        match self.calendar.status_of(provider_id, day, time) {
            Some(SlotStatus::Reserved) => {}
            _ => return Err(BookingError::SlotMismatch),
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id,
            consumer_id: consumer_id.to_string(),
            day,
            time,
            specialty: specialty.to_string(),
            session_type,
            status: AppointmentStatus::Unconfirmed,
            created_at: now,
            updated_at: now,
        };

        let mut appointments = self.appointments.write().expect("ledger lock poisoned");
        appointments.insert(appointment.id, appointment.clone());

        debug!("Appointment {} recorded as unconfirmed", appointment.id);
        Ok(appointment)
    }

    pub fn get(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        let appointments = self.appointments.read().expect("ledger lock poisoned");
        appointments
            .get(&appointment_id)
            .cloned()
            .ok_or(BookingError::AppointmentNotFound)
    }

    /// Apply a status transition validated against the lifecycle table.
    ///
    /// `Rescheduled` carries a replacement slot and must go through
    /// [`AppointmentLedger::reschedule`]; a cancellation releases the held
    /// slot back to `Open` before the record flips to its terminal status.
    pub fn transition(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        if new_status == AppointmentStatus::Rescheduled {
            return Err(BookingError::InvalidState(
                "a reschedule carries a replacement slot; call reschedule instead".to_string(),
            ));
        }

        let mut appointments = self.appointments.write().expect("ledger lock poisoned");
        let appointment = appointments
            .get_mut(&appointment_id)
            .ok_or(BookingError::AppointmentNotFound)?;

        self.lifecycle
            .validate_status_transition(appointment.status, new_status)?;

        if new_status == AppointmentStatus::Cancelled {
            self.calendar
                .release(appointment.provider_id, appointment.day, appointment.time)?;
        }

        appointment.status = new_status;
        appointment.updated_at = Utc::now();

        info!("Appointment {} transitioned to {}", appointment_id, new_status);
        Ok(appointment.clone())
    }

    /// Convenience wrapper: transition to `Cancelled` and release the slot.
    pub fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled)
    }

    /// Move an appointment onto a new slot. The new slot is reserved FIRST and
    /// the old one released after, so a failed reserve never leaves the
    /// consumer without a held slot.
    pub fn reschedule(
        &self,
        appointment_id: Uuid,
        new_day: u8,
        new_time: NaiveTime,
    ) -> Result<Appointment, BookingError> {
        let mut appointments = self.appointments.write().expect("ledger lock poisoned");
        let appointment = appointments
            .get_mut(&appointment_id)
            .ok_or(BookingError::AppointmentNotFound)?;

        self.lifecycle
            .validate_status_transition(appointment.status, AppointmentStatus::Rescheduled)?;

        self.calendar
            .reserve(appointment.provider_id, new_day, new_time)?;

        if let Err(release_err) =
            self.calendar
                .release(appointment.provider_id, appointment.day, appointment.time)
        {
            // Compensate: give the new slot back before surfacing the fault.
            warn!(
                "Releasing old slot for appointment {} failed, rolling back new reservation",
                appointment_id
            );
            if let Err(rollback_err) =
                self.calendar
                    .release(appointment.provider_id, new_day, new_time)
            {
                warn!("Rollback release also failed: {}", rollback_err);
            }
            return Err(release_err.into());
        }

        appointment.day = new_day;
        appointment.time = new_time;
        appointment.status = AppointmentStatus::Rescheduled;
        appointment.updated_at = Utc::now();

        info!(
            "Appointment {} rescheduled to day {} at {}",
            appointment_id, new_day, new_time
        );
        Ok(appointment.clone())
    }

    /// All appointments for a consumer, ordered by (day, time) ascending.
    pub fn list_for_consumer(&self, consumer_id: &str) -> Vec<Appointment> {
        self.search(&AppointmentSearchQuery {
            consumer_id: Some(consumer_id.to_string()),
            provider_id: None,
            status: None,
        })
    }

    /// All appointments for a provider, ordered by (day, time) ascending.
    pub fn list_for_provider(&self, provider_id: Uuid) -> Vec<Appointment> {
        self.search(&AppointmentSearchQuery {
            consumer_id: None,
            provider_id: Some(provider_id),
            status: None,
        })
    }

    pub fn search(&self, query: &AppointmentSearchQuery) -> Vec<Appointment> {
        let appointments = self.appointments.read().expect("ledger lock poisoned");

        let mut matches: Vec<Appointment> = appointments
            .values()
            .filter(|apt| {
                query
                    .consumer_id
                    .as_ref()
                    .is_none_or(|c| apt.consumer_id == *c)
                    && query.provider_id.is_none_or(|p| apt.provider_id == p)
                    && query.status.is_none_or(|s| apt.status == s)
            })
            .cloned()
            .collect();

        matches.sort_by_key(|apt| (apt.day, apt.time));
        matches
    }

    /// Unconfirmed appointments whose slot time has passed. Reported, never
    /// auto-cancelled; the no-show policy belongs to the caller.
    pub fn flagged_unconfirmed(&self, current_day: u8, current_time: NaiveTime) -> Vec<Appointment> {
        let appointments = self.appointments.read().expect("ledger lock poisoned");

        let mut flagged: Vec<Appointment> = appointments
            .values()
            .filter(|apt| {
                self.lifecycle.should_flag_unconfirmed(
                    apt.status,
                    apt.day,
                    apt.time,
                    current_day,
                    current_time,
                )
            })
            .cloned()
            .collect();

        flagged.sort_by_key(|apt| (apt.day, apt.time));
        flagged
    }
}
