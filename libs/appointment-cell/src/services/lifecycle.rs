// libs/appointment-cell/src/services/lifecycle.rs
use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::models::{AppointmentStatus, BookingError};

pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), BookingError> {
        debug!("Validating status transition {} -> {}", current_status, new_status);

        let valid_transitions = self.valid_transitions(current_status);

        if !valid_transitions.contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(BookingError::IllegalTransition(current_status));
        }

        Ok(())
    }

    /// All valid next statuses for a given current status. `Cancelled` is
    /// terminal and has no outgoing edges.
    pub fn valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Unconfirmed => vec![
                AppointmentStatus::Scheduled,
                AppointmentStatus::Rescheduled,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Rescheduled,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Rescheduled => vec![AppointmentStatus::Cancelled],
            AppointmentStatus::Cancelled => vec![],
        }
    }

    /// Whether an unconfirmed appointment's slot time has already passed.
    ///
    /// The upstream product never settled a no-show policy, so nothing is
    /// cancelled automatically; callers surface flagged appointments for a
    /// human or an external rule to act on.
    pub fn should_flag_unconfirmed(
        &self,
        status: AppointmentStatus,
        day: u8,
        time: NaiveTime,
        current_day: u8,
        current_time: NaiveTime,
    ) -> bool {
        if status != AppointmentStatus::Unconfirmed {
            return false;
        }

        (day, time) < (current_day, current_time)
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
