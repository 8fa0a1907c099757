// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use provider_cell::services::availability::AvailabilityCalendar;
use provider_cell::services::directory::ProviderDirectory;

use crate::models::{Appointment, BookAppointmentRequest, BookingError, RescheduleAppointmentRequest};
use crate::services::ledger::AppointmentLedger;

/// Orchestrates a booking end to end: provider resolution, specialty
/// validation, slot reservation, ledger write. The reserve is the only point
/// of mutual exclusion; everything after it either completes or compensates
/// by releasing the slot, so callers never observe a half-booked state.
pub struct BookingService {
    directory: Arc<ProviderDirectory>,
    calendar: Arc<AvailabilityCalendar>,
    ledger: Arc<AppointmentLedger>,
}

impl BookingService {
    pub fn new(
        directory: Arc<ProviderDirectory>,
        calendar: Arc<AvailabilityCalendar>,
        ledger: Arc<AppointmentLedger>,
    ) -> Self {
        Self {
            directory,
            calendar,
            ledger,
        }
    }

    pub fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, BookingError> {
        info!(
            "Booking consumer {} with provider {} on day {} at {}",
            request.consumer_id, request.provider_id, request.day, request.time
        );

        let provider = self
            .directory
            .get(request.provider_id)
            .ok_or(BookingError::ProviderNotFound)?;

        if !provider.offers_specialty(&request.specialty) {
            return Err(BookingError::SpecialtyNotOffered {
                specialty: request.specialty,
            });
        }

        self.calendar
            .reserve(request.provider_id, request.day, request.time)?;

        let appointment = match self.ledger.create(
            request.provider_id,
            request.day,
            request.time,
            &request.consumer_id,
            &request.specialty,
            request.session_type,
        ) {
            Ok(appointment) => appointment,
            Err(create_err) => {
                // Compensating release so a failed write leaves the slot open.
                if let Err(release_err) =
                    self.calendar
                        .release(request.provider_id, request.day, request.time)
                {
                    warn!("Compensating release failed: {}", release_err);
                }
                return Err(create_err);
            }
        };

        info!(
            "Appointment {} booked with provider {}",
            appointment.id, request.provider_id
        );
        Ok(appointment)
    }

    pub fn reschedule(
        &self,
        appointment_id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        info!(
            "Rescheduling appointment {} to day {} at {}",
            appointment_id, request.new_day, request.new_time
        );

        self.ledger
            .reschedule(appointment_id, request.new_day, request.new_time)
    }

    pub fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        info!("Cancelling appointment {}", appointment_id);

        self.ledger.cancel(appointment_id)
    }
}
