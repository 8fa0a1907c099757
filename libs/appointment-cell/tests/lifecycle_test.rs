use assert_matches::assert_matches;
use chrono::NaiveTime;

use appointment_cell::models::AppointmentStatus::{
    self, Cancelled, Rescheduled, Scheduled, Unconfirmed,
};
use appointment_cell::models::BookingError;
use appointment_cell::services::lifecycle::AppointmentLifecycleService;

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[test]
fn allowed_edges_match_the_transition_table() {
    let lifecycle = AppointmentLifecycleService::new();

    let allowed = [
        (Unconfirmed, Scheduled),
        (Unconfirmed, Rescheduled),
        (Unconfirmed, Cancelled),
        (Scheduled, Rescheduled),
        (Scheduled, Cancelled),
        (Rescheduled, Cancelled),
    ];

    for (from, to) in allowed {
        assert!(
            lifecycle.validate_status_transition(from, to).is_ok(),
            "{from} -> {to} should be allowed"
        );
    }
}

#[test]
fn unlisted_edges_are_illegal() {
    let lifecycle = AppointmentLifecycleService::new();

    let illegal = [
        (Scheduled, Unconfirmed),
        (Scheduled, Scheduled),
        (Rescheduled, Scheduled),
        (Rescheduled, Unconfirmed),
        (Rescheduled, Rescheduled),
        (Unconfirmed, Unconfirmed),
    ];

    for (from, to) in illegal {
        assert_matches!(
            lifecycle.validate_status_transition(from, to),
            Err(BookingError::IllegalTransition(_)),
            "{from} -> {to} should be illegal"
        );
    }
}

#[test]
fn cancelled_is_terminal_with_zero_outgoing_edges() {
    let lifecycle = AppointmentLifecycleService::new();

    assert!(lifecycle.valid_transitions(Cancelled).is_empty());

    for to in [Unconfirmed, Scheduled, Rescheduled, Cancelled] {
        assert_matches!(
            lifecycle.validate_status_transition(Cancelled, to),
            Err(BookingError::IllegalTransition(Cancelled))
        );
    }
}

#[test]
fn past_due_unconfirmed_appointments_are_flagged_not_cancelled() {
    let lifecycle = AppointmentLifecycleService::new();

    // Slot time already passed today.
    assert!(lifecycle.should_flag_unconfirmed(Unconfirmed, 16, t(10, 0), 16, t(12, 0)));
    // Earlier day this month.
    assert!(lifecycle.should_flag_unconfirmed(Unconfirmed, 15, t(10, 0), 16, t(9, 0)));

    // Still in the future.
    assert!(!lifecycle.should_flag_unconfirmed(Unconfirmed, 16, t(10, 0), 16, t(9, 0)));
    // Confirmed appointments are not the flag's business.
    assert!(!lifecycle.should_flag_unconfirmed(Scheduled, 15, t(10, 0), 16, t(9, 0)));
}
