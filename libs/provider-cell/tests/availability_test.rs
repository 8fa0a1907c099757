use std::sync::Arc;
use std::thread;

use assert_matches::assert_matches;
use chrono::NaiveTime;
use uuid::Uuid;

use provider_cell::models::{CalendarError, SlotStatus};
use provider_cell::services::availability::AvailabilityCalendar;

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[test]
fn defined_slot_starts_open() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();

    let slot = calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");

    assert_eq!(slot.status, SlotStatus::Open);
    assert!(calendar.is_open(provider_id, 16, t(10, 0)));
}

#[test]
fn duplicate_slot_definition_is_rejected() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();

    calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");
    let err = calendar.define_slot(provider_id, 16, t(10, 0)).unwrap_err();

    assert_matches!(err, CalendarError::DuplicateSlot { day: 16, .. });
}

#[test]
fn day_outside_calendar_range_is_rejected() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();

    assert_matches!(
        calendar.define_slot(provider_id, 0, t(9, 0)),
        Err(CalendarError::InvalidDay(0))
    );
    assert_matches!(
        calendar.define_slot(provider_id, 32, t(9, 0)),
        Err(CalendarError::InvalidDay(32))
    );
}

#[test]
fn slots_for_orders_by_time_ascending() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();

    calendar.define_slot(provider_id, 16, t(14, 0)).expect("define");
    calendar.define_slot(provider_id, 16, t(9, 30)).expect("define");
    calendar.define_slot(provider_id, 16, t(11, 0)).expect("define");
    // Another day must not leak into the listing.
    calendar.define_slot(provider_id, 17, t(8, 0)).expect("define");

    let slots = calendar.slots_for(provider_id, 16);
    let times: Vec<NaiveTime> = slots.iter().map(|s| s.time).collect();

    assert_eq!(times, vec![t(9, 30), t(11, 0), t(14, 0)]);
}

#[test]
fn unconfigured_day_yields_empty_sequence() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();

    assert!(calendar.slots_for(provider_id, 21).is_empty());

    calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");
    assert!(calendar.slots_for(provider_id, 21).is_empty());
}

#[test]
fn reserve_flips_open_to_reserved_and_blocks_second_reserve() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();
    calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");

    let reserved = calendar.reserve(provider_id, 16, t(10, 0)).expect("reserve");
    assert_eq!(reserved.status, SlotStatus::Reserved);
    assert!(!calendar.is_open(provider_id, 16, t(10, 0)));

    assert_matches!(
        calendar.reserve(provider_id, 16, t(10, 0)),
        Err(CalendarError::SlotUnavailable)
    );
}

#[test]
fn reserve_of_unknown_slot_is_unavailable() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();

    assert_matches!(
        calendar.reserve(provider_id, 16, t(10, 0)),
        Err(CalendarError::SlotUnavailable)
    );
}

#[test]
fn release_restores_the_same_slot_attributes() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();
    calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");

    let reserved = calendar.reserve(provider_id, 16, t(10, 0)).expect("reserve");
    let released = calendar.release(provider_id, 16, t(10, 0)).expect("release");

    assert_eq!(released.status, SlotStatus::Open);
    assert_eq!(released.provider_id, reserved.provider_id);
    assert_eq!(released.day, reserved.day);
    assert_eq!(released.time, reserved.time);

    // The slot is bookable again after release.
    assert!(calendar.reserve(provider_id, 16, t(10, 0)).is_ok());
}

#[test]
fn double_release_is_surfaced_as_invalid_state() {
    let calendar = AvailabilityCalendar::new();
    let provider_id = Uuid::new_v4();
    calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");

    calendar.reserve(provider_id, 16, t(10, 0)).expect("reserve");
    calendar.release(provider_id, 16, t(10, 0)).expect("release");

    assert_matches!(
        calendar.release(provider_id, 16, t(10, 0)),
        Err(CalendarError::InvalidState(_))
    );
}

#[test]
fn exactly_one_of_many_concurrent_reserves_wins() {
    let calendar = Arc::new(AvailabilityCalendar::new());
    let provider_id = Uuid::new_v4();
    calendar.define_slot(provider_id, 16, t(10, 0)).expect("define");

    let mut handles = Vec::new();
    for _ in 0..16 {
        let calendar = Arc::clone(&calendar);
        handles.push(thread::spawn(move || {
            match calendar.reserve(provider_id, 16, t(10, 0)) {
                Ok(_) => true,
                Err(CalendarError::SlotUnavailable) => false,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }));
    }

    let wins = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .filter(|won| *won)
        .count();

    assert_eq!(wins, 1);
    assert!(!calendar.is_open(provider_id, 16, t(10, 0)));
}

#[test]
fn reservations_on_distinct_slots_proceed_independently() {
    let calendar = Arc::new(AvailabilityCalendar::new());
    let provider_id = Uuid::new_v4();
    for minute in [0u32, 15, 30, 45] {
        calendar.define_slot(provider_id, 16, t(10, minute)).expect("define");
    }

    let mut handles = Vec::new();
    for minute in [0u32, 15, 30, 45] {
        let calendar = Arc::clone(&calendar);
        handles.push(thread::spawn(move || {
            calendar.reserve(provider_id, 16, t(10, minute)).is_ok()
        }));
    }

    let wins = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .filter(|won| *won)
        .count();

    assert_eq!(wins, 4);
}
