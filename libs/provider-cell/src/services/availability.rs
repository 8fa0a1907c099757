// libs/provider-cell/src/services/availability.rs
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock};

use chrono::NaiveTime;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{AvailabilitySlot, CalendarError, SlotStatus};

const STATE_OPEN: u8 = 0;
const STATE_RESERVED: u8 = 1;

/// One configured (day, time) opportunity. Reservation state is a single
/// atomic so concurrent `reserve` calls on the same slot resolve without any
/// lock held across the check-and-set.
struct SlotCell {
    provider_id: Uuid,
    day: u8,
    time: NaiveTime,
    state: AtomicU8,
}

impl SlotCell {
    fn snapshot(&self) -> AvailabilitySlot {
        let status = match self.state.load(Ordering::Acquire) {
            STATE_OPEN => SlotStatus::Open,
            _ => SlotStatus::Reserved,
        };
        AvailabilitySlot {
            provider_id: self.provider_id,
            day: self.day,
            time: self.time,
            status,
        }
    }
}

/// Per-provider availability calendar.
///
/// The outer map lock only guards slot definition and lookup; reserve/release
/// operate on the per-slot atomic, so operations on distinct slots proceed
/// independently and exactly one concurrent reserve on a slot can win.
pub struct AvailabilityCalendar {
    slots: RwLock<HashMap<Uuid, BTreeMap<(u8, NaiveTime), Arc<SlotCell>>>>,
}

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Define a new open slot. Duplicate (day, time) pairs for a provider are
    /// rejected; days outside 1-31 are invalid.
    pub fn define_slot(
        &self,
        provider_id: Uuid,
        day: u8,
        time: NaiveTime,
    ) -> Result<AvailabilitySlot, CalendarError> {
        if !(1..=31).contains(&day) {
            return Err(CalendarError::InvalidDay(day));
        }

        let mut slots = self.slots.write().expect("calendar lock poisoned");
        let provider_slots = slots.entry(provider_id).or_default();

        if provider_slots.contains_key(&(day, time)) {
            return Err(CalendarError::DuplicateSlot { day, time });
        }

        let cell = Arc::new(SlotCell {
            provider_id,
            day,
            time,
            state: AtomicU8::new(STATE_OPEN),
        });
        let snapshot = cell.snapshot();
        provider_slots.insert((day, time), cell);

        debug!("Defined slot for provider {} on day {} at {}", provider_id, day, time);
        Ok(snapshot)
    }

    /// All slots for a provider on a given day, ordered by time ascending.
    /// A day with no configured slots is valid and yields an empty vec.
    pub fn slots_for(&self, provider_id: Uuid, day: u8) -> Vec<AvailabilitySlot> {
        let slots = self.slots.read().expect("calendar lock poisoned");
        let Some(provider_slots) = slots.get(&provider_id) else {
            return Vec::new();
        };

        provider_slots
            .range((day, NaiveTime::MIN)..)
            .take_while(|((d, _), _)| *d == day)
            .map(|(_, cell)| cell.snapshot())
            .collect()
    }

    pub fn is_open(&self, provider_id: Uuid, day: u8, time: NaiveTime) -> bool {
        matches!(
            self.status_of(provider_id, day, time),
            Some(SlotStatus::Open)
        )
    }

    /// Current state of a configured slot, `None` when the slot was never
    /// defined. There is no "fully booked" vs "never configured" distinction
    /// here; that is a presentation concern.
    pub fn status_of(&self, provider_id: Uuid, day: u8, time: NaiveTime) -> Option<SlotStatus> {
        let slots = self.slots.read().expect("calendar lock poisoned");
        slots
            .get(&provider_id)
            .and_then(|m| m.get(&(day, time)))
            .map(|cell| cell.snapshot().status)
    }

    /// Atomically flip a slot `Open -> Reserved`. At most one of any number of
    /// concurrent callers succeeds; everyone else observes `SlotUnavailable`.
    /// A missing slot is also `SlotUnavailable`.
    pub fn reserve(
        &self,
        provider_id: Uuid,
        day: u8,
        time: NaiveTime,
    ) -> Result<AvailabilitySlot, CalendarError> {
        let cell = self.cell(provider_id, day, time)?;

        cell.state
            .compare_exchange(STATE_OPEN, STATE_RESERVED, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                debug!(
                    "Reserve lost on provider {} day {} at {}: slot already reserved",
                    provider_id, day, time
                );
                CalendarError::SlotUnavailable
            })?;

        debug!("Reserved slot for provider {} on day {} at {}", provider_id, day, time);
        Ok(cell.snapshot())
    }

    /// Flip a slot `Reserved -> Open`. Releasing an already-open slot is a
    /// programming error and is surfaced, not ignored.
    pub fn release(
        &self,
        provider_id: Uuid,
        day: u8,
        time: NaiveTime,
    ) -> Result<AvailabilitySlot, CalendarError> {
        let cell = self.cell(provider_id, day, time)?;

        cell.state
            .compare_exchange(STATE_RESERVED, STATE_OPEN, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!(
                    "Double release on provider {} day {} at {}",
                    provider_id, day, time
                );
                CalendarError::InvalidState(format!(
                    "slot on day {} at {} is not reserved",
                    day, time
                ))
            })?;

        debug!("Released slot for provider {} on day {} at {}", provider_id, day, time);
        Ok(cell.snapshot())
    }

    fn cell(
        &self,
        provider_id: Uuid,
        day: u8,
        time: NaiveTime,
    ) -> Result<Arc<SlotCell>, CalendarError> {
        let slots = self.slots.read().expect("calendar lock poisoned");
        slots
            .get(&provider_id)
            .and_then(|m| m.get(&(day, time)))
            .cloned()
            .ok_or(CalendarError::SlotUnavailable)
    }
}

impl Default for AvailabilityCalendar {
    fn default() -> Self {
        Self::new()
    }
}
