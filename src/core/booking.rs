use crate::models::{AvailabilitySlot, SessionType};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for slot and session-type writes.
///
/// These are reported synchronously and never mutate state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotValidationError {
    #[error("start time must be before end time")]
    StartNotBeforeEnd,

    #[error("maxBookings must be at least 1")]
    ZeroCapacity,

    #[error("unknown session type: {0}")]
    UnknownSessionType(String),

    #[error("session type name must not be empty")]
    EmptyName,

    #[error("session type already exists: {0}")]
    DuplicateName(String),
}

/// Outcome of a booking attempt. `SlotFull` is an expected,
/// recoverable outcome callers branch on, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingOutcome {
    Booked,
    SlotFull,
    SlotNotFound,
}

/// One mentor's recurring weekly availability and session-type
/// registry, with capacity accounting.
///
/// Referential integrity invariant: no slot ever references a session
/// type absent from the registry. Renames cascade, deletes are
/// two-phase (preview the affected count, then confirm the cascade).
#[derive(Debug, Clone, Default)]
pub struct AvailabilityBook {
    slots: Vec<AvailabilitySlot>,
    session_types: BTreeMap<String, SessionType>,
}

impl AvailabilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the registry with a mentor's session types.
    pub fn with_session_types(session_types: Vec<SessionType>) -> Self {
        Self {
            slots: Vec::new(),
            session_types: session_types
                .into_iter()
                .map(|st| (st.name.clone(), st))
                .collect(),
        }
    }

    /// Register a new session type label.
    pub fn add_session_type(&mut self, session_type: SessionType) -> Result<(), SlotValidationError> {
        if session_type.name.is_empty() {
            return Err(SlotValidationError::EmptyName);
        }
        if self.session_types.contains_key(&session_type.name) {
            return Err(SlotValidationError::DuplicateName(session_type.name));
        }
        self.session_types.insert(session_type.name.clone(), session_type);
        Ok(())
    }

    /// Append a new availability slot after validation.
    ///
    /// `currentBookings` always initializes to 0 regardless of input.
    pub fn add_slot(
        &mut self,
        day_of_week: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        session_type: &str,
        max_bookings: u32,
    ) -> Result<Uuid, SlotValidationError> {
        if start_time >= end_time {
            return Err(SlotValidationError::StartNotBeforeEnd);
        }
        if max_bookings < 1 {
            return Err(SlotValidationError::ZeroCapacity);
        }
        if !self.session_types.contains_key(session_type) {
            return Err(SlotValidationError::UnknownSessionType(session_type.to_string()));
        }

        let id = Uuid::new_v4();
        let duration_minutes = (end_time - start_time).num_minutes() as u32;

        self.slots.push(AvailabilitySlot {
            id,
            day_of_week,
            start_time,
            end_time,
            duration_minutes,
            session_type: session_type.to_string(),
            max_bookings,
            current_bookings: 0,
        });

        Ok(id)
    }

    /// Delete a slot unconditionally. Returns false if the id is
    /// unknown. Confirmation happens in the presentation layer.
    pub fn remove_slot(&mut self, id: Uuid) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.id != id);
        self.slots.len() < before
    }

    /// Try to claim one booking against a slot.
    pub fn attempt_booking(&mut self, slot_id: Uuid) -> BookingOutcome {
        match self.slots.iter_mut().find(|s| s.id == slot_id) {
            Some(slot) if slot.is_full() => BookingOutcome::SlotFull,
            Some(slot) => {
                slot.current_bookings += 1;
                BookingOutcome::Booked
            }
            None => BookingOutcome::SlotNotFound,
        }
    }

    /// Release one booking (cancellation, or rollback after the
    /// external persistence call reports a conflict).
    pub fn cancel_booking(&mut self, slot_id: Uuid) -> BookingOutcome {
        match self.slots.iter_mut().find(|s| s.id == slot_id) {
            Some(slot) => {
                slot.current_bookings = slot.current_bookings.saturating_sub(1);
                BookingOutcome::Booked
            }
            None => BookingOutcome::SlotNotFound,
        }
    }

    /// Atomically rename a session type and cascade the rename into
    /// every slot tagged with the old name. Returns the number of
    /// slots updated.
    pub fn rename_session_type(&mut self, old: &str, new: &str) -> Result<usize, SlotValidationError> {
        if new.is_empty() {
            return Err(SlotValidationError::EmptyName);
        }
        if old != new && self.session_types.contains_key(new) {
            return Err(SlotValidationError::DuplicateName(new.to_string()));
        }

        let mut session_type = self
            .session_types
            .remove(old)
            .ok_or_else(|| SlotValidationError::UnknownSessionType(old.to_string()))?;
        session_type.name = new.to_string();
        self.session_types.insert(new.to_string(), session_type);

        let mut updated = 0;
        for slot in self.slots.iter_mut().filter(|s| s.session_type == old) {
            slot.session_type = new.to_string();
            updated += 1;
        }

        Ok(updated)
    }

    /// Phase one of a session-type delete: how many slots the cascade
    /// would remove.
    pub fn preview_delete_session_type(&self, name: &str) -> Result<usize, SlotValidationError> {
        if !self.session_types.contains_key(name) {
            return Err(SlotValidationError::UnknownSessionType(name.to_string()));
        }
        Ok(self.slots.iter().filter(|s| s.session_type == name).count())
    }

    /// Phase two: delete the session type and cascade-delete every
    /// slot that references it. Returns the number of slots removed.
    pub fn confirm_delete_session_type(&mut self, name: &str) -> Result<usize, SlotValidationError> {
        if self.session_types.remove(name).is_none() {
            return Err(SlotValidationError::UnknownSessionType(name.to_string()));
        }
        let before = self.slots.len();
        self.slots.retain(|s| s.session_type != name);
        Ok(before - self.slots.len())
    }

    /// Sum of maxBookings across all slots. Recomputed on demand since
    /// slots mutate independently.
    pub fn total_capacity(&self) -> u32 {
        self.slots.iter().map(|s| s.max_bookings).sum()
    }

    /// Sum of currentBookings across all slots.
    pub fn total_booked(&self) -> u32 {
        self.slots.iter().map(|s| s.current_bookings).sum()
    }

    pub fn total_available(&self) -> u32 {
        self.total_capacity() - self.total_booked()
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    pub fn slot(&self, id: Uuid) -> Option<&AvailabilitySlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn session_types(&self) -> impl Iterator<Item = &SessionType> {
        self.session_types.values()
    }
}
