use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Which side of the mentorship a profile is on.
///
/// Discovery always browses the opposite role: a mentee browses
/// mentors and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    /// The role this role browses during discovery.
    pub fn opposite(&self) -> Role {
        match self {
            Role::Mentor => Role::Mentee,
            Role::Mentee => Role::Mentor,
        }
    }
}

/// A mentor or mentee profile eligible for discovery.
///
/// Candidates are sourced from the backend and immutable from the
/// engine's point of view; the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub bio: String,
    pub role: Role,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(rename = "experienceBand", default)]
    pub experience: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "availabilityBand", default)]
    pub availability: String,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool { true }

impl Candidate {
    /// Fields covered by free-text search.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [&self.name, &self.title, &self.company, &self.bio]
    }
}

/// One filterable dimension of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Industry,
    Expertise,
    Availability,
    Experience,
}

/// The viewer's current facet selections and search query.
///
/// An empty set for a facet means "no constraint on that facet", not
/// "exclude all". BTreeSet keeps iteration order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(rename = "selectedIndustries", default)]
    pub selected_industries: BTreeSet<String>,
    #[serde(rename = "selectedExpertise", default)]
    pub selected_expertise: BTreeSet<String>,
    #[serde(rename = "selectedAvailability", default)]
    pub selected_availability: BTreeSet<String>,
    #[serde(rename = "selectedExperience", default)]
    pub selected_experience: BTreeSet<String>,
    #[serde(rename = "searchQuery", default)]
    pub search_query: String,
}

/// Relationship status between a viewer and a candidate.
///
/// The absence of a record is the `None` state; it is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Connected,
    Declined,
}

/// Whether the optimistic local write has been confirmed externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryState {
    Unconfirmed,
    Confirmed,
    Failed,
}

/// A connection-request record for one (viewer, candidate) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(rename = "viewerId")]
    pub viewer_id: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub status: ConnectionStatus,
    #[serde(rename = "requestedAt")]
    pub requested_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "respondedAt", default)]
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub message: Option<String>,
    pub delivery: DeliveryState,
}

/// A recurring weekly availability window with finite booking capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: chrono::Weekday,
    #[serde(rename = "startTime")]
    pub start_time: chrono::NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: chrono::NaiveTime,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    #[serde(rename = "sessionType")]
    pub session_type: String,
    #[serde(rename = "maxBookings")]
    pub max_bookings: u32,
    #[serde(rename = "currentBookings")]
    pub current_bookings: u32,
}

impl AvailabilitySlot {
    pub fn is_full(&self) -> bool {
        self.current_bookings >= self.max_bookings
    }

    pub fn remaining(&self) -> u32 {
        self.max_bookings.saturating_sub(self.current_bookings)
    }
}

/// A mentor-customizable session type label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Display affordance used by presentation code (badge color).
    #[serde(default)]
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_opposite() {
        assert_eq!(Role::Mentor.opposite(), Role::Mentee);
        assert_eq!(Role::Mentee.opposite(), Role::Mentor);
    }

    #[test]
    fn test_slot_remaining_saturates() {
        let slot = AvailabilitySlot {
            id: Uuid::new_v4(),
            day_of_week: chrono::Weekday::Mon,
            start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 60,
            session_type: "Career Chat".to_string(),
            max_bookings: 2,
            current_bookings: 2,
        };

        assert!(slot.is_full());
        assert_eq!(slot.remaining(), 0);
    }
}
