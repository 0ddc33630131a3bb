// Integration tests for the MentorLink engine
//
// Drives the full browsing flow through the library surface: filters,
// gestures, deferred advancement, the connection gate, and booking.

use mentorlink_engine::core::{
    AvailabilityBook, BookingOutcome, ConnectionLedger, DeclinePolicy, GestureEffect,
    GestureThresholds, MatchingSession, SettleOutcome,
};
use mentorlink_engine::models::{Candidate, Facet, Role, SessionType};

fn create_mentor(id: &str, industry: &str) -> Candidate {
    Candidate {
        user_id: id.to_string(),
        name: format!("Mentor {}", id),
        title: "Principal Engineer".to_string(),
        company: "Initech".to_string(),
        bio: "Growing the next generation of engineers".to_string(),
        role: Role::Mentor,
        industries: vec![industry.to_string()],
        expertise: vec!["Architecture".to_string()],
        experience: "15+ years".to_string(),
        location: "Berlin".to_string(),
        availability: "Available".to_string(),
        is_active: true,
        created_at: None,
    }
}

fn pool() -> Vec<Candidate> {
    vec![
        create_mentor("m1", "Technology"),
        create_mentor("m2", "Finance"),
        create_mentor("m3", "Healthcare"),
        create_mentor("m4", "Technology"),
        create_mentor("m5", "Education"),
        create_mentor("m6", "Finance"),
    ]
}

fn swipe(session: &mut MatchingSession, dx: f64, t: i64) -> GestureEffect {
    session.gesture_start(200.0, 300.0, t);
    let (_, effect) = session.gesture_end(200.0 + dx, 300.0, t + 400).unwrap();
    effect
}

#[test]
fn test_end_to_end_filtered_browse() {
    let mut session = MatchingSession::new(
        "mentee".to_string(),
        Role::Mentor,
        pool(),
        GestureThresholds::default(),
    );

    session.toggle_filter(Facet::Industry, "Technology");
    assert_eq!(session.position(), (0, 2));

    // Pass on the first, show interest in the second.
    let seq1 = match swipe(&mut session, -100.0, 1_000) {
        GestureEffect::Pass { candidate_id, seq } => {
            assert_eq!(candidate_id, "m1");
            seq
        }
        other => panic!("expected pass, got {:?}", other),
    };
    assert_eq!(session.settle(seq1), SettleOutcome::Advanced);

    let seq2 = match swipe(&mut session, 100.0, 2_000) {
        GestureEffect::ShowInterest { candidate_id, seq } => {
            assert_eq!(candidate_id, "m4");
            seq
        }
        other => panic!("expected interest, got {:?}", other),
    };
    assert_eq!(session.settle(seq2), SettleOutcome::Advanced);

    assert!(session.is_exhausted());
    assert!(session.current().is_none());
}

#[test]
fn test_interest_flows_into_connection_and_booking() {
    let mut session = MatchingSession::new(
        "mentee".to_string(),
        Role::Mentor,
        pool(),
        GestureThresholds::default(),
    );
    let mut ledger = ConnectionLedger::new(DeclinePolicy::Terminal);
    let mut book = AvailabilityBook::with_session_types(vec![SessionType {
        name: "Career Chat".to_string(),
        description: String::new(),
        color: String::new(),
    }]);
    let slot = book
        .add_slot(
            chrono::Weekday::Mon,
            chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "Career Chat",
            1,
        )
        .unwrap();

    // SwipeRight triggers the interest flow against the top candidate.
    let mentor_id = match swipe(&mut session, 100.0, 1_000) {
        GestureEffect::ShowInterest { candidate_id, .. } => candidate_id,
        other => panic!("expected interest, got {:?}", other),
    };

    ledger.request("mentee", &mentor_id, Some("Would love your guidance".to_string()));

    // Booking is gated until the mentor accepts.
    assert!(!ledger.can_book_session("mentee", &mentor_id));

    ledger.accept("mentee", &mentor_id);
    assert!(ledger.can_book_session("mentee", &mentor_id));

    assert_eq!(book.attempt_booking(slot), BookingOutcome::Booked);
    assert_eq!(book.attempt_booking(slot), BookingOutcome::SlotFull);
}

#[test]
fn test_filter_change_mid_browse_discards_stale_settle() {
    let mut session = MatchingSession::new(
        "mentee".to_string(),
        Role::Mentor,
        pool(),
        GestureThresholds::default(),
    );

    let seq = match swipe(&mut session, -100.0, 1_000) {
        GestureEffect::Pass { seq, .. } => seq,
        other => panic!("{:?}", other),
    };

    session.toggle_filter(Facet::Industry, "Finance");

    // The settle arrives after the filter change: stale, no movement.
    assert_eq!(session.settle(seq), SettleOutcome::UnknownTicket);
    assert_eq!(session.position(), (0, 2));
}

#[test]
fn test_rename_cascade_keeps_registry_consistent() {
    let mut book = AvailabilityBook::with_session_types(vec![
        SessionType {
            name: "Career Chat".to_string(),
            description: String::new(),
            color: String::new(),
        },
        SessionType {
            name: "Mock Interview".to_string(),
            description: String::new(),
            color: String::new(),
        },
    ]);

    for day in [chrono::Weekday::Mon, chrono::Weekday::Wed] {
        book.add_slot(
            day,
            chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "Career Chat",
            1,
        )
        .unwrap();
    }

    let updated = book.rename_session_type("Career Chat", "Intro Call").unwrap();
    assert_eq!(updated, 2);

    let registered: Vec<String> = book.session_types().map(|st| st.name.clone()).collect();
    for slot in book.slots() {
        assert!(registered.contains(&slot.session_type));
    }
}
