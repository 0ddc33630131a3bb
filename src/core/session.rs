use crate::core::cursor::CandidateCursor;
use crate::core::gesture::{Classification, GestureClassifier, GestureThresholds};
use crate::models::{Candidate, Facet, FilterState, Role};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What a completed gesture did, beyond its classification.
///
/// Swipe effects carry a settle ticket: the cursor does not move until
/// the presentation layer reports the settle animation finished (or
/// decides to apply it immediately).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum GestureEffect {
    /// Ignored drag or gesture with no candidate under it.
    None,
    /// Tap toggled the expanded presentation state.
    ToggledExpanded { expanded: bool },
    /// SwipeLeft: pass on the candidate, advance after settle.
    Pass { candidate_id: String, seq: u64 },
    /// SwipeRight: show interest (the caller opens the composition
    /// surface), advance after settle.
    ShowInterest { candidate_id: String, seq: u64 },
}

/// Result of applying a deferred advancement ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettleOutcome {
    Advanced,
    /// A ticket issued earlier has not settled yet; advancements apply
    /// strictly in the order their gestures were classified.
    OutOfOrder,
    /// Already settled, discarded by a reset, or never issued.
    UnknownTicket,
}

/// One viewer's browsing session: pool snapshot, filter state, cursor,
/// gesture classifier, expanded flag, and the deferred-advancement
/// queue. All mutation funnels through these methods; there is no
/// shared state across sessions.
#[derive(Debug, Clone)]
pub struct MatchingSession {
    viewer_id: String,
    browsing_role: Role,
    pool: Vec<Candidate>,
    filters: FilterState,
    cursor: CandidateCursor,
    classifier: GestureClassifier,
    expanded: bool,
    next_seq: u64,
    pending_advances: VecDeque<u64>,
}

impl MatchingSession {
    /// Start a session over a point-in-time pool snapshot.
    pub fn new(
        viewer_id: String,
        browsing_role: Role,
        pool: Vec<Candidate>,
        thresholds: GestureThresholds,
    ) -> Self {
        let cursor = CandidateCursor::new(pool.clone());
        Self {
            viewer_id,
            browsing_role,
            pool,
            filters: FilterState::default(),
            cursor,
            classifier: GestureClassifier::new(thresholds),
            expanded: false,
            next_seq: 0,
            pending_advances: VecDeque::new(),
        }
    }

    /// Start a session with filters already applied (deep link from a
    /// saved search).
    pub fn with_filters(
        viewer_id: String,
        browsing_role: Role,
        pool: Vec<Candidate>,
        thresholds: GestureThresholds,
        filters: FilterState,
    ) -> Self {
        let mut session = Self::new(viewer_id, browsing_role, pool, thresholds);
        session.filters = filters;
        session.rederive();
        session
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn browsing_role(&self) -> Role {
        self.browsing_role
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.cursor.current()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    pub fn position(&self) -> (usize, usize) {
        self.cursor.position()
    }

    /// Current card plus up to `depth - 1` cards beneath it.
    pub fn stack(&self, depth: usize) -> &[Candidate] {
        self.cursor.peek_next(depth)
    }

    /// Toggle a facet value and re-derive the candidate set. The
    /// cursor resets and any pending work is discarded.
    pub fn toggle_filter(&mut self, facet: Facet, value: &str) {
        self.filters.toggle(facet, value);
        self.rederive();
    }

    /// Clear every facet and the search query.
    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.rederive();
    }

    /// Replace the free-text search query.
    pub fn set_search_query(&mut self, query: &str) {
        self.filters.search_query = query.to_string();
        self.rederive();
    }

    pub fn gesture_start(&mut self, x: f64, y: f64, time_ms: i64) {
        self.classifier.on_start(x, y, time_ms);
    }

    pub fn gesture_move(&mut self, x: f64, y: f64) -> Option<f64> {
        self.classifier.on_move(x, y)
    }

    /// Complete the in-flight gesture: classify it and apply its
    /// effect. Classification completes fully before any advancement
    /// is issued, and each completed gesture yields at most one
    /// advancement ticket.
    pub fn gesture_end(&mut self, x: f64, y: f64, time_ms: i64) -> Option<(Classification, GestureEffect)> {
        let classification = self.classifier.on_end(x, y, time_ms, self.expanded)?;

        let effect = match classification {
            Classification::Tap => {
                if self.cursor.current().is_some() {
                    self.expanded = !self.expanded;
                    GestureEffect::ToggledExpanded { expanded: self.expanded }
                } else {
                    GestureEffect::None
                }
            }
            Classification::SwipeLeft => match self.cursor.current() {
                Some(candidate) => {
                    let candidate_id = candidate.user_id.clone();
                    let seq = self.issue_ticket();
                    GestureEffect::Pass { candidate_id, seq }
                }
                None => GestureEffect::None,
            },
            Classification::SwipeRight => match self.cursor.current() {
                Some(candidate) => {
                    let candidate_id = candidate.user_id.clone();
                    let seq = self.issue_ticket();
                    GestureEffect::ShowInterest { candidate_id, seq }
                }
                None => GestureEffect::None,
            },
            Classification::Ignored => GestureEffect::None,
        };

        Some((classification, effect))
    }

    /// Apply a deferred advancement once the settle animation has
    /// finished. Tickets settle strictly in issue order; a later
    /// ticket settling first is rejected without disturbing the queue.
    pub fn settle(&mut self, seq: u64) -> SettleOutcome {
        match self.pending_advances.front() {
            Some(&front) if front == seq => {
                self.pending_advances.pop_front();
                self.expanded = false;
                self.cursor.advance();
                SettleOutcome::Advanced
            }
            Some(_) if self.pending_advances.contains(&seq) => SettleOutcome::OutOfOrder,
            _ => SettleOutcome::UnknownTicket,
        }
    }

    pub fn pending_advance_count(&self) -> usize {
        self.pending_advances.len()
    }

    /// Rewind the cursor and discard all transient state: pending
    /// tickets, the in-flight sample, and the expanded flag.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.discard_transient();
    }

    fn issue_ticket(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending_advances.push_back(seq);
        seq
    }

    fn rederive(&mut self) {
        self.cursor = CandidateCursor::new(self.filters.apply(&self.pool));
        self.discard_transient();
    }

    fn discard_transient(&mut self) {
        self.pending_advances.clear();
        self.classifier.cancel();
        self.expanded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(id: &str, industry: &str) -> Candidate {
        Candidate {
            user_id: id.to_string(),
            name: format!("Mentor {}", id),
            title: "Staff Engineer".to_string(),
            company: "Acme".to_string(),
            bio: String::new(),
            role: Role::Mentor,
            industries: vec![industry.to_string()],
            expertise: vec!["Systems".to_string()],
            experience: "10+ years".to_string(),
            location: "Remote".to_string(),
            availability: "Available".to_string(),
            is_active: true,
            created_at: None,
        }
    }

    fn six_candidate_session() -> MatchingSession {
        // Two of six candidates are in Technology.
        let pool = vec![
            create_candidate("1", "Technology"),
            create_candidate("2", "Finance"),
            create_candidate("3", "Healthcare"),
            create_candidate("4", "Technology"),
            create_candidate("5", "Education"),
            create_candidate("6", "Finance"),
        ];
        MatchingSession::new(
            "viewer".to_string(),
            Role::Mentor,
            pool,
            GestureThresholds::default(),
        )
    }

    fn swipe_left(session: &mut MatchingSession, t: i64) -> GestureEffect {
        session.gesture_start(300.0, 200.0, t);
        let (classification, effect) = session.gesture_end(200.0, 200.0, t + 400).unwrap();
        assert_eq!(classification, Classification::SwipeLeft);
        effect
    }

    fn swipe_right(session: &mut MatchingSession, t: i64) -> GestureEffect {
        session.gesture_start(200.0, 200.0, t);
        let (classification, effect) = session.gesture_end(300.0, 200.0, t + 400).unwrap();
        assert_eq!(classification, Classification::SwipeRight);
        effect
    }

    fn tap(session: &mut MatchingSession, t: i64) {
        session.gesture_start(200.0, 200.0, t);
        let (classification, _) = session.gesture_end(202.0, 201.0, t + 100).unwrap();
        assert_eq!(classification, Classification::Tap);
    }

    #[test]
    fn test_filtered_browse_scenario() {
        let mut session = six_candidate_session();
        session.toggle_filter(Facet::Industry, "Technology");

        assert_eq!(session.position(), (0, 2));
        assert_eq!(session.current().unwrap().user_id, "1");

        // Two swipe-left gestures, settled in order, exhaust the set.
        let effect = swipe_left(&mut session, 1_000);
        let seq1 = match effect {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("expected pass, got {:?}", other),
        };
        assert_eq!(session.settle(seq1), SettleOutcome::Advanced);
        assert_eq!(session.current().unwrap().user_id, "4");

        let effect = swipe_left(&mut session, 2_000);
        let seq2 = match effect {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("expected pass, got {:?}", other),
        };
        assert_eq!(session.settle(seq2), SettleOutcome::Advanced);

        assert!(session.is_exhausted());
        assert!(session.current().is_none());
        assert_eq!(session.position(), (2, 2));
    }

    #[test]
    fn test_swipe_right_yields_interest_effect() {
        let mut session = six_candidate_session();

        match swipe_right(&mut session, 1_000) {
            GestureEffect::ShowInterest { candidate_id, .. } => {
                assert_eq!(candidate_id, "1");
            }
            other => panic!("expected interest, got {:?}", other),
        }
        // Cursor has not moved yet: advancement is deferred to settle.
        assert_eq!(session.current().unwrap().user_id, "1");
    }

    #[test]
    fn test_settles_apply_in_classification_order() {
        let mut session = six_candidate_session();

        let seq1 = match swipe_left(&mut session, 1_000) {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("{:?}", other),
        };
        let seq2 = match swipe_left(&mut session, 2_000) {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("{:?}", other),
        };

        // The second gesture's settle fires first: rejected, queue intact.
        assert_eq!(session.settle(seq2), SettleOutcome::OutOfOrder);
        assert_eq!(session.position().0, 0);

        assert_eq!(session.settle(seq1), SettleOutcome::Advanced);
        assert_eq!(session.settle(seq2), SettleOutcome::Advanced);
        assert_eq!(session.position().0, 2);
    }

    #[test]
    fn test_settle_is_at_most_once() {
        let mut session = six_candidate_session();

        let seq = match swipe_left(&mut session, 1_000) {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("{:?}", other),
        };

        assert_eq!(session.settle(seq), SettleOutcome::Advanced);
        assert_eq!(session.settle(seq), SettleOutcome::UnknownTicket);
        assert_eq!(session.position().0, 1);
    }

    #[test]
    fn test_tap_toggles_expanded_and_blocks_swipes() {
        let mut session = six_candidate_session();

        tap(&mut session, 1_000);
        assert!(session.is_expanded());

        // While expanded, a hard swipe is suppressed.
        session.gesture_start(300.0, 200.0, 2_000);
        let (classification, effect) = session.gesture_end(200.0, 200.0, 2_400).unwrap();
        assert_eq!(classification, Classification::Ignored);
        assert_eq!(effect, GestureEffect::None);
        assert_eq!(session.pending_advance_count(), 0);

        // A second tap collapses; swipes work again.
        tap(&mut session, 3_000);
        assert!(!session.is_expanded());
        swipe_left(&mut session, 4_000);
        assert_eq!(session.pending_advance_count(), 1);
    }

    #[test]
    fn test_filter_change_resets_cursor_and_discards_pending() {
        let mut session = six_candidate_session();

        let seq = match swipe_left(&mut session, 1_000) {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("{:?}", other),
        };
        tap(&mut session, 2_000);

        session.toggle_filter(Facet::Industry, "Finance");

        assert_eq!(session.position(), (0, 2));
        assert!(!session.is_expanded());
        // The stale ticket no longer applies.
        assert_eq!(session.settle(seq), SettleOutcome::UnknownTicket);
    }

    #[test]
    fn test_clear_filters_restores_full_pool() {
        let mut session = six_candidate_session();
        session.toggle_filter(Facet::Industry, "Technology");
        assert_eq!(session.position().1, 2);

        session.clear_filters();
        assert_eq!(session.position(), (0, 6));
    }

    #[test]
    fn test_search_query_rederives() {
        let mut session = six_candidate_session();
        session.set_search_query("mentor 4");

        assert_eq!(session.position().1, 1);
        assert_eq!(session.current().unwrap().user_id, "4");
    }

    #[test]
    fn test_gestures_after_exhaustion_do_nothing() {
        let pool = vec![create_candidate("1", "Technology")];
        let mut session = MatchingSession::new(
            "viewer".to_string(),
            Role::Mentor,
            pool,
            GestureThresholds::default(),
        );

        let seq = match swipe_left(&mut session, 1_000) {
            GestureEffect::Pass { seq, .. } => seq,
            other => panic!("{:?}", other),
        };
        session.settle(seq);
        assert!(session.is_exhausted());

        session.gesture_start(300.0, 200.0, 2_000);
        let (_, effect) = session.gesture_end(200.0, 200.0, 2_400).unwrap();
        assert_eq!(effect, GestureEffect::None);
        assert_eq!(session.pending_advance_count(), 0);
    }

    #[test]
    fn test_reset_discards_everything_transient() {
        let mut session = six_candidate_session();

        swipe_left(&mut session, 1_000);
        session.gesture_start(100.0, 100.0, 2_000);

        session.reset();

        assert_eq!(session.position(), (0, 6));
        assert_eq!(session.pending_advance_count(), 0);
        // The interrupted sample was dropped with the reset.
        assert!(session.gesture_end(100.0, 100.0, 2_100).is_none());
    }

    #[test]
    fn test_with_filters_constructor() {
        let mut filters = FilterState::default();
        filters.toggle(Facet::Industry, "Technology");

        let session = MatchingSession::with_filters(
            "viewer".to_string(),
            Role::Mentor,
            vec![
                create_candidate("1", "Technology"),
                create_candidate("2", "Finance"),
            ],
            GestureThresholds::default(),
            filters,
        );

        assert_eq!(session.position(), (0, 1));
    }
}
