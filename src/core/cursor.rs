use crate::models::Candidate;

/// A zero-based index into an ordered candidate list.
///
/// The cursor only moves forward as candidates are disposed of;
/// `index == total` is the legitimate terminal "exhausted" state, not
/// an error. The cursor holds no filter awareness: re-deriving the
/// candidate set must be paired with a fresh cursor or `reset()`.
#[derive(Debug, Clone)]
pub struct CandidateCursor {
    candidates: Vec<Candidate>,
    index: usize,
}

impl CandidateCursor {
    /// Build a cursor over a candidate set snapshot, starting at 0.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates, index: 0 }
    }

    /// The candidate currently under consideration, or None when
    /// exhausted.
    pub fn current(&self) -> Option<&Candidate> {
        self.candidates.get(self.index)
    }

    /// Move to the next candidate, saturating at the end of the list.
    ///
    /// Advancing past the last candidate is a no-op; it never panics.
    pub fn advance(&mut self) {
        if self.index < self.candidates.len() {
            self.index += 1;
        }
    }

    /// Rewind to the first candidate.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Up to `n` candidates starting at the current position, without
    /// moving the cursor. Used to render the card stack.
    pub fn peek_next(&self, n: usize) -> &[Candidate] {
        let start = self.index.min(self.candidates.len());
        let end = (start + n).min(self.candidates.len());
        &self.candidates[start..end]
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.candidates.len()
    }

    /// (index, total) for progress display.
    pub fn position(&self) -> (usize, usize) {
        (self.index, self.candidates.len())
    }

    pub fn total(&self) -> usize {
        self.candidates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn create_candidate(id: &str) -> Candidate {
        Candidate {
            user_id: id.to_string(),
            name: format!("Candidate {}", id),
            title: String::new(),
            company: String::new(),
            bio: String::new(),
            role: Role::Mentor,
            industries: vec![],
            expertise: vec![],
            experience: String::new(),
            location: String::new(),
            availability: String::new(),
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_current_starts_at_first() {
        let cursor = CandidateCursor::new(vec![create_candidate("a"), create_candidate("b")]);

        assert_eq!(cursor.current().unwrap().user_id, "a");
        assert_eq!(cursor.position(), (0, 2));
    }

    #[test]
    fn test_advance_saturates() {
        let mut cursor = CandidateCursor::new(vec![create_candidate("a"), create_candidate("b")]);

        cursor.advance();
        assert_eq!(cursor.current().unwrap().user_id, "b");

        cursor.advance();
        assert!(cursor.is_exhausted());
        assert!(cursor.current().is_none());

        // Further advances are no-ops
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position(), (2, 2));
    }

    #[test]
    fn test_empty_set_is_immediately_exhausted() {
        let cursor = CandidateCursor::new(vec![]);

        assert!(cursor.is_exhausted());
        assert!(cursor.current().is_none());
        assert_eq!(cursor.position(), (0, 0));
    }

    #[test]
    fn test_reset_rewinds() {
        let mut cursor = CandidateCursor::new(vec![create_candidate("a"), create_candidate("b")]);

        cursor.advance();
        cursor.advance();
        assert!(cursor.is_exhausted());

        cursor.reset();
        assert_eq!(cursor.current().unwrap().user_id, "a");
    }

    #[test]
    fn test_peek_next_does_not_mutate() {
        let cursor = CandidateCursor::new(vec![
            create_candidate("a"),
            create_candidate("b"),
            create_candidate("c"),
        ]);

        let stack = cursor.peek_next(2);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].user_id, "a");
        assert_eq!(stack[1].user_id, "b");

        // Peeking past the end is clamped
        assert_eq!(cursor.peek_next(10).len(), 3);
        assert_eq!(cursor.position(), (0, 3));
    }

    #[test]
    fn test_peek_next_when_exhausted() {
        let mut cursor = CandidateCursor::new(vec![create_candidate("a")]);
        cursor.advance();

        assert!(cursor.peek_next(2).is_empty());
    }
}
