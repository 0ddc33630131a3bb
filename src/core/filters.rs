use crate::models::{Candidate, Facet, FilterState};
use std::collections::BTreeSet;

impl FilterState {
    /// Toggle a facet value: remove it if selected, add it otherwise.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let set = self.facet_set_mut(facet);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Reset every facet set and the search query.
    pub fn clear_all(&mut self) {
        self.selected_industries.clear();
        self.selected_expertise.clear();
        self.selected_availability.clear();
        self.selected_experience.clear();
        self.search_query.clear();
    }

    /// Number of active facet selections across the four sets.
    ///
    /// The search query is not counted.
    pub fn active_filter_count(&self) -> usize {
        self.selected_industries.len()
            + self.selected_expertise.len()
            + self.selected_availability.len()
            + self.selected_experience.len()
    }

    /// The predicate: every non-empty facet set must intersect the
    /// candidate's corresponding attribute, and the search query (if
    /// any) must be a case-insensitive substring of a searchable field.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if !candidate.is_active {
            return false;
        }

        if !set_intersects(&self.selected_industries, &candidate.industries) {
            return false;
        }

        if !set_intersects(&self.selected_expertise, &candidate.expertise) {
            return false;
        }

        if !self.selected_availability.is_empty()
            && !self.selected_availability.contains(&candidate.availability)
        {
            return false;
        }

        if !self.selected_experience.is_empty()
            && !self.selected_experience.contains(&candidate.experience)
        {
            return false;
        }

        matches_search(&self.search_query, candidate)
    }

    /// Apply the predicate to a pool snapshot, preserving pool order.
    pub fn apply(&self, pool: &[Candidate]) -> Vec<Candidate> {
        pool.iter().filter(|c| self.matches(c)).cloned().collect()
    }

    fn facet_set_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Industry => &mut self.selected_industries,
            Facet::Expertise => &mut self.selected_expertise,
            Facet::Availability => &mut self.selected_availability,
            Facet::Experience => &mut self.selected_experience,
        }
    }
}

/// An empty selection means "no constraint", not "exclude all".
#[inline]
fn set_intersects(selected: &BTreeSet<String>, attributes: &[String]) -> bool {
    selected.is_empty() || attributes.iter().any(|a| selected.contains(a))
}

#[inline]
fn matches_search(query: &str, candidate: &Candidate) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    candidate
        .searchable_fields()
        .iter()
        .any(|f| f.to_lowercase().contains(&needle))
        || candidate
            .expertise
            .iter()
            .any(|e| e.to_lowercase().contains(&needle))
}
