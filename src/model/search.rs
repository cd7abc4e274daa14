//! Search query, result set and request sequencing

use super::tab::{sort_by_rating, SearchResult};

/// Queries shorter than this never reach the backend
pub const MIN_QUERY_LEN: usize = 3;

pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub selected: usize,
    pub loading: bool,
    /// Sequence number of the most recently issued request
    latest_seq: u64,
}

impl SearchState {
    /// Empty the result set and invalidate any request still in flight
    pub fn clear(&mut self) {
        self.latest_seq += 1;
        self.results.clear();
        self.selected = 0;
        self.loading = false;
    }

    /// Register a new outgoing request and return its sequence number
    pub fn issue(&mut self) -> u64 {
        let seq = self.reserve();
        self.loading = true;
        seq
    }

    /// Take a sequence number for a debounced request without marking it in flight.
    /// Any later `clear`, `reserve` or `issue` invalidates it.
    pub fn reserve(&mut self) -> u64 {
        self.latest_seq += 1;
        self.latest_seq
    }

    /// Start a request reserved earlier. Returns false if it was superseded meanwhile.
    pub fn begin(&mut self, seq: u64) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Publish results for `seq`. Returns false and changes nothing if a newer request exists.
    pub fn publish(&mut self, seq: u64, mut results: Vec<SearchResult>) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        sort_by_rating(&mut results);
        self.results = results;
        self.selected = 0;
        self.loading = false;
        true
    }

    /// Settle a failed request. Results are left as they were.
    pub fn fail(&mut self, seq: u64) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, rating: Option<f64>) -> SearchResult {
        SearchResult {
            id,
            song: String::new(),
            artist: String::new(),
            tab_type: String::new(),
            rating,
            url: None,
        }
    }

    #[test]
    fn short_queries_are_not_searchable() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("ab"));
        assert!(is_searchable("abc"));
        // counted in characters, not bytes
        assert!(!is_searchable("éé"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = SearchState::default();
        let older = state.issue();
        let newer = state.issue();

        assert!(state.publish(newer, vec![result(2, Some(1.0))]));
        assert!(!state.publish(older, vec![result(1, Some(5.0))]));
        assert_eq!(state.results[0].id, 2);
        assert!(!state.loading);
    }

    #[test]
    fn loading_stays_on_until_latest_settles() {
        let mut state = SearchState::default();
        let older = state.issue();
        let newer = state.issue();

        assert!(!state.fail(older));
        assert!(state.loading);
        assert!(state.fail(newer));
        assert!(!state.loading);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut state = SearchState::default();
        let seq = state.issue();
        state.publish(seq, vec![result(7, None)]);

        let seq = state.issue();
        state.fail(seq);
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn clear_invalidates_in_flight_request() {
        let mut state = SearchState::default();
        let seq = state.issue();
        state.clear();
        assert!(!state.loading);
        assert!(!state.publish(seq, vec![result(1, None)]));
        assert!(state.results.is_empty());
    }

    #[test]
    fn clear_after_reserve_blocks_the_reserved_request() {
        let mut state = SearchState::default();
        let seq = state.reserve();
        assert!(!state.loading);
        state.clear();
        assert!(!state.begin(seq));
        assert!(!state.loading);
        assert!(!state.publish(seq, vec![result(1, None)]));
        assert!(state.results.is_empty());
    }

    #[test]
    fn reserved_request_runs_when_still_latest() {
        let mut state = SearchState::default();
        let seq = state.reserve();
        assert!(state.begin(seq));
        assert!(state.loading);
        assert!(state.publish(seq, vec![result(1, None)]));
    }

    #[test]
    fn published_results_are_sorted_and_selection_reset() {
        let mut state = SearchState::default();
        let seq = state.issue();
        state.publish(seq, vec![result(1, Some(3.0)), result(2, None), result(3, Some(5.0)), result(4, Some(1.0))]);
        let ratings: Vec<Option<f64>> = state.results.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![Some(5.0), Some(3.0), Some(1.0), None]);

        state.move_down();
        state.move_down();
        state.move_down();
        state.move_down();
        assert_eq!(state.selected, 3);
        state.move_up();
        assert_eq!(state.selected_result().map(|r| r.id), Some(4));
    }
}
