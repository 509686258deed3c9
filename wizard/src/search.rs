//! Debounced profile search.
//!
//! Keystrokes only update the draft. A query is dispatched once the draft
//! has been quiet for the debounce period, tagged with a sequence number.
//! A response is accepted only when its sequence is the latest dispatched
//! one and the draft still equals that query; anything else is stale and
//! dropped.

use luvpay_types::{Profile, Timestamp};

/// Quiet period before a search is dispatched.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 1_000;

/// A query ready to send to the profile resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Awaiting,
    Found(Vec<Profile>),
    Failed(String),
}

/// What the search panel should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchView<'a> {
    /// Nothing typed yet.
    Idle,
    /// Draft differs from the last dispatched query, or its answer is
    /// still outstanding. Rendered as placeholder rows.
    Loading,
    Results(&'a [Profile]),
    Failed(&'a str),
}

#[derive(Debug, Clone)]
pub struct ProfileSearch {
    debounce_ms: u64,
    draft: String,
    last_edit: Option<Timestamp>,
    next_seq: u64,
    dispatched: Option<SearchRequest>,
    outcome: Outcome,
}

impl ProfileSearch {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            draft: String::new(),
            last_edit: None,
            next_seq: 1,
            dispatched: None,
            outcome: Outcome::Awaiting,
        }
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Record a keystroke.
    pub fn edit(&mut self, query: impl Into<String>, now: Timestamp) {
        self.draft = query.into();
        self.last_edit = Some(now);
    }

    /// Whether the draft still needs to be dispatched.
    fn is_pending(&self) -> bool {
        !self.draft.is_empty()
            && self
                .dispatched
                .as_ref()
                .map_or(true, |d| d.query != self.draft)
    }

    /// When the pending draft becomes due, if there is one.
    pub fn deadline(&self) -> Option<Timestamp> {
        if !self.is_pending() {
            return None;
        }
        self.last_edit.map(|t| t.plus_millis(self.debounce_ms))
    }

    /// Dispatch the draft if it has been quiet long enough.
    pub fn poll(&mut self, now: Timestamp) -> Option<SearchRequest> {
        let due = self.deadline()?;
        if now < due {
            return None;
        }
        let request = SearchRequest {
            seq: self.next_seq,
            query: self.draft.clone(),
        };
        self.next_seq += 1;
        self.dispatched = Some(request.clone());
        self.outcome = Outcome::Awaiting;
        tracing::debug!(seq = request.seq, query = %request.query, "profile search dispatched");
        Some(request)
    }

    /// Deliver a resolver response. Returns `false` if it was stale.
    pub fn accept(&mut self, seq: u64, outcome: Result<Vec<Profile>, String>) -> bool {
        let current = match &self.dispatched {
            Some(d) if d.seq == seq && d.query == self.draft => d,
            _ => {
                tracing::debug!(seq, "stale profile search result dropped");
                return false;
            }
        };
        tracing::debug!(seq = current.seq, ok = outcome.is_ok(), "profile search settled");
        self.outcome = match outcome {
            Ok(profiles) => Outcome::Found(profiles),
            Err(message) => Outcome::Failed(message),
        };
        true
    }

    pub fn view(&self) -> SearchView<'_> {
        if self.draft.is_empty() {
            return SearchView::Idle;
        }
        if self.is_pending() {
            return SearchView::Loading;
        }
        match &self.outcome {
            Outcome::Awaiting => SearchView::Loading,
            Outcome::Found(profiles) => SearchView::Results(profiles),
            Outcome::Failed(message) => SearchView::Failed(message),
        }
    }

    /// Forget the draft and any results. Sequence numbers keep increasing
    /// so responses to earlier dispatches stay stale.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.last_edit = None;
        self.dispatched = None;
        self.outcome = Outcome::Awaiting;
    }
}

impl Default for ProfileSearch {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.into(),
            handle: Some(id.into()),
            owned_by: "0x1111111111111111111111111111111111111111".into(),
            avatar_uri: None,
        }
    }

    #[test]
    fn rapid_keystrokes_dispatch_once() {
        let mut search = ProfileSearch::default();
        search.edit("a", at(0));
        assert_eq!(search.poll(at(300)), None);
        search.edit("ab", at(300));
        search.edit("abc", at(600));
        assert_eq!(search.poll(at(1_599)), None);

        let request = search.poll(at(1_600)).unwrap();
        assert_eq!(request.query, "abc");
        assert_eq!(search.poll(at(5_000)), None);
    }

    #[test]
    fn loading_until_latest_result_arrives() {
        let mut search = ProfileSearch::default();
        assert_eq!(search.view(), SearchView::Idle);

        search.edit("wal", at(0));
        assert_eq!(search.view(), SearchView::Loading);
        let request = search.poll(at(1_000)).unwrap();
        assert_eq!(search.view(), SearchView::Loading);

        assert!(search.accept(request.seq, Ok(vec![profile("wallaby")])));
        assert!(matches!(search.view(), SearchView::Results(p) if p.len() == 1));
    }

    #[test]
    fn superseded_results_are_dropped() {
        let mut search = ProfileSearch::default();
        search.edit("wal", at(0));
        let first = search.poll(at(1_000)).unwrap();

        search.edit("wall", at(1_100));
        let second = search.poll(at(2_100)).unwrap();
        assert!(second.seq > first.seq);

        assert!(!search.accept(first.seq, Ok(vec![profile("old")])));
        assert_eq!(search.view(), SearchView::Loading);
        assert!(search.accept(second.seq, Ok(vec![])));
        assert_eq!(search.view(), SearchView::Results(&[]));
    }

    #[test]
    fn result_for_edited_draft_is_dropped() {
        let mut search = ProfileSearch::default();
        search.edit("wal", at(0));
        let request = search.poll(at(1_000)).unwrap();
        search.edit("walx", at(1_050));
        assert!(!search.accept(request.seq, Ok(vec![profile("wallaby")])));
        assert_eq!(search.view(), SearchView::Loading);
    }

    #[test]
    fn empty_draft_never_dispatches() {
        let mut search = ProfileSearch::default();
        search.edit("", at(0));
        assert_eq!(search.deadline(), None);
        assert_eq!(search.poll(at(10_000)), None);
    }

    #[test]
    fn failures_are_shown_inline() {
        let mut search = ProfileSearch::new(10);
        search.edit("x", at(0));
        let request = search.poll(at(10)).unwrap();
        assert!(search.accept(request.seq, Err("rate limited".into())));
        assert_eq!(search.view(), SearchView::Failed("rate limited"));
    }

    #[test]
    fn clear_makes_outstanding_responses_stale() {
        let mut search = ProfileSearch::new(10);
        search.edit("x", at(0));
        let request = search.poll(at(10)).unwrap();
        search.clear();
        search.edit("x", at(20));
        assert!(!search.accept(request.seq, Ok(vec![])));
        assert_eq!(search.poll(at(30)).unwrap().seq, request.seq + 1);
    }
}
