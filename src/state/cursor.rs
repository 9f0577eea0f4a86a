//! Pagination cursor
//!
//! The cursor is the walker's position in the page sequence. It only moves
//! forward and becomes terminal exactly once.

use crate::state::{StopReason, WalkState};
use url::Url;

/// Position of a walk in the pagination sequence
#[derive(Debug, Clone)]
pub struct PageCursor {
    current_url: Url,
    previous_url: Option<Url>,
    page_index: u32,
    state: WalkState,
    stop_reason: Option<StopReason>,
}

impl PageCursor {
    /// Creates a cursor positioned on the start page, ready to fetch it
    pub fn new(start_url: Url) -> Self {
        Self {
            current_url: start_url,
            previous_url: None,
            page_index: 0,
            state: WalkState::Fetching,
            stop_reason: None,
        }
    }

    /// URL of the page the cursor points at
    pub fn current_url(&self) -> &Url {
        &self.current_url
    }

    /// URL of the page visited (or attempted) before the current one
    pub fn previous_url(&self) -> Option<&Url> {
        self.previous_url.as_ref()
    }

    /// Zero-based index of the current page in visit order
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// One-based page number, as used in logs
    pub fn page_number(&self) -> u32 {
        self.page_index + 1
    }

    /// Returns true while the cursor points at the start page
    pub fn is_first(&self) -> bool {
        self.page_index == 0
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Why the walk stopped, once terminal
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Moves the state machine to `next`
    pub fn set_state(&mut self, next: WalkState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid walk transition: {} -> {}",
            self.state,
            next
        );
        tracing::trace!(page = self.page_number(), "walk state {} -> {}", self.state, next);
        self.state = next;
    }

    /// Moves the cursor to the next page
    pub fn advance(&mut self, next_url: Url) {
        self.set_state(WalkState::Continuing);
        self.previous_url = Some(std::mem::replace(&mut self.current_url, next_url));
        self.page_index += 1;
    }

    /// Leaves `Continuing` to fetch the page the cursor points at
    pub fn begin_page(&mut self) {
        if self.state == WalkState::Continuing {
            self.set_state(WalkState::Fetching);
        }
    }

    /// Ends the walk
    pub fn finish(&mut self, reason: StopReason) {
        if self.is_terminal() {
            return;
        }
        self.set_state(WalkState::Terminal);
        self.stop_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_new_cursor() {
        let cursor = PageCursor::new(url("http://books.toscrape.com/"));
        assert!(cursor.is_first());
        assert!(!cursor.is_terminal());
        assert_eq!(cursor.page_number(), 1);
        assert_eq!(cursor.state(), WalkState::Fetching);
        assert_eq!(cursor.previous_url(), None);
    }

    #[test]
    fn test_advance_moves_forward() {
        let mut cursor = PageCursor::new(url("http://books.toscrape.com/"));
        cursor.set_state(WalkState::Parsing);
        cursor.set_state(WalkState::Extracting);
        cursor.set_state(WalkState::LocatingNext);
        cursor.advance(url("http://books.toscrape.com/catalogue/page-2.html"));

        assert_eq!(cursor.page_index(), 1);
        assert!(!cursor.is_first());
        assert_eq!(cursor.state(), WalkState::Continuing);
        assert_eq!(
            cursor.current_url().as_str(),
            "http://books.toscrape.com/catalogue/page-2.html"
        );
        assert_eq!(
            cursor.previous_url().map(Url::as_str),
            Some("http://books.toscrape.com/")
        );

        cursor.begin_page();
        assert_eq!(cursor.state(), WalkState::Fetching);
    }

    #[test]
    fn test_finish_is_sticky() {
        let mut cursor = PageCursor::new(url("http://books.toscrape.com/"));
        cursor.finish(StopReason::FirstPageFailed);
        cursor.finish(StopReason::EndOfCatalog);

        assert!(cursor.is_terminal());
        assert_eq!(cursor.stop_reason(), Some(StopReason::FirstPageFailed));
    }
}
