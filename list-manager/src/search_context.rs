//! The debounced search query of a page.
use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Holds the text being typed & the query committed from it.
///
/// Every [`SearchContext::input`] restarts the debounce timer, so only the last
/// edit of a burst is committed. Time is passed in explicitly by the caller.
#[derive(Debug, Clone)]
pub struct SearchContext {
    debounce: Duration,
    query: String,
    pending: Option<(String, Instant)>,
}

impl SearchContext {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            query: String::new(),
            pending: None,
        }
    }

    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// Commits the pending text if the debounce has elapsed since the last edit.
    ///
    /// Returns whether the committed query changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let is_due = match &self.pending {
            Some((_, edited_at)) => now.saturating_duration_since(*edited_at) >= self.debounce,
            None => false,
        };
        if !is_due {
            return false;
        }

        match self.pending.take() {
            Some((text, _)) if text != self.query => {
                self.query = text;
                true
            }
            _ => false,
        }
    }

    /// Commits the pending text right away.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((text, _)) if text != self.query => {
                self.query = text;
                true
            }
            _ => false,
        }
    }

    /// The committed query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The text not yet committed, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|(text, _)| text.as_str())
    }

    /// Leaving the page drops both the committed & the pending query.
    pub fn on_navigate(&mut self) {
        self.query.clear();
        self.pending = None;
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
