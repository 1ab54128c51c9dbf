//! View state machine and liveness flags

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// `Loading` until the load settles into exactly one terminal state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Success(T),
    Error(String),
    NotFound,
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Name of the state, as used by the page templates
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Success(_) => "success",
            ViewState::Error(_) => "error",
            ViewState::NotFound => "not_found",
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            ViewState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> ViewState<Vec<T>> {
    /// Loaded entries; empty in every state but `Success`
    pub fn entries(&self) -> &[T] {
        self.success().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Marks one load as still wanted.
///
/// A view hands a clone to each load it starts and revokes it on teardown or
/// when a newer load replaces it. Loads check it before committing results.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_empty_unless_success() {
        let loaded: ViewState<Vec<u32>> = ViewState::Success(vec![1, 2]);
        assert_eq!(loaded.entries(), &[1, 2]);

        for state in [
            ViewState::<Vec<u32>>::Loading,
            ViewState::Error("Failed to load templates".to_string()),
            ViewState::NotFound,
        ] {
            assert!(state.entries().is_empty());
        }
    }

    #[test]
    fn test_state_names() {
        assert_eq!(ViewState::<()>::Loading.name(), "loading");
        assert_eq!(ViewState::Success(()).name(), "success");
        assert_eq!(ViewState::<()>::Error(String::new()).name(), "error");
        assert_eq!(ViewState::<()>::NotFound.name(), "not_found");
        assert!(ViewState::<()>::Loading.is_loading());
        assert_eq!(
            ViewState::<()>::Error("boom".to_string()).error(),
            Some("boom")
        );
    }

    #[test]
    fn test_liveness_is_shared_between_clones() {
        let live = Liveness::new();
        let held_by_load = live.clone();
        assert!(held_by_load.is_alive());

        live.revoke();
        assert!(!held_by_load.is_alive());
    }
}
