//! Analytics event sinks
//!
//! Views and handlers report page views and named interaction events to an
//! [`EventSink`]. Tracking is fire-and-forget: a sink never fails and never
//! blocks the page it is reporting on.

use serde_json::{json, Value};
use std::sync::Mutex;

/// Destination for analytics events
pub trait EventSink: Send + Sync {
    /// Record a named event with a small parameter payload
    fn track_event(&self, name: &str, params: Value);

    /// Record a page view
    fn track_page_view(&self, path: &str, title: &str) {
        self.track_event(
            "page_view",
            json!({ "page_path": path, "page_title": title }),
        );
    }
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn track_event(&self, _name: &str, _params: Value) {}
}

/// Logs events through tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn track_event(&self, name: &str, params: Value) {
        tracing::info!(target: "autoflow_site::analytics", event_name = name, %params, "Tracked event");
    }
}

/// Keeps events in memory, newest last
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<(String, Value)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of the recorded events, in order
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl EventSink for MemorySink {
    fn track_event(&self, name: &str, params: Value) {
        if let Ok(mut events) = self.events.lock() {
            events.push((name.to_string(), params));
        }
    }
}
