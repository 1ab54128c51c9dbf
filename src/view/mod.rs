//! Views: per-request state machines over the content loaders

mod controller;
mod state;

pub use controller::{DetailView, ListView};
pub use state::{Liveness, ViewState};
