//! Latency-smoothed fetch lifecycle.
//!
//! Views own a [`FetchController`] per data need. The controller runs
//! request futures on a shared runtime, guarantees that only the newest
//! attempt can publish, and keeps loading states visible for a minimum
//! duration so fast servers do not produce flicker.

mod controller;
mod state;

pub use controller::{FetchController, MIN_VISIBLE_LOADING};
pub use state::FetchState;
