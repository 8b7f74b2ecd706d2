//! wikiterm — a terminal front end for a wiki served over HTTP.
//!
//! The interesting machinery lives in [`fetch`] (the race-free,
//! latency-smoothed request lifecycle) and [`flash`] (one-shot messages
//! that survive navigation). Everything else is a conventional ratatui
//! application around a small HTTP client.

pub mod api;
pub mod config;
pub mod fetch;
pub mod flash;
pub mod ui;
