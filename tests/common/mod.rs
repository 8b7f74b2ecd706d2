//! Shared test utilities.

#![allow(dead_code)]

pub mod mock_wiki;

pub use mock_wiki::{MockResponse, MockWiki};
