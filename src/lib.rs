//! Library entry for product-explorer exposing core logic for integration tests.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod favorites;
pub mod logic;
pub mod sources;
pub mod state;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test_utils;
