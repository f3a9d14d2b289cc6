//! Shared library surface for the GRB server and its tests.

pub mod api;
pub mod config;
pub mod state;
