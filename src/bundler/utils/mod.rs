//! Shared helpers for the bundler pipeline.

pub mod fs;
pub mod http;
