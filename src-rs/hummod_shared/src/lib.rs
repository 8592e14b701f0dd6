//! Shared utilities for the HumMod crates

pub mod error;
