//! Drift binaries - shared CLI and startup helpers

pub mod common;
