//! Library side of the `scribe` binary: configuration loading and merging.

pub mod config;
