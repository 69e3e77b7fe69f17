//! Embeddable adjustment engine for scribe.
//!
//! Provides a clap-free, I/O-abstracted entry point: the CLI is one host,
//! tests and other tools can drive the same pipeline with in-memory ports.
//!
//! # Port traits
//!
//! Everything outside the engine sits behind traits in [`ports`]:
//! - [`SearchPort`](ports::SearchPort) finds documents matching a query
//! - [`StorePort`](ports::StorePort) persists adjusted documents
//! - [`ChroniclePort`](ports::ChroniclePort) records the chronicle state
//!
//! The [`adapters`] module provides chronicle-directory and in-memory
//! implementations.
//!
//! # Entry point
//!
//! - [`run_adjust`](pipeline::run_adjust) processes a batch of adjustment
//!   files and either persists the result or returns dry-run diffs.

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod query;
pub mod report;
pub mod settings;
pub mod tracker;
pub mod validate;

pub use error::AdjustIssue;
pub use pipeline::{AdjustOutcome, AdjustPorts, run_adjust};
pub use settings::AdjustSettings;

// Re-exported so embedders don't need scribe-actions directly.
pub use scribe_actions::{Action, ActionRegistry};
