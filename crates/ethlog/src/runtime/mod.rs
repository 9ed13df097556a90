//! Runtime module — boot (logging, config) and run orchestration.

pub mod boot;
pub mod run;

pub use run::{run, RunError, RunSummary};
