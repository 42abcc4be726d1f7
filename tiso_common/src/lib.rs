//! Common configuration and shared types for the TISO workspace.
//!
//! This crate provides the search configuration consumed by the matcher and
//! the per-query report record handed to result sinks.

mod config;
mod report;

pub use crate::config::*;
pub use crate::report::*;
