//! File formats and batch drivers behind the `tiso` binary.
//!
//! [`io`] reads edge-list graphs and query files and writes result tables;
//! [`run`] matches query batches against a target and draws random query
//! samples out of a graph.

pub mod io;
pub mod run;
