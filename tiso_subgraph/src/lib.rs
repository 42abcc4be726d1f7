//! Temporal and plain subgraph isomorphism counting.
//!
//! A [`Solver`] (or [`TemporalSolver`]) counts every occurrence of a small
//! query graph in a large target. Before searching it computes per-node
//! [`Domains`], a [`MatchingMachine`] fixing the node processing order, and
//! [`SymmetryConditions`] from the query's automorphisms so that each orbit of
//! equivalent matches is counted once. The temporal variant additionally
//! compares contact timing within a window `delta`.

pub mod automorphism;
mod constraints;
pub mod domain;
pub mod graph;
pub mod machine;
mod search;
mod solver;
pub mod temporal;
pub mod test_harness;

pub use automorphism::{Automorphism, SymmetryConditions, find_automorphisms, find_temporal_automorphisms};
pub use domain::{Domains, NodeSet};
pub use graph::{Contact, Graph, GraphError, NodeId, TemporalGraph, Timestamp};
pub use machine::{BackEdge, MatchingMachine, ParentRelation, StateId};
pub use search::SearchStats;
pub use solver::{Solver, TemporalSolver};
pub use temporal::{Conditions, TemporalStructure, test_compatibility, test_map};
