//! Per-node statistics over contact times.
//!
//! Two fingerprints are used. A [`TemporalStructure`] describes a node as seen
//! from one incident contact and is compared along query back-edges during the
//! search. [`Conditions`] describe, for each incoming contact of a node, how its
//! outgoing contacts follow in time; they decide domain membership and the final
//! acceptance of a temporal match.

mod conditions;
mod structure;

pub use self::conditions::{Conditions, node_conditions, test_compatibility, test_map};
pub(crate) use self::conditions::conditions_compatible;
pub use self::structure::TemporalStructure;
