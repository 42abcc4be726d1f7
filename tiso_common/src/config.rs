//! Configuration for the subgraph isomorphism search.
//!
//! This module exposes a minimal, stable surface for consumers (for example,
//! the `tiso_cli` crate) to parameterize how matching should behave.
//!
//! The main concepts are:
//! - induced: whether target edges among matched nodes must be exactly the
//!   query's edges, or whether extra target edges are tolerated.
//! - arc_consistency: how hard the domain sweep works before the search starts.
//! - symmetry_breaking: whether automorphism-derived ordering constraints are
//!   enforced, collapsing symmetric occurrences into one.
//!
//! Quick examples
//!
//! Non-induced, single-pass arc consistency, symmetry breaking on (default):
//! ```
//! use tiso_common::Config;
//! let cfg = Config::default();
//! assert!(!cfg.induced);
//! ```
//!
//! Induced matching with the domain sweep iterated to a fixpoint:
//! ```
//! use tiso_common::{ArcConsistency, Config};
//! let cfg = Config::builder()
//!     .induced(true)
//!     .arc_consistency(ArcConsistency::Fixpoint)
//!     .build();
//! assert_eq!(cfg.arc_consistency, ArcConsistency::Fixpoint);
//! ```

use serde::{Deserialize, Serialize};

/// Matches between two consecutive "found N occurrences" log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000_000;

/// Global search configuration.
///
/// - induced:
///     - false => every query edge must have a target edge; extra target
///       edges among matched nodes are ignored.
///     - true  => additionally reject a candidate whose matched neighbours
///       outnumber the query back-edges of its state.
/// - arc_consistency: see [`ArcConsistency`].
/// - symmetry_breaking:
///     - true  => one occurrence per automorphism orbit is counted.
///     - false => every automorphic image is counted separately.
/// - progress_interval: log every N matches found (0 disables the log).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether to count induced occurrences only.
    pub induced: bool,
    /// Strictness of the domain sweep run before the search.
    pub arc_consistency: ArcConsistency,
    /// Whether automorphism-derived ordering constraints are enforced.
    pub symmetry_breaking: bool,
    /// Matches between two progress log lines, 0 disables them.
    pub progress_interval: u64,
}

impl Config {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(
        induced: bool,
        arc_consistency: ArcConsistency,
        symmetry_breaking: bool,
    ) -> Self {
        Self {
            induced,
            arc_consistency,
            symmetry_breaking,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Start a builder seeded with the default configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Convenience: induced matching, everything else default.
    #[must_use]
    pub const fn induced() -> Self {
        Self::new(true, ArcConsistency::SinglePass, true)
    }

    /// Convenience: non-induced matching, everything else default.
    #[must_use]
    pub const fn non_induced() -> Self {
        Self::new(false, ArcConsistency::SinglePass, true)
    }
}

impl Default for Config {
    /// Non-induced, single arc-consistency sweep, symmetry breaking enabled.
    fn default() -> Self {
        Self::non_induced()
    }
}

/// Control how far arc consistency is pushed when computing domains.
///
/// - Disabled:
///     Domains come from the degree (and temporal) filter alone.
/// - SinglePass:
///     Every query edge `qa -> qb` is swept once, dropping any `ra` from
///     `domain(qa)` without an out-neighbour in `domain(qb)`. Removals late in
///     the sweep are not propagated back to earlier query nodes.
/// - Fixpoint:
///     The sweep is repeated until no domain changes. Only prunes more; the
///     exhaustive search result is unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcConsistency {
    /// Skip the sweep.
    Disabled,
    /// One sweep over all query edges.
    #[default]
    SinglePass,
    /// Repeat the sweep until nothing changes.
    Fixpoint,
}

/// Chained construction of a [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Count induced occurrences only.
    #[must_use]
    pub const fn induced(mut self, induced: bool) -> Self {
        self.config.induced = induced;
        self
    }

    /// Set the arc-consistency strictness.
    #[must_use]
    pub const fn arc_consistency(mut self, level: ArcConsistency) -> Self {
        self.config.arc_consistency = level;
        self
    }

    /// Enable or disable automorphism-based symmetry breaking.
    #[must_use]
    pub const fn symmetry_breaking(mut self, enabled: bool) -> Self {
        self.config.symmetry_breaking = enabled;
        self
    }

    /// Log progress every `interval` matches (0 disables).
    #[must_use]
    pub const fn progress_interval(mut self, interval: u64) -> Self {
        self.config.progress_interval = interval;
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
