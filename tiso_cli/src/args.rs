use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tiso_cli::run::SamplePlan;
use tiso_common::{ArcConsistency, Config, DEFAULT_PROGRESS_INTERVAL};

#[derive(Parser, Debug)]
#[command(name = "tiso")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count the occurrences of every query in a target graph
    Match(MatchArgs),
    /// Draw random subgraphs of a graph and write them as a queries file
    Sample(SampleArgs),
}

#[derive(clap::Args, Debug)]
pub struct MatchArgs {
    /// Target graph file
    #[arg(short, long)]
    pub target: PathBuf,

    /// Queries file
    #[arg(short, long)]
    pub queries: PathBuf,

    /// Results CSV (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read timed edges and compare contact timing
    #[arg(long)]
    pub temporal: bool,

    /// Time window for temporal matching
    #[arg(short, long, default_value_t = 0, requires = "temporal")]
    pub delta: i64,

    /// Count induced occurrences only
    #[arg(short, long)]
    pub induced: bool,

    /// Domain sweep strictness
    #[arg(short, long, value_enum, default_value_t = ArcConsistencyArg::SinglePass)]
    pub arc_consistency: ArcConsistencyArg,

    /// Count every automorphic image separately
    #[arg(long)]
    pub no_symmetry_breaking: bool,

    /// Log every N matches found (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,
}

impl MatchArgs {
    pub fn to_config(&self) -> Config {
        Config::builder()
            .induced(self.induced)
            .arc_consistency(self.arc_consistency.into())
            .symmetry_breaking(!self.no_symmetry_breaking)
            .progress_interval(self.progress_interval)
            .build()
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcConsistencyArg {
    #[value(name = "disabled")]
    Disabled,
    #[value(name = "single-pass")]
    SinglePass,
    #[value(name = "fixpoint")]
    Fixpoint,
}

impl From<ArcConsistencyArg> for ArcConsistency {
    fn from(arg: ArcConsistencyArg) -> Self {
        match arg {
            ArcConsistencyArg::Disabled => Self::Disabled,
            ArcConsistencyArg::SinglePass => Self::SinglePass,
            ArcConsistencyArg::Fixpoint => Self::Fixpoint,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// Graph to draw from
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Queries file to write (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read and write timed edges
    #[arg(long)]
    pub temporal: bool,

    /// Query sizes in nodes, comma separated
    #[arg(short = 'k', long, value_delimiter = ',', required = true)]
    pub sizes: Vec<usize>,

    /// Queries per size
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Seed of the first draw
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,

    /// Seeds tried per query before giving up on it
    #[arg(long, default_value_t = 100)]
    pub max_attempts: usize,

    /// One node per id band instead of a connected component
    #[arg(long)]
    pub stratified: bool,
}

impl SampleArgs {
    pub fn to_plan(&self) -> SamplePlan {
        SamplePlan {
            sizes: self.sizes.clone(),
            per_size: self.count,
            seed: self.seed,
            max_attempts: self.max_attempts,
            stratified: self.stratified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_flags_build_config() {
        let args = Args::try_parse_from([
            "tiso", "match", "-t", "g.txt", "-q", "q.txt", "--induced", "--arc-consistency", "fixpoint",
            "--no-symmetry-breaking",
        ])
        .unwrap();
        let Command::Match(m) = args.command else {
            panic!("expected match");
        };
        let cfg = m.to_config();
        assert!(cfg.induced);
        assert!(!cfg.symmetry_breaking);
        assert_eq!(cfg.arc_consistency, ArcConsistency::Fixpoint);
    }

    #[test]
    fn delta_requires_temporal() {
        assert!(Args::try_parse_from(["tiso", "match", "-t", "g", "-q", "q", "--delta", "5"]).is_err());
        assert!(Args::try_parse_from(["tiso", "match", "-t", "g", "-q", "q", "--temporal", "--delta", "5"]).is_ok());
    }

    #[test]
    fn sample_sizes_split_on_commas() {
        let args = Args::try_parse_from(["tiso", "sample", "-g", "g.txt", "-k", "3,4,5", "-n", "2"]).unwrap();
        let Command::Sample(s) = args.command else {
            panic!("expected sample");
        };
        let plan = s.to_plan();
        assert_eq!(plan.sizes, vec![3, 4, 5]);
        assert_eq!(plan.per_size, 2);
        assert!(!plan.stratified);
    }
}
