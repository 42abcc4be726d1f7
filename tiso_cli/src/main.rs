#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use args::{Args, Command, MatchArgs, SampleArgs};
use clap::Parser;
use tiso_cli::{io as files, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Match(m) => run_match(&m),
        Command::Sample(s) => run_sample(&s),
    }
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn run_match(args: &MatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config();
    info!(?config, temporal = args.temporal, delta = args.delta, "matching");

    let reports = if args.temporal {
        let target = files::read_temporal_graph(&args.target)?;
        let queries = files::read_temporal_queries(&args.queries)?;
        run::match_temporal_queries(&target, &queries, &config, args.delta)
    } else {
        let target = files::read_graph(&args.target)?;
        let queries = files::read_queries(&args.queries)?;
        run::match_queries(&target, &queries, &config)
    };

    files::write_reports(open_output(args.output.as_deref())?, &reports)?;
    Ok(())
}

fn run_sample(args: &SampleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let plan = args.to_plan();
    let output = open_output(args.output.as_deref())?;
    if args.temporal {
        let graph = files::read_temporal_graph(&args.graph)?;
        let queries = run::sample_queries(&graph, &plan);
        info!(drawn = queries.len(), "sampled");
        files::write_temporal_queries(output, &queries)?;
    } else {
        let graph = files::read_graph(&args.graph)?;
        let queries = run::sample_queries(&graph, &plan);
        info!(drawn = queries.len(), "sampled");
        files::write_queries(output, &queries)?;
    }
    Ok(())
}
