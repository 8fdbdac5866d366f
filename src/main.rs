//! `shape-census`: run the full enumeration and optionally persist it.
//!
//! Zero positional args: compute and print summary statistics. One arg
//! (a filename): compute, print the summary, and persist the result.

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use shape_census::config::Config;
use shape_census::enumerator;
use shape_census::persist::{self, Dump};
use shape_census::summary::Summary;

/// Enumerate every creatable shape for a validated (layers, parts) configuration.
#[derive(Parser)]
struct Args {
    /// Destination for the binary dump (§6). If omitted, nothing is persisted.
    output: Option<String>,

    /// Number of layers. Only (4,4) and (5,4) pairs with --parts are accepted.
    #[arg(long, default_value_t = 4)]
    layers: u8,

    /// Number of parts per layer.
    #[arg(long, default_value_t = 4)]
    parts: u8,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the summary as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    if !Config::PRODUCTION.contains(&(args.layers, args.parts)) {
        anyhow::bail!(
            "unsupported configuration (layers={}, parts={}); supported: {:?}",
            args.layers,
            args.parts,
            Config::PRODUCTION
        );
    }
    let cfg = Config::new(args.layers, args.parts)
        .context("validated (layers, parts) pair failed to construct a Config")?;

    let start = Instant::now();
    let output = enumerator::run(cfg);
    let elapsed = start.elapsed();

    let summary = Summary::new(&output, elapsed);
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("{summary}");
    }

    if let Some(path) = args.output {
        let mut halves: Vec<_> = output.halves.iter().collect();
        halves.sort_unstable();
        let mut shapes: Vec<_> = output.shapes.into_iter().collect();
        shapes.sort_unstable();

        let file = File::create(&path).with_context(|| format!("failed to create {path}"))?;
        persist::write(BufWriter::new(file), &Dump { halves, shapes })
            .with_context(|| format!("failed to write dump to {path}"))?;
        log::info!("wrote dump to {path}");
    }

    Ok(())
}
