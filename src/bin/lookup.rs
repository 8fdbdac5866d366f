//! `shape-lookup`: decide whether a shape is creatable against a dump
//! produced by `shape-census`.
//!
//! One positional argument (the dump file path) plus either a positional
//! shape string or `--stdin` for newline-separated batch lookups. Prints
//! `creatable` / `not creatable` per input line.
//!
//! A shape is creatable iff `combinable(s)` over the dump's halves is true,
//! or its canonical form is a member of the dump's `shapes`.

use std::fs::File;
use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;

use shape_census::config::Config;
use shape_census::enumerator;
use shape_census::persist;
use shape_census::sets::{self, HalfIndex, ShapeSet};
use shape_census::symmetry;
use shape_census::textual;

#[derive(Parser)]
struct Args {
    /// Path to a dump file written by `shape-census`.
    dump: String,

    /// A single shape string to look up.
    shape: Option<String>,

    /// Read newline-separated shape strings from stdin instead.
    #[arg(long)]
    stdin: bool,

    #[arg(long, default_value_t = 4)]
    layers: u8,

    #[arg(long, default_value_t = 4)]
    parts: u8,
}

fn is_creatable(cfg: Config, halves: &HalfIndex, shapes: &ShapeSet, text: &str) -> anyhow::Result<bool> {
    let shape = textual::parse(cfg, text).with_context(|| format!("parsing {text:?}"))?;
    let canon = symmetry::canonical(cfg, shape);
    Ok(enumerator::combinable(cfg, halves, canon, None) || shapes.contains(&canon))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = Config::new(args.layers, args.parts).context("invalid (layers, parts) pair")?;

    let file = File::open(&args.dump).with_context(|| format!("opening {}", args.dump))?;
    let dump = persist::read(file).with_context(|| format!("reading {}", args.dump))?;

    let mut halves = HalfIndex::new();
    for half in dump.halves {
        halves.insert(half);
    }
    let mut shapes = sets::shape_set();
    shapes.extend(dump.shapes);

    if args.stdin {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match is_creatable(cfg, &halves, &shapes, line.trim()) {
                Ok(true) => println!("creatable"),
                Ok(false) => println!("not creatable"),
                Err(e) => println!("error: {e}"),
            }
        }
    } else {
        let text = args.shape.context("expected a shape argument or --stdin")?;
        if is_creatable(cfg, &halves, &shapes, &text)? {
            println!("creatable");
        } else {
            println!("not creatable");
        }
    }

    Ok(())
}
