//! rctrace - drive a recency cache from the command line
//!
//! Touches each key in order and prints the cache after every touch.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use recencycache::{CacheConfig, RecencyCache};
use std::io::{self, BufWriter, Read, Write};
use tracing::info;

use crate::render::{Format, Renderer};

/// Keys touched when none are given
const DEMO_KEYS: [&str; 5] = ["cow", "buffalo", "deer", "buffalo", "tiger"];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of keys)
    #[arg(short, long, default_value_t = CacheConfig::default().capacity)]
    capacity: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Read whitespace separated keys from stdin
    #[arg(long, conflicts_with = "keys")]
    stdin: bool,

    /// Keys to touch, in order
    keys: Vec<String>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the trace
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let keys = if args.stdin {
        read_keys(io::stdin().lock())?
    } else {
        keys_or_demo(args.keys)
    };

    let config = CacheConfig::new(args.capacity);
    let mut cache: RecencyCache =
        RecencyCache::from_config(&config).context("cannot build cache")?;
    info!(capacity = config.capacity, keys = keys.len(), "starting trace");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&mut cache, &keys, Renderer::new(args.format), &mut out)?;
    out.flush()?;

    info!(
        hits = cache.stats().hits(),
        misses = cache.stats().misses(),
        evictions = cache.stats().evictions(),
        "trace finished"
    );
    Ok(())
}

/// Touch every key and render the cache after each touch
fn run<W: Write>(
    cache: &mut RecencyCache,
    keys: &[String],
    renderer: Renderer,
    out: &mut W,
) -> Result<()> {
    renderer.start(out)?;
    for key in keys {
        let outcome = cache.touch(key);
        renderer.step(out, key, &outcome, cache)?;
    }
    renderer.finish(out, cache)?;
    Ok(())
}

fn keys_or_demo(keys: Vec<String>) -> Vec<String> {
    if keys.is_empty() {
        DEMO_KEYS.iter().map(|key| key.to_string()).collect()
    } else {
        keys
    }
}

fn read_keys<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("failed to read keys from stdin")?;
    Ok(input.split_whitespace().map(str::to_owned).collect())
}
