use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{event, info_span, Level};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::cli::{init_tracing, load_config};
use crate::search::builder::SearchParamsBuilder;
use crate::search::SearchOutcome;
use crate::table::InputCount;

/// Runs the expression search for every truth table over `input_count`
/// inputs (or the first `limit` of them) and reports how they resolved.
#[derive(Clone, Debug, Parser)]
pub struct BenchCommand {
    input_count: u8,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    limit: Option<u64>,
}

#[derive(Debug, Default)]
struct Tally {
    direct: usize,
    split: usize,
    unresolvable: usize,
}

pub fn bench(cmd: BenchCommand) -> anyhow::Result<()> {
    let config = load_config(cmd.config.as_ref())?;
    init_tracing(Level::from(config.meta.log_level))?;
    let input_count = InputCount::new(cmd.input_count)?;
    let (catalog, dictionary) = config.load_catalog(input_count)?;
    let total = 1u64 << input_count.width();
    let limit = cmd.limit.map_or(total, |l| l.min(total));

    let span = info_span!("bench", inputs = %input_count);
    span.pb_set_length(limit);
    let _enter = span.enter();
    let start = Instant::now();
    let mut tally = Tally::default();
    for target in 0..limit {
        let mut b = SearchParamsBuilder::default();
        if let Some(depth) = config.search.max_depth {
            b.max_depth(depth);
        }
        let params = b
            .input_count(input_count)
            .target(target as u32)
            .catalog(Arc::clone(&catalog))
            .dictionary(Arc::clone(&dictionary))
            .build()?;
        match params.build()?.run() {
            SearchOutcome::Direct(_) => tally.direct += 1,
            SearchOutcome::Split(_) => tally.split += 1,
            SearchOutcome::Unresolvable => tally.unresolvable += 1,
        }
        span.pb_inc(1);
    }
    event!(
        Level::INFO,
        "bench_done: {} tables in {:?}, {:?}",
        limit,
        start.elapsed(),
        tally
    );
    println!(
        "{} direct, {} split, {} unresolvable in {:.2?}",
        tally.direct,
        tally.split,
        tally.unresolvable,
        start.elapsed()
    );
    Ok(())
}
