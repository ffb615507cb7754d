use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use toml_edit::ser::to_string_pretty;
use tracing::{event, info_span, Level};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use tablesynth::bench::{bench, BenchCommand};
use tablesynth::cli::{init_tracing, load_config};
use tablesynth::config::SynthConfig;
use tablesynth::search::split::HalfSolution;
use tablesynth::search::{SearchOutcome, Solution};
use tablesynth::table::{format_bits, InputCount};
use tablesynth::transform::display::TransformResultDisplay;
use tablesynth::worker::{spawn_search, spawn_transform};

#[derive(Debug, Clone, Subcommand)]
pub enum SynthCommands {
    /// Write a default config file
    New { config: Option<PathBuf> },
    /// Find expressions for one term, e.g. `0110` or `01a0`
    Search {
        term: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Find cheap invertible transforms of several output terms
    Transform {
        #[arg(required = true)]
        terms: Vec<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the cost dictionary for an input count
    Table {
        input_count: u8,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    Bench(BenchCommand),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct SynthParams {
    #[command(subcommand)]
    command: SynthCommands,
}

fn main() -> anyhow::Result<()> {
    let params = SynthParams::parse();
    match params.command {
        SynthCommands::New { config } => {
            new(config.unwrap_or(PathBuf::from("./tablesynth.toml")))
        }
        SynthCommands::Search { term, config } => search(term, config),
        SynthCommands::Transform { terms, config } => transform(terms, config),
        SynthCommands::Table {
            input_count,
            config,
        } => table(input_count, config),
        SynthCommands::Bench(cmd) => bench(cmd),
    }
}

fn new(path: PathBuf) -> anyhow::Result<()> {
    fs::write(path, to_string_pretty(&SynthConfig::default())?)?;
    Ok(())
}

fn setup(config: Option<PathBuf>) -> anyhow::Result<SynthConfig> {
    let config = load_config(config)?;
    init_tracing(Level::from(config.meta.log_level))?;
    Ok(config)
}

fn search(term: String, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = setup(config)?;
    let params = config.resolve_search(&term)?;
    let width = params.input_count.width();
    match spawn_search(&params)?.wait()? {
        SearchOutcome::Direct(solutions) => {
            event!(Level::INFO, "Search successful :)");
            print_solutions(&solutions);
        }
        SearchOutcome::Split(split) => {
            event!(Level::WARN, "No direct expression, split into two halves");
            print_half("first", &split.first, width);
            print_half("second", &split.second, width);
        }
        SearchOutcome::Unresolvable => {
            event!(Level::ERROR, "Search unsuccessful :(");
        }
    }
    Ok(())
}

fn print_solutions(solutions: &[Solution]) {
    let Some(best) = solutions.first().map(|s| s.depth()) else {
        return;
    };
    for s in solutions {
        let label = if s.depth() == best {
            s.label.green()
        } else {
            s.label.normal()
        };
        let payloads = s.payloads.join(", ");
        println!("{} {label}  [{payloads}]", s.depth().to_string().yellow());
    }
}

fn print_half(name: &str, half: &HalfSolution, width: u32) {
    println!(
        "{} {} (cost {})",
        name.bold(),
        format_bits(half.target, width),
        half.cost
    );
    match &half.solutions {
        Some(solutions) => print_solutions(solutions),
        None => println!("  {}", "no expression within the depth limit".red()),
    }
}

fn transform(terms: Vec<String>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = setup(config)?;
    let params = config.resolve_transform(&terms)?;
    let input_count = params.input_count;
    let span = info_span!("transform", outputs = terms.len());
    let _enter = span.enter();
    let report = spawn_transform(&params)?.wait_with(|p| span.pb_set_message(&p.to_string()))?;
    event!(
        Level::INFO,
        "{} usable combinations, {} transforms accepted",
        report.good_terms,
        report.progress
    );
    if report.results.is_empty() {
        event!(Level::ERROR, "No invertible transform found :(");
    }
    for result in &report.results {
        println!(
            "{}",
            TransformResultDisplay {
                result,
                input_count,
            }
        );
    }
    Ok(())
}

fn table(input_count: u8, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = setup(config)?;
    let input_count = InputCount::new(input_count)?;
    let (_, dictionary) = config.load_catalog(input_count)?;
    let mut entries: Vec<(u32, u32)> = dictionary.masked(0).into_iter().collect();
    entries.sort_by_key(|(value, cost)| (*cost, *value));
    for (value, cost) in &entries {
        println!("{} {}", format_bits(*value, input_count.width()), cost);
    }
    event!(
        Level::INFO,
        "{} of {} tables reachable",
        entries.len(),
        1u64 << input_count.width()
    );
    Ok(())
}
