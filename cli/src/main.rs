use anyhow::Result;
use clap::{Parser, Subcommand};
use larder_core::corpus::load_corpus;
use larder_core::{InvertedIndex, RankOrder};
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

mod shell;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Search a recipe corpus by keyword", long_about = None)]
struct Cli {
    /// Corpus path: a JSON/JSONL file or a directory of them
    #[arg(long, global = true, default_value = "./recipes.json")]
    corpus: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single query and print matching titles
    Search {
        /// relevance (normal), simple or healthy
        #[arg(long, default_value = "relevance")]
        ordering: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Prompt for ordering, count and queries until end of input
    Shell,
    /// Print index statistics
    Stats,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    // Parse the ordering before paying for the index build.
    let order = match &cli.command {
        Commands::Search { ordering, .. } => Some(ordering.parse::<RankOrder>()?),
        _ => None,
    };

    let build_time = Instant::now();
    let index = InvertedIndex::build(load_corpus(&cli.corpus)?);
    let build_time = build_time.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Search { count, query, .. } => {
            let order = order.unwrap_or_default();
            shell::print_results(&index, &query.join(" "), order, count, &mut out)?;
        }
        Commands::Shell => {
            writeln!(out, "Build Time: {:.6}", build_time.as_secs_f64())?;
            let stdin = io::stdin();
            shell::run(&index, stdin.lock(), &mut out)?;
        }
        Commands::Stats => {
            let stats = index.stats();
            writeln!(out, "documents: {}", stats.num_docs)?;
            writeln!(out, "terms:     {}", stats.num_terms)?;
            writeln!(out, "postings:  {}", stats.num_postings)?;
            writeln!(out, "build:     {:.3}s", build_time.as_secs_f64())?;
        }
    }
    Ok(())
}
