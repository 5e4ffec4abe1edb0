//! surfrank CLI
//!
//! Rank the HTML pages of a directory with both estimators.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use surfrank::report::{self, DEFAULT_DECIMALS};
use surfrank::{
    crawl, iterate_pagerank_run, sample_pagerank, sample_pagerank_trials, PageRankConfig,
    SampleConfig,
};

#[derive(Debug, Parser)]
#[command(name = "surfrank", version, about = "PageRank for a directory of HTML pages")]
struct Cli {
    /// Directory containing the corpus (*.html files)
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(short, long, default_value_t = 0.85, env = "SURFRANK_DAMPING")]
    damping: f64,

    /// Steps of the random surfer
    #[arg(short = 'n', long, default_value_t = 10_000)]
    samples: usize,

    /// RNG seed for the sampler
    #[arg(long, default_value_t = 42, env = "SURFRANK_SEED")]
    seed: u64,

    /// Independent sampling walks to average
    #[arg(long, default_value_t = 1)]
    trials: usize,

    /// Convergence threshold of the iterative solver
    #[arg(long, default_value_t = surfrank::pagerank::DEFAULT_PRECISION)]
    precision: f64,

    /// Stop the iterative solver after this many rounds
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Print values as percentages (sum 100) instead of probabilities
    #[arg(long)]
    percent: bool,

    /// Also print the K highest-ranked pages of the iterative result
    #[arg(long, value_name = "K")]
    top: Option<usize>,

    /// Decimal places in the output
    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let corpus = crawl(&cli.corpus)
        .with_context(|| format!("failed to load corpus from {}", cli.corpus.display()))?;

    let sample_cfg = SampleConfig {
        damping: cli.damping,
        samples: cli.samples,
        seed: cli.seed,
    };
    let sampled = if cli.trials == 1 {
        sample_pagerank(&corpus, sample_cfg)
    } else {
        sample_pagerank_trials(&corpus, sample_cfg, cli.trials)
    }
    .context("sampling failed")?;

    let run = iterate_pagerank_run(
        &corpus,
        PageRankConfig {
            damping: cli.damping,
            precision: cli.precision,
            max_rounds: cli.max_rounds,
        },
    )
    .context("iteration failed")?;
    if !run.converged {
        eprintln!("warning: iteration stopped after {} rounds without converging", run.rounds);
    }

    let (sampled, iterated) = if cli.percent {
        (sampled.to_percentages(), run.scores.to_percentages())
    } else {
        (sampled, run.scores)
    };

    print!(
        "{}",
        report::render(
            &report::sampling_title(cli.samples, cli.trials),
            &sampled,
            cli.decimals
        )
    );
    print!(
        "{}",
        report::render(report::iteration_title(), &iterated, cli.decimals)
    );
    if let Some(k) = cli.top {
        print!(
            "{}",
            report::render_top("Top pages (iteration)", &iterated, k, cli.decimals)
        );
    }

    Ok(())
}
