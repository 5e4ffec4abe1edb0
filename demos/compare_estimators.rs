//! End-to-end sketch: build a corpus in memory, rank it both ways, compare.
//!
//! ```bash
//! cargo run --example compare_estimators
//! cargo run --example compare_estimators -- path/to/corpus
//! ```
//!
//! With a directory argument the corpus is crawled from its `*.html` files; otherwise a small
//! built-in corpus is used.

use surfrank::report::{self, DEFAULT_DECIMALS};
use surfrank::{
    crawl, iterate_pagerank_run, sample_pagerank, Corpus, PageRankConfig, SampleConfig,
};

fn builtin() -> surfrank::Result<Corpus> {
    Corpus::new([
        ("ai.html", vec!["algorithms.html", "inference.html"]),
        ("algorithms.html", vec!["programming.html", "recursion.html"]),
        ("c.html", vec!["programming.html"]),
        ("inference.html", vec!["ai.html"]),
        ("logic.html", vec!["inference.html"]),
        ("programming.html", vec!["c.html", "python.html"]),
        ("python.html", vec!["ai.html", "programming.html"]),
        ("recursion.html", vec![]),
    ])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = match std::env::args().nth(1) {
        Some(dir) => crawl(dir)?,
        None => builtin()?,
    };
    println!(
        "Corpus: {} pages, {} links, dangling: {:?}\n",
        corpus.len(),
        corpus.edge_count(),
        corpus.dangling_pages().collect::<Vec<_>>()
    );

    let cfg = PageRankConfig::default();
    let run = iterate_pagerank_run(&corpus, cfg)?;
    println!(
        "{}(converged={} after {} rounds)\n",
        report::render(report::iteration_title(), &run.scores, DEFAULT_DECIMALS),
        run.converged,
        run.rounds
    );

    for samples in [1_000usize, 10_000, 100_000] {
        let sampled = sample_pagerank(
            &corpus,
            SampleConfig { damping: cfg.damping, samples, seed: 7 },
        )?;
        let diff = run.scores.max_abs_diff(&sampled).unwrap_or(f64::NAN);
        println!("n = {samples:>6}: max |sample - iterate| = {diff:.4}");
    }

    println!();
    print!(
        "{}",
        report::render_top("Top 3 pages", &run.scores, 3, DEFAULT_DECIMALS)
    );
    Ok(())
}
