//! `surfrank`: PageRank over a closed corpus of hyperlinked pages.
//!
//! Two independent estimators of the same stationary distribution:
//! - [`sample_pagerank`]: a random surfer walking the corpus under the damped transition model,
//!   counting visits.
//! - [`iterate_pagerank`]: the PageRank fixed-point equation applied in synchronous rounds until
//!   no page moves by more than the precision threshold.
//!
//! Public invariants (must not drift):
//! - **Page order**: pages are indexed `0..n` in sorted-by-identifier order, and every
//!   [`Distribution`] iterates in that order.
//! - **Scale**: both estimators return probability form (values sum to 1). Percent form is an
//!   explicit conversion ([`Distribution::to_percentages`], [`Scale::Percent`]).
//! - **Determinism**: the solver is deterministic given identical inputs + configs; the sampler is
//!   deterministic given an identical seed (or identical injected RNG state).
//! - **Dangling pages**: a page without out-links is uniform in the transition model, and its rank
//!   is *not* redistributed by the solver (it leaks). See [`pagerank`] for details.

pub mod crawl;
pub mod distribution;
pub mod graph;
pub mod normalize;
pub mod pagerank;
pub mod random_walk;
pub mod report;
pub mod transition;

pub use crawl::{crawl, extract_links};
pub use distribution::Distribution;
pub use graph::{Corpus, GraphRef};
pub use normalize::{normalize, normalize_scores, Scale};
pub use pagerank::{iterate_pagerank, iterate_pagerank_run, PageRankConfig, PageRankRun};
pub use random_walk::{
    sample_pagerank, sample_pagerank_trials, sample_pagerank_with_rng, sample_visits_with_rng,
    SampleConfig,
};
pub use transition::transition_model;

#[cfg(feature = "parallel")]
pub use random_walk::sample_pagerank_trials_parallel;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("corpus has no pages")]
    EmptyCorpus,
    #[error("unknown page: {0}")]
    UnknownPage(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("total weight is zero")]
    ZeroWeight,
    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn check_damping(damping: f64, allow_one: bool) -> Result<()> {
    let in_range = if allow_one {
        (0.0..=1.0).contains(&damping)
    } else {
        (0.0..1.0).contains(&damping)
    };
    if !damping.is_finite() || !in_range {
        let bound = if allow_one { "[0, 1]" } else { "[0, 1)" };
        return Err(Error::InvalidParameter(format!(
            "damping must be in {bound} (got {damping})"
        )));
    }
    Ok(())
}
