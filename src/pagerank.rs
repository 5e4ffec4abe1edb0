//! PageRank by fixed-point iteration.
//!
//! Every page starts at `1/N`. Each round computes, for every page `p`, a candidate
//! \[
//!   r'(p) = \frac{1 - d}{N} + d \sum_{q \to p} \frac{r(q)}{|\mathrm{links}(q)|}
//! \]
//! from the previous round's ranks only. A candidate is committed only when it differs from the
//! current rank by more than `precision`; pages within the threshold keep their old value and
//! that old value is what other pages read in later rounds. The run ends after the first round
//! that commits nothing.
//!
//! Dangling pages are not special-cased: they never appear in an inbound sum, so their rank mass
//! leaks instead of being redistributed, and the raw ranks sum to less than 1. Textbook PageRank
//! spreads dangling mass uniformly instead. The final normalization restores a total of 1;
//! [`PageRankRun::raw_mass`] reports how much mass was left before it.

use crate::distribution::Distribution;
use crate::graph::{Corpus, GraphRef};
use crate::normalize::{normalize_scores, Scale};
use crate::{check_damping, Error, Result};
use tracing::{debug, warn};

/// Default convergence threshold.
pub const DEFAULT_PRECISION: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    pub damping: f64,
    /// A candidate is committed only if it moves a page by more than this.
    pub precision: f64,
    /// Optional cap on rounds. `None` iterates until convergence.
    pub max_rounds: Option<usize>,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, precision: DEFAULT_PRECISION, max_rounds: None }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping, false)?;
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "precision must be finite and > 0 (got {})",
                self.precision
            )));
        }
        if self.max_rounds == Some(0) {
            return Err(Error::InvalidParameter(
                "max_rounds must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankRun {
    /// Normalized ranks (probability form).
    pub scores: Distribution,
    /// Sum of the ranks before normalization. Below 1 when dangling pages leak mass.
    pub raw_mass: f64,
    /// Rounds evaluated, including the final round that committed nothing.
    pub rounds: usize,
    /// `false` only when `max_rounds` stopped the run first.
    pub converged: bool,
}

/// Iterative PageRank with the default precision and no round cap.
pub fn iterate_pagerank(corpus: &Corpus, damping: f64) -> Result<Distribution> {
    let config = PageRankConfig { damping, ..PageRankConfig::default() };
    iterate_pagerank_run(corpus, config).map(|run| run.scores)
}

pub fn iterate_pagerank_run(corpus: &Corpus, config: PageRankConfig) -> Result<PageRankRun> {
    corpus.ensure_non_empty()?;
    config.validate()?;

    let inbound = corpus.inbound_index();
    let (mut ranks, rounds, converged) = solve(corpus, &inbound, config);
    if !converged {
        warn!(rounds, "pagerank stopped at max_rounds before converging");
    }
    let raw_mass: f64 = ranks.iter().sum();
    debug!(rounds, raw_mass, "pagerank finished");
    normalize_scores(&mut ranks, Scale::Probability)?;
    Ok(PageRankRun {
        scores: Distribution::from_scores(corpus.pages(), &ranks),
        raw_mass,
        rounds,
        converged,
    })
}

/// Raw (unnormalized) ranks, rounds evaluated, and whether the run converged.
fn solve<G: GraphRef>(
    graph: &G,
    inbound: &[Vec<usize>],
    config: PageRankConfig,
) -> (Vec<f64>, usize, bool) {
    let n = graph.node_count();
    let n_f64 = n as f64;
    let teleport = (1.0 - config.damping) / n_f64;
    let out_degrees: Vec<usize> = (0..n).map(|i| graph.out_degree(i)).collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut candidate = vec![0.0; n];
    let mut rounds = 0usize;

    loop {
        rounds += 1;
        for (p, sources) in inbound.iter().enumerate() {
            // Every q in `sources` links to p, so its out-degree is >= 1.
            let acc: f64 = sources
                .iter()
                .map(|&q| ranks[q] / out_degrees[q] as f64)
                .sum();
            candidate[p] = teleport + config.damping * acc;
        }

        let mut committed = 0usize;
        for (r, &c) in ranks.iter_mut().zip(candidate.iter()) {
            if (*r - c).abs() > config.precision {
                *r = c;
                committed += 1;
            }
        }
        debug!(round = rounds, committed, "pagerank round");

        if committed == 0 {
            return (ranks, rounds, true);
        }
        if config.max_rounds.is_some_and(|cap| rounds >= cap) {
            return (ranks, rounds, false);
        }
    }
}
