//! Random-surfer sampling estimator.
//!
//! A single walk of `samples` steps: start on a uniformly chosen page, then repeatedly draw the
//! next page from the transition model and count the visit. Visit counts normalized to
//! probability form estimate the stationary distribution; the estimate is noisy and only
//! converges as `samples` grows.

use crate::distribution::Distribution;
use crate::graph::{Corpus, GraphRef};
use crate::normalize::{normalize_scores, Scale};
use crate::transition::transition_row;
use crate::{check_damping, Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleConfig {
    /// Probability of following an out-link rather than jumping uniformly.
    pub damping: f64,
    /// Number of steps (and therefore recorded visits) in the walk.
    pub samples: usize,
    /// Seed for the deterministic RNG.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self { damping: 0.85, samples: 10_000, seed: 42 }
    }
}

impl SampleConfig {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping, false)?;
        check_samples(self.samples)
    }
}

fn check_samples(samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(Error::InvalidParameter("samples must be >= 1".to_string()));
    }
    Ok(())
}

/// Sampling estimate seeded from `config.seed`.
pub fn sample_pagerank(corpus: &Corpus, config: SampleConfig) -> Result<Distribution> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    sample_pagerank_with_rng(corpus, config.damping, config.samples, &mut rng)
}

/// Sampling estimate drawing from a caller-supplied RNG.
pub fn sample_pagerank_with_rng<R: Rng>(
    corpus: &Corpus,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Distribution> {
    let visits = sample_visits_with_rng(corpus, damping, samples, rng)?;
    let mut scores: Vec<f64> = visits.iter().map(|&c| c as f64).collect();
    normalize_scores(&mut scores, Scale::Probability)?;
    Ok(Distribution::from_scores(corpus.pages(), &scores))
}

/// Raw visit counters of one walk, indexed like [`Corpus::pages`]. They sum to `samples`.
pub fn sample_visits_with_rng<R: Rng>(
    corpus: &Corpus,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<u64>> {
    corpus.ensure_non_empty()?;
    check_damping(damping, false)?;
    check_samples(samples)?;

    debug!(pages = corpus.len(), damping, samples, "starting random surfer");
    let visits = walk_visits(corpus, damping, samples, rng);
    debug!(
        unvisited = visits.iter().filter(|&&c| c == 0).count(),
        "random surfer finished"
    );
    Ok(visits)
}

fn walk_visits<G: GraphRef, R: Rng>(
    graph: &G,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Vec<u64> {
    let n = graph.node_count();
    let mut visits = vec![0u64; n];
    let mut row = vec![0.0; n];
    let mut curr = rng.random_range(0..n);
    for _ in 0..samples {
        transition_row(graph, curr, damping, &mut row);
        curr = draw(&row, rng.random::<f64>());
        visits[curr] += 1;
    }
    visits
}

/// Cumulative scan: subtract each probability from `u` until it is non-positive.
///
/// If rounding leaves `u` positive after the scan, the last page absorbs the draw.
fn draw(row: &[f64], mut u: f64) -> usize {
    for (i, &p) in row.iter().enumerate() {
        u -= p;
        if u <= 0.0 {
            return i;
        }
    }
    row.len() - 1
}

/// Mean of `trials` independent walks; trial `t` is seeded with `config.seed + t`.
pub fn sample_pagerank_trials(
    corpus: &Corpus,
    config: SampleConfig,
    trials: usize,
) -> Result<Distribution> {
    check_trials(trials)?;
    config.validate()?;
    corpus.ensure_non_empty()?;
    log_trials_start(corpus, config, trials);
    let runs = (0..trials)
        .map(|t| trial_visits(corpus, config, t))
        .collect::<Vec<_>>();
    average_trials(corpus, &runs)
}

/// Parallel [`sample_pagerank_trials`].
///
/// Each trial owns its RNG, so the output does not depend on the thread count and equals the
/// sequential version.
#[cfg(feature = "parallel")]
pub fn sample_pagerank_trials_parallel(
    corpus: &Corpus,
    config: SampleConfig,
    trials: usize,
) -> Result<Distribution> {
    use rayon::prelude::*;

    check_trials(trials)?;
    config.validate()?;
    corpus.ensure_non_empty()?;
    log_trials_start(corpus, config, trials);
    let runs = (0..trials)
        .into_par_iter()
        .map(|t| trial_visits(corpus, config, t))
        .collect::<Vec<_>>();
    average_trials(corpus, &runs)
}

fn check_trials(trials: usize) -> Result<()> {
    if trials == 0 {
        return Err(Error::InvalidParameter("trials must be >= 1".to_string()));
    }
    Ok(())
}

fn trial_visits(corpus: &Corpus, config: SampleConfig, trial: usize) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(trial as u64));
    walk_visits(corpus, config.damping, config.samples, &mut rng)
}

fn log_trials_start(corpus: &Corpus, config: SampleConfig, trials: usize) {
    debug!(
        pages = corpus.len(),
        damping = config.damping,
        samples = config.samples,
        trials,
        "starting random surfer trials"
    );
}

fn average_trials(corpus: &Corpus, runs: &[Vec<u64>]) -> Result<Distribution> {
    let mut scores = vec![0.0; corpus.len()];
    // Trials are summed in trial order so the float result is order-stable.
    for visits in runs {
        for (s, &c) in scores.iter_mut().zip(visits) {
            *s += c as f64;
        }
    }
    debug!(
        trials = runs.len(),
        unvisited = scores.iter().filter(|&&c| c == 0.0).count(),
        "random surfer trials finished"
    );
    normalize_scores(&mut scores, Scale::Probability)?;
    Ok(Distribution::from_scores(corpus.pages(), &scores))
}
