//! Damped random-surfer transition model.
//!
//! From page `u` with out-degree `k > 0`, the surfer moves to page `v` with probability
//! \[
//!   P(u \to v) = \frac{1 - d}{N} + [v \in \mathrm{links}(u)] \frac{d}{k}
//! \]
//! A dangling page (`k = 0`) has no link to spend the damped mass on, so the whole step is a
//! uniform jump: every page gets `1/N`.

use crate::distribution::Distribution;
use crate::graph::{Corpus, GraphRef};
use crate::{check_damping, Error, Result};

/// Next-page distribution from `page` under damping factor `damping` (in `[0, 1]`).
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> Result<Distribution> {
    corpus.ensure_non_empty()?;
    check_damping(damping, true)?;
    let node = corpus
        .page_index(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;

    let mut row = vec![0.0; corpus.len()];
    transition_row(corpus, node, damping, &mut row);
    Ok(Distribution::from_scores(corpus.pages(), &row))
}

/// Write the transition distribution out of `node` into `row` (length `node_count()`).
///
/// Parameters are assumed validated; this is the per-step kernel of the sampler and must not
/// allocate.
pub(crate) fn transition_row<G: GraphRef>(graph: &G, node: usize, damping: f64, row: &mut [f64]) {
    let n = graph.node_count();
    debug_assert_eq!(row.len(), n);
    let links = graph.neighbors_ref(node);
    if links.is_empty() {
        row.fill(1.0 / n as f64);
        return;
    }
    row.fill((1.0 - damping) / n as f64);
    let share = damping / links.len() as f64;
    for &v in links {
        row[v] += share;
    }
}
