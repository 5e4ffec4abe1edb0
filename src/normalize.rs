//! Normalization of non-negative weights into a distribution.

use crate::distribution::Distribution;
use crate::{Error, Result};

/// Target total of a normalized distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scale {
    /// Values sum to 1. This is what the estimators return.
    #[default]
    Probability,
    /// Values sum to 100.
    Percent,
}

impl Scale {
    pub fn total(self) -> f64 {
        match self {
            Scale::Probability => 1.0,
            Scale::Percent => 100.0,
        }
    }
}

/// Normalize index-aligned scores in place so they sum to `scale.total()`.
///
/// Weights must be finite and non-negative, and their sum must be positive.
pub fn normalize_scores(scores: &mut [f64], scale: Scale) -> Result<()> {
    for &w in scores.iter() {
        if !w.is_finite() || w < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "weights must be finite and non-negative (got {w})"
            )));
        }
    }
    let sum: f64 = scores.iter().sum();
    if sum <= 0.0 {
        return Err(Error::ZeroWeight);
    }
    let total = scale.total();
    for s in scores {
        *s = *s / sum * total;
    }
    Ok(())
}

/// Normalize a page weighting into a [`Distribution`] over the same pages.
///
/// A page appearing more than once keeps its last weight.
pub fn normalize<I, K>(weights: I, scale: Scale) -> Result<Distribution>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let merged: std::collections::BTreeMap<String, f64> = weights
        .into_iter()
        .map(|(k, w)| (k.into(), w))
        .collect();
    let pages: Vec<String> = merged.keys().cloned().collect();
    let mut scores: Vec<f64> = merged.into_values().collect();
    normalize_scores(&mut scores, scale)?;
    Ok(Distribution::from_scores(&pages, &scores))
}
