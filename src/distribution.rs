//! Distributions over pages.

use crate::normalize::Scale;
use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// A non-negative value per page, iterated in sorted-by-identifier order.
///
/// Estimators return probability form (sum 1); [`Distribution::to_percentages`] gives the
/// percent form used for display.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Distribution {
    values: BTreeMap<String, f64>,
}

impl Distribution {
    /// Pair page identifiers with values by position.
    pub(crate) fn from_scores(pages: &[String], scores: &[f64]) -> Self {
        debug_assert_eq!(pages.len(), scores.len());
        let values = pages
            .iter()
            .cloned()
            .zip(scores.iter().copied())
            .collect();
        Self { values }
    }

    pub fn get(&self, page: &str) -> Option<f64> {
        self.values.get(page).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(p, &v)| (p.as_str(), v))
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Rescale so the values sum to `scale.total()`.
    ///
    /// Returns `None` when the total is not positive (including an empty distribution), the same
    /// input [`normalize`](crate::normalize::normalize) rejects with [`Error::ZeroWeight`](crate::Error::ZeroWeight).
    pub fn rescaled(&self, scale: Scale) -> Option<Self> {
        let total = self.total();
        if total.is_nan() || total <= 0.0 {
            return None;
        }
        let target = scale.total();
        let values = self
            .values
            .iter()
            .map(|(p, &v)| (p.clone(), v / total * target))
            .collect();
        Some(Self { values })
    }

    /// Percent form of an estimator result. Estimator outputs always have a positive total; a
    /// distribution without one is returned unchanged.
    pub fn to_percentages(&self) -> Self {
        self.rescaled(Scale::Percent).unwrap_or_else(|| self.clone())
    }

    /// The `k` highest-valued pages, descending; ties break by identifier.
    ///
    /// Non-finite and non-positive values are skipped.
    pub fn top_k(&self, k: usize) -> Vec<(&str, f64)> {
        if k == 0 || self.values.is_empty() {
            return Vec::new();
        }
        // Min-heap on (score, Reverse(page)) so the weakest entry is evicted first.
        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (page, &score) in &self.values {
            if !score.is_finite() || score <= 0.0 {
                continue;
            }
            let Ok(s) = NotNan::new(score) else { continue };
            let entry = Reverse((s, Reverse(page.as_str())));
            if heap.len() < k {
                heap.push(entry);
            } else if let Some(weakest) = heap.peek() {
                if entry < *weakest {
                    heap.pop();
                    heap.push(entry);
                }
            }
        }
        let mut results: Vec<(&str, f64)> = heap
            .into_iter()
            .map(|Reverse((s, Reverse(p)))| (p, s.into_inner()))
            .collect();
        results.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        results
    }

    /// Largest absolute per-page difference, or `None` if the page sets differ.
    pub fn max_abs_diff(&self, other: &Distribution) -> Option<f64> {
        if self.values.len() != other.values.len() {
            return None;
        }
        let mut max = 0.0f64;
        for ((p, a), (q, b)) in self.values.iter().zip(other.values.iter()) {
            if p != q {
                return None;
            }
            max = max.max((a - b).abs());
        }
        Some(max)
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = (&'a String, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(String, f64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}
