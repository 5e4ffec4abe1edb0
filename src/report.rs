//! Plain-text rendering of ranking results.

use crate::distribution::Distribution;
use std::fmt::Write as _;

/// Decimal places of the default report.
pub const DEFAULT_DECIMALS: usize = 4;

/// Render `title` followed by one `"  page: value"` line per page, sorted by page.
pub fn render(title: &str, ranks: &Distribution, decimals: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for (page, value) in ranks.iter() {
        let _ = writeln!(out, "  {page}: {value:.decimals$}");
    }
    out
}

/// Title of a sampling report. More than one trial is named along with the per-walk count.
pub fn sampling_title(samples: usize, trials: usize) -> String {
    if trials > 1 {
        format!("PageRank Results from Sampling (n = {samples}, {trials} trials)")
    } else {
        format!("PageRank Results from Sampling (n = {samples})")
    }
}

pub fn iteration_title() -> &'static str {
    "PageRank Results from Iteration"
}

/// Render the `k` highest-ranked pages, best first, numbered from 1.
pub fn render_top(title: &str, ranks: &Distribution, k: usize, decimals: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for (i, (page, value)) in ranks.top_k(k).into_iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {page}: {value:.decimals$}", i + 1);
    }
    out
}
