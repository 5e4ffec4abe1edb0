//! Corpus loading from a directory of HTML pages.

use crate::graph::Corpus;
use crate::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, trace, warn};
use walkdir::WalkDir;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// `href` targets of every `<a>` tag in `html`, deduplicated and sorted.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build a corpus from the `*.html` files directly inside `dir`.
///
/// Page identifiers are file names. Self links and links to anything that is not a page of the
/// corpus are dropped. Symlinked pages are followed. Files whose name or content is not valid
/// UTF-8 are skipped with a warning.
pub fn crawl(dir: impl AsRef<Path>) -> Result<Corpus> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping page whose name is not valid UTF-8");
            continue;
        };
        let bytes = std::fs::read(entry.path()).map_err(|source| Error::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let Ok(html) = String::from_utf8(bytes) else {
            warn!(path = %entry.path().display(), "skipping page that is not valid UTF-8");
            continue;
        };
        let mut links = extract_links(&html);
        links.remove(name);
        pages.insert(name.to_string(), links);
    }

    let names: BTreeSet<String> = pages.keys().cloned().collect();
    for (page, links) in pages.iter_mut() {
        links.retain(|link| {
            let keep = names.contains(link);
            if !keep {
                trace!(page = %page, link = %link, "dropping link outside the corpus");
            }
            keep
        });
    }

    let corpus = Corpus::new(pages)?;
    info!(
        dir = %dir.display(),
        pages = corpus.len(),
        links = corpus.edge_count(),
        "crawled corpus"
    );
    Ok(corpus)
}
