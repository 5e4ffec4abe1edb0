//! Link graph: the corpus of pages and the adapter trait the ranking kernels run on.

use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A graph view that can return **borrowed** out-link slices.
///
/// Nodes are dense indices `0..node_count()`. The estimators are written against this trait so
/// that they never allocate a neighbor list per step.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// A closed corpus of pages and the set of other corpus pages each one links to.
///
/// Invariants enforced at construction:
/// - every link target is itself a page of the corpus,
/// - no page links to itself,
/// - page identifiers are unique.
///
/// Pages are indexed in sorted-by-identifier order; out-link lists are sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pages: Vec<String>,
    index: HashMap<String, usize>,
    links: Vec<Vec<usize>>,
}

impl Corpus {
    /// Build a corpus from `(page, links)` entries.
    ///
    /// Duplicate link targets collapse. An empty input yields an empty corpus, which every
    /// estimator rejects with [`Error::EmptyCorpus`].
    pub fn new<I, P, L, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in entries {
            let page = page.into();
            let targets: BTreeSet<String> = targets.into_iter().map(Into::into).collect();
            if targets.contains(&page) {
                return Err(Error::InvalidParameter(format!(
                    "page links to itself: {page}"
                )));
            }
            if raw.contains_key(&page) {
                return Err(Error::InvalidParameter(format!("duplicate page: {page}")));
            }
            raw.insert(page, targets);
        }

        let pages: Vec<String> = raw.keys().cloned().collect();
        let index: HashMap<String, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();

        let mut links = Vec::with_capacity(pages.len());
        for targets in raw.values() {
            let mut out = Vec::with_capacity(targets.len());
            for target in targets {
                match index.get(target) {
                    Some(&j) => out.push(j),
                    None => return Err(Error::UnknownPage(target.clone())),
                }
            }
            // BTreeSet iteration + sorted page order keeps `out` sorted.
            links.push(out);
        }

        Ok(Self { pages, index, links })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page identifiers in index (sorted) order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn contains(&self, page: &str) -> bool {
        self.index.contains_key(page)
    }

    pub fn page_index(&self, page: &str) -> Option<usize> {
        self.index.get(page).copied()
    }

    pub fn page_name(&self, node: usize) -> Option<&str> {
        self.pages.get(node).map(String::as_str)
    }

    /// Out-links of `page`, sorted by identifier. `None` if the page is not in the corpus.
    pub fn links(&self, page: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let i = self.page_index(page)?;
        Some(self.links[i].iter().map(move |&j| self.pages[j].as_str()))
    }

    /// `true` if `page` exists and has no out-links.
    pub fn is_dangling(&self, page: &str) -> bool {
        self.page_index(page)
            .is_some_and(|i| self.links[i].is_empty())
    }

    pub fn dangling_pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, out)| out.is_empty())
            .map(|(i, _)| self.pages[i].as_str())
    }

    pub fn edge_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }

    /// Inbound-link index: for each page (by index), the pages linking to it, in index order.
    pub fn inbound_index(&self) -> Vec<Vec<usize>> {
        let mut inbound = vec![Vec::new(); self.pages.len()];
        for (source, out) in self.links.iter().enumerate() {
            for &target in out {
                inbound[target].push(source);
            }
        }
        inbound
    }

    pub(crate) fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        Ok(())
    }
}

impl GraphRef for Corpus {
    fn node_count(&self) -> usize {
        self.pages.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.links.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
