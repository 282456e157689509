//! Failure aggregation for a crawl run.
//!
//! Every non-2xx response and every unsuppressed transport failure lands
//! here, keyed by the page that referenced the failing URL and the status
//! code (or the synthetic `504` for transport failures).

use serde::Serialize;
use std::collections::BTreeMap;

/// Accumulated crawl failures: referring page -> status code -> failing
/// URLs in discovery order.
///
/// The structure is append-only and directly serializable; an empty report
/// means every reachable, in-scope URL under the depth budget returned 2xx
/// (or was a suppressed benign asset). A URL appears in at most one
/// `(parent, code)` bucket per run because the engine never processes the
/// same URL twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report(BTreeMap<String, BTreeMap<u16, Vec<String>>>);

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `url` under `(parent, code)`, creating both levels on first
    /// use. Insertion order within a bucket reflects discovery order.
    pub fn record(&mut self, parent: &str, code: u16, url: &str) {
        self.0
            .entry(parent.to_string())
            .or_default()
            .entry(code)
            .or_default()
            .push(url.to_string());
    }

    /// True when the crawl found nothing to complain about.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The failing URLs recorded under `(parent, code)`, if any.
    pub fn get(&self, parent: &str, code: u16) -> Option<&[String]> {
        self.0
            .get(parent)
            .and_then(|codes| codes.get(&code))
            .map(Vec::as_slice)
    }

    /// Iterates over referring pages and their code buckets.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<u16, Vec<String>>)> {
        self.0.iter()
    }

    /// Total number of failing URLs across all buckets.
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|codes| codes.values())
            .map(Vec::len)
            .sum()
    }
}
