use crate::state::skip::{SkipReason, SkipScope};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Counters for a single crawl run
///
/// The coordinator owns one of these per run and records every skip it
/// aggregates, so the degradation of a run can be inspected after the fact.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished, once it has
    pub finished_at: Option<DateTime<Utc>>,

    /// Categories included in the result
    pub categories_crawled: u64,

    /// Categories omitted from the result
    pub categories_skipped: u64,

    /// Categories whose name was derived from the URL
    pub category_name_fallbacks: u64,

    /// Catalog pages fetched and parsed
    pub pages_extracted: u64,

    /// Catalog pages that contributed nothing
    pub pages_skipped: u64,

    /// Listing elements dropped for lacking a link or identifier
    pub stubs_dropped: u64,

    /// Products persisted
    pub products_saved: u64,

    /// Products dropped during detail parsing
    pub products_skipped: u64,

    /// Catalog pages with no embedded variant data
    pub blobs_absent: u64,

    /// Catalog pages whose embedded variant data failed to decode
    pub blobs_malformed: u64,

    /// Skip counts keyed by `scope/kind`
    pub skip_reasons: HashMap<String, u64>,
}

impl CrawlStats {
    /// Creates counters for a run starting now
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Creates counters for a run starting at `started_at`
    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            categories_crawled: 0,
            categories_skipped: 0,
            category_name_fallbacks: 0,
            pages_extracted: 0,
            pages_skipped: 0,
            stubs_dropped: 0,
            products_saved: 0,
            products_skipped: 0,
            blobs_absent: 0,
            blobs_malformed: 0,
            skip_reasons: HashMap::new(),
        }
    }

    /// Records that a unit of work at `scope` was skipped for `reason`
    pub fn record_skip(&mut self, scope: SkipScope, reason: &SkipReason) {
        match scope {
            SkipScope::Category => self.categories_skipped += 1,
            SkipScope::Page => self.pages_skipped += 1,
            SkipScope::Stub => self.stubs_dropped += 1,
            SkipScope::Product => self.products_skipped += 1,
        }

        *self
            .skip_reasons
            .entry(format!("{}/{}", scope, reason.kind()))
            .or_insert(0) += 1;
    }

    /// Total number of skips of any scope
    pub fn total_skips(&self) -> u64 {
        self.skip_reasons.values().sum()
    }

    /// Marks the run as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

impl Default for CrawlStats {
    fn default() -> Self {
        Self::new()
    }
}
