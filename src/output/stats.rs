//! Crawl statistics reporting
//!
//! Renders a run's [`CrawlStats`] for the log and for the terminal.

use crate::state::CrawlStats;
use std::fmt::Write;

/// Share of products that made it into the result, as a percentage
pub fn product_success_rate(stats: &CrawlStats) -> f64 {
    let attempted = stats.products_saved + stats.products_skipped;
    if attempted == 0 {
        return 0.0;
    }
    (stats.products_saved as f64 / attempted as f64) * 100.0
}

/// Formats statistics as a multi-line report
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "=== Crawl Statistics ===\n");
    let _ = writeln!(out, "Run:");
    let _ = writeln!(out, "  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        let _ = writeln!(out, "  Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        let _ = writeln!(out, "  Duration: {}s", seconds);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Categories:");
    let _ = writeln!(out, "  Crawled: {}", stats.categories_crawled);
    let _ = writeln!(out, "  Skipped: {}", stats.categories_skipped);
    let _ = writeln!(out, "  Named from URL: {}", stats.category_name_fallbacks);
    let _ = writeln!(out);

    let _ = writeln!(out, "Catalog pages:");
    let _ = writeln!(out, "  Extracted: {}", stats.pages_extracted);
    let _ = writeln!(out, "  Skipped: {}", stats.pages_skipped);
    let _ = writeln!(out, "  Without variant data: {}", stats.blobs_absent);
    let _ = writeln!(out, "  Malformed variant data: {}", stats.blobs_malformed);
    let _ = writeln!(out);

    let _ = writeln!(out, "Products:");
    let _ = writeln!(out, "  Saved: {}", stats.products_saved);
    let _ = writeln!(out, "  Skipped: {}", stats.products_skipped);
    let _ = writeln!(out, "  Tiles dropped: {}", stats.stubs_dropped);
    let _ = writeln!(out);

    if !stats.skip_reasons.is_empty() {
        let _ = writeln!(out, "Skip Summary:");
        let mut reasons: Vec<_> = stats.skip_reasons.iter().collect();
        reasons.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (reason, count) in reasons {
            let _ = writeln!(out, "  {}: {}", reason, count);
        }
        let _ = writeln!(out);
    }

    let _ = write!(
        out,
        "Success Rate: {:.1}% ({} / {} products saved)",
        product_success_rate(stats),
        stats.products_saved,
        stats.products_saved + stats.products_skipped
    );

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("{}", format_statistics(stats));
}

/// Emits the run summary as log events
pub fn log_statistics(stats: &CrawlStats) {
    tracing::info!(
        "Run summary: {} categories ({} skipped), {} pages ({} skipped), {} products saved ({} skipped, {} tiles dropped)",
        stats.categories_crawled,
        stats.categories_skipped,
        stats.pages_extracted,
        stats.pages_skipped,
        stats.products_saved,
        stats.products_skipped,
        stats.stubs_dropped
    );

    if stats.blobs_absent > 0 || stats.blobs_malformed > 0 {
        tracing::info!(
            "Variant data missing on {} pages, malformed on {} pages",
            stats.blobs_absent,
            stats.blobs_malformed
        );
    }

    for (reason, count) in &stats.skip_reasons {
        tracing::debug!("Skipped {}: {}", reason, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SkipReason, SkipScope};

    #[test]
    fn test_success_rate() {
        let mut stats = CrawlStats::new();
        stats.products_saved = 3;
        stats.products_skipped = 1;

        assert!((product_success_rate(&stats) - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_zero_products() {
        assert_eq!(product_success_rate(&CrawlStats::new()), 0.0);
    }

    #[test]
    fn test_report_lists_skip_reasons() {
        let mut stats = CrawlStats::new();
        stats.products_saved = 3;
        stats.record_skip(
            SkipScope::Product,
            &SkipReason::FetchFailed {
                url: "https://shop.example/goods/4/".to_string(),
            },
        );
        stats.finish();

        let report = format_statistics(&stats);
        assert!(report.contains("product/fetch_failed: 1"));
        assert!(report.contains("Success Rate: 75.0% (3 / 4 products saved)"));
        assert!(report.contains("Duration:"));
    }
}
