//! Catalog data model
//!
//! These are the records produced by a crawl. Every one of them is rebuilt
//! from scratch on each run; nothing here outlives a single crawl except the
//! document written by the result sink.

mod types;

pub use types::{Category, CrawlResult, ProductRecord, ProductStub, Variant};
