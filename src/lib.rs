// Bulk mob sprite downloader: mirrors the content API's per-frame render
// output into a local asset tree, skipping frames already on disk.

pub mod api;
pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod stats;
pub mod writer;
