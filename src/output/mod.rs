//! Page persistence
//!
//! Writes one file per crawled page under the configured output directory.

mod writer;

pub use writer::{article_file_stem, PageWriter};
