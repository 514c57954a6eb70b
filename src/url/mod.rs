//! URL handling module for Doc-Dossier
//!
//! This module provides site origins, URL canonicalization for visited-set
//! deduplication, and the classifier that decides which discovered links are
//! documentation pages.

mod classifier;
mod normalize;
mod origin;

// Re-export main functions
pub use classifier::{is_documentation_url, UrlClassifier};
pub use normalize::canonicalize;
pub use origin::{parse_start_url, SiteOrigin};
