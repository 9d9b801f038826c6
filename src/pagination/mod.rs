//! Text pagination core.
//!
//! This module turns an ordered list of text fragments into a list of page
//! strings that each respect a character budget, an optional line budget, and
//! optional prefix/suffix decoration. It is pure and synchronous; the booklet
//! layer consumes its output but never reaches back into it.

/// Page-size constraints and their validation rules
pub mod config;
/// Input units consumed by the paginator
pub mod fragment;
/// The layout algorithm and its caching wrapper
pub mod paginator;

pub use config::{DEFAULT_MAX_CHARACTERS, DEFAULT_MAX_LINES, PaginationConfig};
pub use fragment::Fragment;
pub use paginator::Paginator;
