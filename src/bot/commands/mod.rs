//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Booklet-driven text display commands
pub mod reader;

// Export commands
pub use general::*;
pub use reader::*;
