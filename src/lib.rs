//! `family_tree` library
//! Parses a published genealogy spreadsheet and renders a generation-grouped
//! family tree with parent and spouse connectors.

pub mod logger;

pub mod core;

pub use crate::core::config;
pub use crate::core::get_version;
