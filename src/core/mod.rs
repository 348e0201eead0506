//! Core module: parsing, grouping, layout, connectors and the load pipeline

pub mod config;
pub mod labels;
pub mod loader;
pub mod models;
pub mod render;
pub mod sheet;
pub mod tree;

/// Returns the current version of the `family_tree` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
