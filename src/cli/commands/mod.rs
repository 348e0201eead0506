//! CLI command handlers for `familytree`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod inspect;
pub mod render;

use crate::args::SourceArgs;
use family_tree::config::Config;
use family_tree::core::loader::{DataSource, FileSource, HttpSource};

/// Pick the data source for a run
///
/// `--input` wins, then `--url`, then the configured source URL.
///
/// # Errors
/// Returns a message when no source is given and the config has no URL.
pub fn select_source(args: &SourceArgs, config: &Config) -> Result<Box<dyn DataSource>, String> {
    if let Some(path) = &args.input {
        return Ok(Box::new(FileSource::new(path)));
    }

    let url = args.url.as_deref().unwrap_or(&config.source.url);
    if url.is_empty() {
        return Err(
            "✗ No data source: pass --input or --url, or set one with `familytree config set url URL`"
                .to_string(),
        );
    }
    Ok(Box::new(HttpSource::new(url, config.source.timeout())))
}
