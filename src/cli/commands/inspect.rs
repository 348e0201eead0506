//! Inspect command handler

use crate::args::SourceArgs;
use crate::commands::select_source;
use family_tree::config::Config;
use family_tree::core::labels::Labels;
use family_tree::core::loader::{DrawOutcome, TreeLoader};
use family_tree::core::render::MemorySurface;
use family_tree::core::tree::TreeContent;

/// Print the grouped generations and connector counts without writing a page
pub fn run(source: &SourceArgs, config: &Config) {
    if let Err(e) = inspect(source, config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn inspect(source: &SourceArgs, config: &Config) -> Result<(), String> {
    let data_source = select_source(source, config)?;
    let described = data_source.describe();

    let loader = TreeLoader::new(data_source, Labels::for_locale(config.display.locale()));
    let mut surface = MemorySurface::with_metrics(config.layout.metrics());
    let outcome = loader
        .refresh(&mut surface)
        .map_err(|e| format!("✗ Failed to load {described}: {e}"))?;

    match surface.content() {
        Some(TreeContent::Tree(layout)) => print!("{layout}"),
        Some(TreeContent::NoData(message)) => println!("{message}"),
        None => {}
    }

    match outcome {
        DrawOutcome::Drawn {
            parent_links,
            spouse_links,
        } => println!("\nConnectors: {parent_links} parent, {spouse_links} spouse"),
        DrawOutcome::NoData | DrawOutcome::Superseded => println!("\nConnectors: none"),
    }
    Ok(())
}
