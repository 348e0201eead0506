//! Render command handler

use crate::args::SourceArgs;
use crate::commands::select_source;
use family_tree::config::Config;
use family_tree::core::labels::Labels;
use family_tree::core::loader::{DrawOutcome, TreeLoader};
use family_tree::core::render::HtmlSurface;
use family_tree::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Default page file name inside the output directory
const DEFAULT_PAGE_NAME: &str = "family_tree.html";

/// Run one load cycle and write the page
///
/// The page is written even when the fetch fails so the error status is
/// visible to whoever opens it.
pub fn run(
    source: &SourceArgs,
    output: Option<&Path>,
    template: Option<&Path>,
    config: &Config,
    verbose: bool,
) {
    if let Err(e) = render_page(source, output, template, config, verbose) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn render_page(
    source: &SourceArgs,
    output: Option<&Path>,
    template: Option<&Path>,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    let data_source = select_source(source, config)?;
    let locale = config.display.locale();
    let metrics = config.layout.metrics();

    let surface = match template {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("✗ Failed to read template {}: {e}", path.display()))?;
            HtmlSurface::with_template(text, metrics)
        }
        None => HtmlSurface::new(metrics),
    };
    let mut surface = surface.with_locale(locale);

    if verbose {
        println!("Loading {}", data_source.describe());
    }

    let loader = TreeLoader::new(data_source, Labels::for_locale(locale));
    let load_result = loader.refresh(&mut surface);

    let output_path = output.map_or_else(
        || PathBuf::from(&config.paths.out_dir).join(DEFAULT_PAGE_NAME),
        Path::to_path_buf,
    );
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                format!("✗ Failed to create output directory {}: {e}", parent.display())
            })?;
        }
    }

    match &load_result {
        Ok(DrawOutcome::Drawn {
            parent_links,
            spouse_links,
        }) => {
            let cards = surface
                .content()
                .and_then(|content| content.layout())
                .map_or(0, |layout| layout.card_count());
            println!(
                "✓ Drew {cards} people with {parent_links} parent and {spouse_links} spouse links"
            );
        }
        Ok(DrawOutcome::NoData) => println!("✓ No valid records; page shows the empty placeholder"),
        Ok(DrawOutcome::Superseded) => info!("Load cycle superseded before drawing"),
        Err(e) => error!("Load failed: {e}"),
    }

    surface
        .write(&output_path)
        .map_err(|e| format!("✗ Failed to write page {}: {e}", output_path.display()))?;

    match load_result {
        Ok(_) => {
            println!("✓ Page written: {}", output_path.display());
            Ok(())
        }
        Err(e) => Err(format!(
            "✗ {e} (page with error status written to {})",
            output_path.display()
        )),
    }
}
