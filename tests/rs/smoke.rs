//! Integration smoke tests for `family_tree`

use family_tree::config::Config;
use family_tree::core::labels::{Labels, Locale};
use family_tree::core::render::HtmlSurface;
use family_tree::get_version;

#[test]
fn version_matches_manifest() {
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn bundled_defaults_are_ready_to_render() {
    let config = Config::from_defaults();
    let metrics = config.layout.metrics();
    assert!(metrics.card_width > 0.0 && metrics.card_height > 0.0);
    assert_eq!(config.display.locale(), Locale::Ru);

    let surface = HtmlSurface::new(metrics).with_locale(config.display.locale());
    assert!(surface.has_container());

    let page = surface.render().expect("empty page renders");
    assert!(page.contains(Labels::for_locale(Locale::Ru).title));
    assert!(page.contains("id=\"tree-container\""));
}
