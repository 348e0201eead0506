//! HTML render surface
//!
//! Produces a self-contained page. The page shell is a plain text template
//! with `{{...}}` placeholders so it can be replaced at runtime; the status
//! region and the tree itself are rendered through askama templates, which
//! escape every value taken from the spreadsheet.
//!
//! Cards are absolutely positioned from the box model, so the geometry
//! measured in [`flush_layout`](RenderSurface::flush_layout) is exactly where
//! the browser paints them and the connector layer lines up.

use super::{measure, RenderSurface, Status, SurfaceError};
use crate::core::labels::{Labels, Locale};
use crate::core::tree::{Connector, LayoutMetrics, Photo, Rect, TreeContent, TreeLayout};
use crate::debug;
use askama::Template;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Embedded page template
const PAGE_TEMPLATE: &str = include_str!("../../../templates/page.html");

/// Placeholder replaced by the tree container content
pub const CONTAINER_PLACEHOLDER: &str = "{{tree_container}}";

/// Placeholder replaced by the status region
pub const STATUS_PLACEHOLDER: &str = "{{status}}";

/// Element id reported when the template has no container placeholder
const CONTAINER_ID: &str = "tree-container";

/// Photo shown when a record has no photo URL
fn placeholder_photo(caption: &str) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"100\" viewBox=\"0 0 100 100\"%3E%3Crect fill=\"%23eee\" width=\"100\" height=\"100\"/%3E%3Ctext x=\"50\" y=\"55\" text-anchor=\"middle\" font-size=\"12\" fill=\"%23999\"%3E{caption}%3C/text%3E%3C/svg%3E"
    )
}

fn px(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded}")
}

struct CardView<'a> {
    id: &'a str,
    name: &'a str,
    life_span: &'a str,
    photo_src: String,
    left: String,
    top: String,
    width: String,
    height: String,
}

struct BandView<'a> {
    key: &'a str,
    label: &'a str,
    top: String,
    cards: Vec<CardView<'a>>,
}

struct LineView<'a> {
    class: &'static str,
    from_id: &'a str,
    to_id: &'a str,
    x1: String,
    y1: String,
    x2: String,
    y2: String,
    stroke: &'static str,
    width: String,
    opacity: String,
    has_dash: bool,
    dash: &'static str,
}

#[derive(Template)]
#[template(path = "tree.html")]
struct TreeFragment<'a> {
    width: String,
    height: String,
    bands: Vec<BandView<'a>>,
    lines: Vec<LineView<'a>>,
}

#[derive(Template)]
#[template(source = "<p class=\"no-data\">{{ message }}</p>", ext = "html")]
struct NoDataFragment<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(
    source = "<div id=\"loading\" class=\"loading\"{% if hidden %} style=\"display: none;\"{% endif %}>{{ message }}</div>",
    ext = "html"
)]
struct StatusFragment<'a> {
    hidden: bool,
    message: &'a str,
}

/// Render surface that writes a standalone HTML page
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    template: String,
    metrics: LayoutMetrics,
    locale: Locale,
    status: Status,
    content: Option<TreeContent>,
    rects: Vec<(String, Rect)>,
    connectors: Vec<Connector>,
}

impl HtmlSurface {
    /// Create a surface using the embedded page template
    #[must_use]
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self::with_template(PAGE_TEMPLATE, metrics)
    }

    /// Create a surface from a custom page template
    ///
    /// The template should contain [`STATUS_PLACEHOLDER`] and
    /// [`CONTAINER_PLACEHOLDER`]; without the latter the surface has no
    /// container and every rebuild fails.
    #[must_use]
    pub fn with_template(template: impl Into<String>, metrics: LayoutMetrics) -> Self {
        Self {
            template: template.into(),
            metrics,
            locale: Locale::default(),
            status: Status::Hidden,
            content: None,
            rects: Vec::new(),
            connectors: Vec::new(),
        }
    }

    /// Set the page language and title locale
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Whether the template provides a container for the tree
    #[must_use]
    pub fn has_container(&self) -> bool {
        self.template.contains(CONTAINER_PLACEHOLDER)
    }

    /// Current container content
    #[must_use]
    pub const fn content(&self) -> Option<&TreeContent> {
        self.content.as_ref()
    }

    /// Connectors currently drawn
    #[must_use]
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Render the complete page
    ///
    /// # Errors
    /// Returns an error if a fragment template fails to render
    pub fn render(&self) -> Result<String, askama::Error> {
        let labels = Labels::for_locale(self.locale);
        let status = StatusFragment {
            hidden: self.status.message().is_none(),
            message: self.status.message().unwrap_or_default(),
        }
        .render()?;

        let container = match &self.content {
            None => String::new(),
            Some(TreeContent::NoData(message)) => NoDataFragment { message }.render()?,
            Some(TreeContent::Tree(layout)) => self.render_tree(layout)?,
        };

        Ok(self
            .template
            .replace("{{lang}}", &self.locale.to_string())
            .replace("{{title}}", labels.title)
            .replace(STATUS_PLACEHOLDER, &status)
            .replace(CONTAINER_PLACEHOLDER, &container))
    }

    /// Render the page and write it to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    pub fn write(&self, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let page = self.render()?;
        fs::write(output_path, page)?;
        Ok(())
    }

    fn render_tree(&self, layout: &TreeLayout) -> Result<String, askama::Error> {
        let sizes = layout.band_sizes();
        let (width, height) = self.metrics.container_size(&sizes);
        let rects: HashMap<&str, Rect> = self
            .rects
            .iter()
            .map(|(id, rect)| (id.as_str(), *rect))
            .collect();

        let bands = layout
            .bands
            .iter()
            .enumerate()
            .map(|(band_index, band)| BandView {
                key: &band.key,
                label: &band.label,
                top: px(self.metrics.band_top(band_index)),
                cards: band
                    .cards
                    .iter()
                    .map(|card| {
                        let rect = rects.get(card.element_id.as_str()).copied().unwrap_or_else(
                            || self.metrics.card_rect(&sizes, card.band, card.slot),
                        );
                        CardView {
                            id: &card.element_id,
                            name: &card.name,
                            life_span: &card.life_span,
                            photo_src: match &card.photo {
                                Photo::Url(url) => url.clone(),
                                Photo::Placeholder(caption) => placeholder_photo(caption),
                            },
                            left: px(rect.x),
                            top: px(rect.y),
                            width: px(rect.width),
                            height: px(rect.height),
                        }
                    })
                    .collect(),
            })
            .collect();

        let lines = self
            .connectors
            .iter()
            .map(|connector| {
                let style = connector.kind.style();
                LineView {
                    class: connector.kind.class_name(),
                    from_id: &connector.from_id,
                    to_id: &connector.to_id,
                    x1: px(connector.from.x),
                    y1: px(connector.from.y),
                    x2: px(connector.to.x),
                    y2: px(connector.to.y),
                    stroke: style.stroke,
                    width: style.width.to_string(),
                    opacity: style.opacity.to_string(),
                    has_dash: style.dash.is_some(),
                    dash: style.dash.unwrap_or_default(),
                }
            })
            .collect();

        TreeFragment {
            width: px(width),
            height: px(height),
            bands,
            lines,
        }
        .render()
    }
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new(LayoutMetrics::default())
    }
}

impl RenderSurface for HtmlSurface {
    fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    fn replace_content(&mut self, content: TreeContent) -> Result<(), SurfaceError> {
        if !self.has_container() {
            return Err(SurfaceError::MissingContainer(CONTAINER_ID.to_string()));
        }
        self.content = Some(content);
        self.rects.clear();
        self.connectors.clear();
        Ok(())
    }

    fn flush_layout(&mut self) {
        self.rects = self
            .content
            .as_ref()
            .and_then(TreeContent::layout)
            .map(|layout| measure(layout, &self.metrics))
            .unwrap_or_default();
        debug!("Layout settled with {} cards", self.rects.len());
    }

    fn card_rects(&self) -> Vec<(String, Rect)> {
        self.rects.clone()
    }

    fn replace_connectors(&mut self, connectors: Vec<Connector>) {
        self.connectors = connectors;
    }
}
