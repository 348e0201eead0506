//! Render surfaces
//!
//! A render surface is the output target of a load cycle: a status region
//! for human-readable progress text and a container that receives the whole
//! tree on every rebuild. Connector lines live on their own layer inside the
//! container, behind the cards.

pub mod html;
pub mod memory;

pub use html::HtmlSurface;
pub use memory::MemorySurface;

use crate::core::tree::{Connector, LayoutMetrics, Rect, TreeContent, TreeLayout};
use thiserror::Error;

/// Text shown in the status region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Data is being fetched
    Loading(String),
    /// The cycle failed; the message stays visible
    Failed(String),
    /// The tree was built and the status region is hidden
    Hidden,
}

impl Status {
    /// Message to display, if the region is visible
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading(msg) | Self::Failed(msg) => Some(msg),
            Self::Hidden => None,
        }
    }
}

/// Errors raised by a render surface
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface has no container to hold the tree
    #[error("container element '{0}' not found")]
    MissingContainer(String),
}

/// Output target of the tree pipeline
pub trait RenderSurface {
    /// Replace the status region's content
    fn set_status(&mut self, status: Status);

    /// Replace the whole container content with a new tree or placeholder
    ///
    /// Removes any previous cards and connector layer.
    ///
    /// # Errors
    /// Returns [`SurfaceError::MissingContainer`] when the surface has no
    /// container to write into.
    fn replace_content(&mut self, content: TreeContent) -> Result<(), SurfaceError>;

    /// Settle checkpoint: complete layout so card geometry can be measured
    fn flush_layout(&mut self);

    /// Measured card boxes in container coordinates, keyed by element id
    ///
    /// Empty until [`flush_layout`](Self::flush_layout) has run for the
    /// current content.
    fn card_rects(&self) -> Vec<(String, Rect)>;

    /// Replace the connector layer with the given lines
    fn replace_connectors(&mut self, connectors: Vec<Connector>);
}

/// Compute every card box of a tree with the given box model
#[must_use]
pub fn measure(layout: &TreeLayout, metrics: &LayoutMetrics) -> Vec<(String, Rect)> {
    let sizes = layout.band_sizes();
    layout
        .cards()
        .map(|card| {
            (
                card.element_id.clone(),
                metrics.card_rect(&sizes, card.band, card.slot),
            )
        })
        .collect()
}
