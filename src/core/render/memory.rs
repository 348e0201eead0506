//! In-memory render surface
//!
//! Keeps everything written to it so callers can inspect the final state of
//! a load cycle without producing a page. Geometry is measured with the same
//! box model as [`HtmlSurface`](super::HtmlSurface).

use super::{measure, RenderSurface, Status, SurfaceError};
use crate::core::tree::{Connector, ConnectorKind, LayoutMetrics, Rect, TreeContent};

/// Render surface that records status, content and connectors in memory
#[derive(Debug, Clone)]
pub struct MemorySurface {
    metrics: LayoutMetrics,
    has_container: bool,
    status: Option<Status>,
    status_history: Vec<Status>,
    content: Option<TreeContent>,
    rects: Vec<(String, Rect)>,
    connectors: Vec<Connector>,
    connector_layers: usize,
}

impl MemorySurface {
    /// Create a surface with a container and the default box model
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(LayoutMetrics::default())
    }

    /// Create a surface using the given box model
    #[must_use]
    pub const fn with_metrics(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            has_container: true,
            status: None,
            status_history: Vec::new(),
            content: None,
            rects: Vec::new(),
            connectors: Vec::new(),
            connector_layers: 0,
        }
    }

    /// Create a surface whose container element is missing
    #[must_use]
    pub fn without_container() -> Self {
        Self {
            has_container: false,
            ..Self::new()
        }
    }

    /// Current status region
    #[must_use]
    pub const fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Every status written so far, oldest first
    #[must_use]
    pub fn status_history(&self) -> &[Status] {
        &self.status_history
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

    /// Connectors of one kind currently drawn
    pub fn connectors_of(&self, kind: ConnectorKind) -> impl Iterator<Item = &Connector> {
        self.connectors.iter().filter(move |c| c.kind == kind)
    }

    /// Number of connector layers present (0 or 1)
    #[must_use]
    pub const fn connector_layers(&self) -> usize {
        self.connector_layers
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MemorySurface {
    fn set_status(&mut self, status: Status) {
        self.status_history.push(status.clone());
        self.status = Some(status);
    }

    fn replace_content(&mut self, content: TreeContent) -> Result<(), SurfaceError> {
        if !self.has_container {
            return Err(SurfaceError::MissingContainer("tree-container".to_string()));
        }
        self.content = Some(content);
        self.rects.clear();
        self.connectors.clear();
        self.connector_layers = 0;
        Ok(())
    }

    fn flush_layout(&mut self) {
        self.rects = self
            .content
            .as_ref()
            .and_then(TreeContent::layout)
            .map(|layout| measure(layout, &self.metrics))
            .unwrap_or_default();
    }

    fn card_rects(&self) -> Vec<(String, Rect)> {
        self.rects.clone()
    }

    fn replace_connectors(&mut self, connectors: Vec<Connector>) {
        self.connectors = connectors;
        self.connector_layers = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::Labels;
    use crate::core::models::PersonRecord;

    #[test]
    fn test_missing_container_rejects_content() {
        let mut surface = MemorySurface::without_container();
        let result = surface.replace_content(TreeContent::NoData("x".to_string()));
        assert_eq!(
            result,
            Err(SurfaceError::MissingContainer("tree-container".to_string()))
        );
        assert!(surface.content().is_none());
    }

    #[test]
    fn test_rects_need_flush() {
        let mut surface = MemorySurface::new();
        let content = TreeContent::build(&[PersonRecord::new("1", "1")], &Labels::default());
        surface.replace_content(content).unwrap();
        assert!(surface.card_rects().is_empty());

        surface.flush_layout();
        assert_eq!(surface.card_rects().len(), 1);
    }

    #[test]
    fn test_replace_content_drops_connectors() {
        let mut surface = MemorySurface::new();
        surface.replace_connectors(Vec::new());
        assert_eq!(surface.connector_layers(), 1);

        surface
            .replace_content(TreeContent::NoData("x".to_string()))
            .unwrap();
        assert_eq!(surface.connector_layers(), 0);
    }
}
