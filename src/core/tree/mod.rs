//! Family tree construction
//!
//! Filtering and grouping of records, the abstract card layout, the box model
//! used to measure it, and the relationship resolver that turns measured
//! positions into connector lines.

pub mod connections;
pub mod geometry;
pub mod grouping;
pub mod layout;

pub use connections::{resolve_connectors, Connector, ConnectorKind, ConnectorStyle, PositionTable};
pub use geometry::{LayoutMetrics, Point, Rect};
pub use grouping::{select_valid, Generations};
pub use layout::{GenerationBand, PersonCard, Photo, TreeContent, TreeLayout};
