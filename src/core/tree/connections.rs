//! Relationship resolver
//!
//! Resolves father, mother and spouse references against the measured card
//! positions and produces the connector lines to draw.

use super::geometry::{Point, Rect};
use crate::core::models::{element_id_for, PersonRecord};
use crate::debug;
use std::collections::HashMap;

/// Kind of relationship a connector represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Parent card to child card
    Parent,
    /// Between two spouses, once per pair
    Spouse,
}

/// Stroke used to draw a connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorStyle {
    /// Stroke color
    pub stroke: &'static str,
    /// Stroke width in pixels
    pub width: f64,
    /// Stroke opacity
    pub opacity: f64,
    /// SVG dash pattern, `None` for a solid line
    pub dash: Option<&'static str>,
}

impl ConnectorKind {
    /// Visual style of this kind; parent and spouse links never look alike
    #[must_use]
    pub const fn style(self) -> ConnectorStyle {
        match self {
            Self::Parent => ConnectorStyle {
                stroke: "#3498db",
                width: 1.4,
                opacity: 0.85,
                dash: None,
            },
            Self::Spouse => ConnectorStyle {
                stroke: "#e74c3c",
                width: 2.0,
                opacity: 0.9,
                dash: Some("4,2"),
            },
        }
    }

    /// CSS class of the drawn line
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Parent => "parent-link",
            Self::Spouse => "spouse-link",
        }
    }
}

/// A line between two card centers
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Relationship kind
    pub kind: ConnectorKind,
    /// Element id of the start card
    pub from_id: String,
    /// Element id of the end card
    pub to_id: String,
    /// Start point (parent, or the spouse with the smaller `ID`)
    pub from: Point,
    /// End point
    pub to: Point,
}

/// Card centers keyed by element id
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    centers: HashMap<String, Point>,
}

impl PositionTable {
    /// Build the table from measured card rectangles
    ///
    /// A duplicated element id keeps the last measured card.
    #[must_use]
    pub fn from_rects<I, S>(rects: I) -> Self
    where
        I: IntoIterator<Item = (S, Rect)>,
        S: Into<String>,
    {
        let centers = rects
            .into_iter()
            .map(|(id, rect)| (id.into(), rect.center()))
            .collect();
        Self { centers }
    }

    /// Center of the card with the given element id
    #[must_use]
    pub fn get(&self, element_id: &str) -> Option<Point> {
        self.centers.get(element_id).copied()
    }

    /// Center of the card of the person with the given `ID`
    #[must_use]
    pub fn of_person(&self, person_id: &str) -> Option<(String, Point)> {
        let element_id = element_id_for(person_id);
        self.get(&element_id).map(|point| (element_id, point))
    }

    /// Number of measured cards
    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether no card was measured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Resolve every parent and spouse connector for the given records
///
/// Parent links come first, in record order, father before mother. Spouse
/// links follow; a pair is drawn only from the side whose `ID` is smaller
/// under plain string comparison, so a mutual pair yields one line.
/// References to cards that were not rendered are skipped.
#[must_use]
pub fn resolve_connectors(records: &[PersonRecord], positions: &PositionTable) -> Vec<Connector> {
    let mut connectors = Vec::new();

    for person in records {
        let Some((child_id, child_pos)) = positions.of_person(&person.id) else {
            continue;
        };
        for parent in person.parent_ids() {
            match positions.of_person(parent) {
                Some((parent_id, parent_pos)) => connectors.push(Connector {
                    kind: ConnectorKind::Parent,
                    from_id: parent_id,
                    to_id: child_id.clone(),
                    from: parent_pos,
                    to: child_pos,
                }),
                None => debug!("Parent '{parent}' of '{}' is not rendered", person.id),
            }
        }
    }

    for person in records {
        let Some(spouse) = person.spouse_id.as_deref() else {
            continue;
        };
        let (Some((own_id, own_pos)), Some((spouse_id, spouse_pos))) =
            (positions.of_person(&person.id), positions.of_person(spouse))
        else {
            continue;
        };
        // String order, not numeric: "10" < "9".
        if person.id.as_str() < spouse {
            connectors.push(Connector {
                kind: ConnectorKind::Spouse,
                from_id: own_id,
                to_id: spouse_id,
                from: own_pos,
                to: spouse_pos,
            });
        }
    }

    connectors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ids: &[&str]) -> PositionTable {
        PositionTable::from_rects(ids.iter().enumerate().map(|(i, id)| {
            (
                element_id_for(id),
                Rect::new(i as f64 * 100.0, 0.0, 50.0, 50.0),
            )
        }))
    }

    fn count(connectors: &[Connector], kind: ConnectorKind) -> usize {
        connectors.iter().filter(|c| c.kind == kind).count()
    }

    #[test]
    fn test_parent_links() {
        let records = vec![
            PersonRecord::new("1", "1"),
            PersonRecord::new("2", "1"),
            PersonRecord::new("3", "2").with_parents(Some("1"), Some("2")),
        ];
        let connectors = resolve_connectors(&records, &table(&["1", "2", "3"]));

        assert_eq!(connectors.len(), 2);
        assert_eq!(connectors[0].from_id, "person-1");
        assert_eq!(connectors[0].to_id, "person-3");
        assert_eq!(connectors[1].from_id, "person-2");
        assert_eq!(connectors[0].from, Point::new(25.0, 25.0));
        assert_eq!(connectors[0].to, Point::new(225.0, 25.0));
    }

    #[test]
    fn test_dangling_parent_is_skipped() {
        let records = vec![PersonRecord::new("2", "2").with_parents(Some("99"), None)];
        let connectors = resolve_connectors(&records, &table(&["2"]));
        assert!(connectors.is_empty());
    }

    #[test]
    fn test_unrendered_child_draws_nothing() {
        let records = vec![PersonRecord::new("5", "2").with_parents(Some("1"), None)];
        let connectors = resolve_connectors(&records, &table(&["1"]));
        assert!(connectors.is_empty());
    }

    #[test]
    fn test_mutual_spouses_draw_once() {
        let forward = vec![
            PersonRecord::new("1", "1").with_spouse("2"),
            PersonRecord::new("2", "1").with_spouse("1"),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        let positions = table(&["1", "2"]);

        for records in [forward, backward] {
            let connectors = resolve_connectors(&records, &positions);
            assert_eq!(count(&connectors, ConnectorKind::Spouse), 1);
            assert_eq!(connectors[0].from_id, "person-1");
            assert_eq!(connectors[0].to_id, "person-2");
        }
    }

    #[test]
    fn test_spouse_order_is_lexicographic() {
        // "10" sorts before "9", so the line is owned by person 10.
        let records = vec![
            PersonRecord::new("9", "1").with_spouse("10"),
            PersonRecord::new("10", "1").with_spouse("9"),
        ];
        let connectors = resolve_connectors(&records, &table(&["9", "10"]));
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0].from_id, "person-10");
    }

    #[test]
    fn test_one_sided_spouse_from_larger_id_is_dropped() {
        let records = vec![PersonRecord::new("2", "1").with_spouse("1")];
        let connectors = resolve_connectors(&records, &table(&["1", "2"]));
        assert!(connectors.is_empty());
    }

    #[test]
    fn test_styles_are_distinct() {
        let parent = ConnectorKind::Parent.style();
        let spouse = ConnectorKind::Spouse.style();
        assert_ne!(parent.stroke, spouse.stroke);
        assert!(parent.dash.is_none());
        assert!(spouse.dash.is_some());
        assert!(spouse.width > parent.width);
    }

    #[test]
    fn test_duplicate_element_keeps_last() {
        let positions = PositionTable::from_rects(vec![
            ("person-1", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("person-1", Rect::new(100.0, 0.0, 10.0, 10.0)),
        ]);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions.get("person-1"), Some(Point::new(105.0, 5.0)));
    }
}
