//! Integration tests for full load cycles onto render surfaces

use family_tree::core::labels::{Labels, Locale};
use family_tree::core::loader::{DataSource, DrawOutcome, FileSource, LoadError, TreeLoader};
use family_tree::core::render::{HtmlSurface, MemorySurface, RenderSurface, Status};
use family_tree::core::tree::{ConnectorKind, LayoutMetrics, TreeContent};
use std::fs;
use tempfile::TempDir;

struct SheetText(&'static str);

impl DataSource for SheetText {
    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.0.to_string())
    }

    fn describe(&self) -> String {
        "inline sheet".to_string()
    }
}

struct Offline;

impl DataSource for Offline {
    fn fetch(&self) -> Result<String, LoadError> {
        Err(LoadError::Status(503))
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

const TWO_GENERATIONS: &str = "ID,Поколение,Имя,Отец ID\n1,1,Анна,\n2,2,Борис,1";

const FAMILY: &str = "ID,Поколение,Имя,Дата рождения,Дата смерти,Фото URL,Отец ID,Мать ID,Супруг ID
1,1,Иван,1920,1990,,,,2
2,1,Мария,1925,,,,,1
3,2,Пётр,1950,,,1,2,
4,2,,,,,1,2,
x,2,Ошибка,,,,,,";

fn memory_refresh(text: &'static str) -> (MemorySurface, Result<DrawOutcome, LoadError>) {
    let loader = TreeLoader::new(SheetText(text), Labels::default());
    let mut surface = MemorySurface::new();
    let outcome = loader.refresh(&mut surface);
    (surface, outcome)
}

#[test]
fn two_generation_sheet_draws_one_parent_link() {
    let (surface, outcome) = memory_refresh(TWO_GENERATIONS);
    assert_eq!(
        outcome.unwrap(),
        DrawOutcome::Drawn {
            parent_links: 1,
            spouse_links: 0
        }
    );

    let layout = surface.content().and_then(TreeContent::layout).unwrap();
    assert_eq!(layout.card_count(), 2);
    let keys: Vec<&str> = layout.bands.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, ["1", "2"]);

    let line = &surface.connectors()[0];
    assert_eq!(line.kind, ConnectorKind::Parent);
    assert_eq!(line.from_id, "person-1");
    assert_eq!(line.to_id, "person-2");
    assert!(line.from.y < line.to.y);
    assert_eq!(surface.status(), Some(&Status::Hidden));
}

#[test]
fn family_sheet_counts_links_and_skips_invalid_rows() {
    let (surface, outcome) = memory_refresh(FAMILY);
    assert_eq!(
        outcome.unwrap(),
        DrawOutcome::Drawn {
            parent_links: 4,
            spouse_links: 1
        }
    );

    let layout = surface.content().and_then(TreeContent::layout).unwrap();
    assert_eq!(layout.card_count(), 4);
    assert!(layout.card("person-x").is_none());

    let unnamed = layout.card("person-4").unwrap();
    assert_eq!(unnamed.name, "—");
    assert_eq!(unnamed.life_span, "? – н.в.");

    let spouse: Vec<_> = surface.connectors_of(ConnectorKind::Spouse).collect();
    assert_eq!(spouse.len(), 1);
    assert_eq!(spouse[0].from_id, "person-1");
    assert_eq!(spouse[0].to_id, "person-2");
}

#[test]
fn refresh_replaces_previous_tree() {
    let loader = TreeLoader::new(SheetText(FAMILY), Labels::default());
    let mut surface = MemorySurface::new();

    loader.refresh(&mut surface).unwrap();
    let first = surface.content().cloned();
    let first_lines = surface.connectors().to_vec();

    loader.refresh(&mut surface).unwrap();
    assert_eq!(surface.content().cloned(), first);
    assert_eq!(surface.connectors(), first_lines.as_slice());
    assert_eq!(surface.connector_layers(), 1);
}

#[test]
fn dangling_references_draw_nothing() {
    let (surface, outcome) = memory_refresh("ID,Поколение,Отец ID,Супруг ID\n5,1,77,88");
    assert_eq!(
        outcome.unwrap(),
        DrawOutcome::Drawn {
            parent_links: 0,
            spouse_links: 0
        }
    );
    assert!(surface.connectors().is_empty());
}

#[test]
fn header_only_sheet_shows_no_data() {
    let (surface, outcome) = memory_refresh("ID,Поколение,Имя");
    assert_eq!(outcome.unwrap(), DrawOutcome::NoData);
    assert_eq!(
        surface.content(),
        Some(&TreeContent::NoData("Нет данных.".to_string()))
    );
    assert_eq!(surface.connector_layers(), 0);
}

#[test]
fn generations_sort_numerically() {
    let (surface, _) = memory_refresh("ID,Поколение\n1,10\n2,2\n3,\n4,1");
    let layout = surface.content().and_then(TreeContent::layout).unwrap();
    let keys: Vec<&str> = layout.bands.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, ["1", "2", "10"]);
    assert_eq!(layout.bands[0].cards.len(), 2);
    assert_eq!(layout.bands[0].label, "Поколение 1");
}

#[test]
fn failed_fetch_keeps_error_status() {
    let loader = TreeLoader::new(Offline, Labels::for_locale(Locale::En));
    let mut surface = MemorySurface::new();

    let err = loader.refresh(&mut surface).unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 503");
    assert_eq!(
        surface.status(),
        Some(&Status::Failed("Load failed. Check your connection.".to_string()))
    );
    assert!(surface.content().is_none());
}

#[test]
fn earlier_pending_draw_is_superseded() {
    let loader = TreeLoader::new(SheetText(TWO_GENERATIONS), Labels::default());
    let mut surface = MemorySurface::new();

    let stale = loader.load(&mut surface).unwrap();
    let fresh = loader.load(&mut surface).unwrap();

    assert_eq!(stale.run(&mut surface), DrawOutcome::Superseded);
    assert!(surface.connectors().is_empty());
    assert!(matches!(fresh.run(&mut surface), DrawOutcome::Drawn { .. }));
    assert_eq!(surface.connectors().len(), 1);
}

#[test]
fn html_page_contains_cards_and_lines() {
    let loader = TreeLoader::new(SheetText(FAMILY), Labels::default());
    let mut surface = HtmlSurface::new(LayoutMetrics::default());
    loader.refresh(&mut surface).unwrap();

    let page = surface.render().unwrap();
    assert!(page.contains("id=\"person-1\""));
    assert!(page.contains("id=\"person-4\""));
    assert!(!page.contains("person-x"));
    assert_eq!(page.matches("class=\"parent-link\"").count(), 4);
    assert_eq!(page.matches("class=\"spouse-link\"").count(), 1);
    assert!(page.contains("Поколение 2"));
}

#[test]
fn html_template_without_container_aborts() {
    let loader = TreeLoader::new(SheetText(TWO_GENERATIONS), Labels::default());
    let mut surface =
        HtmlSurface::with_template("<html>{{status}}</html>", LayoutMetrics::default());

    let err = loader.refresh(&mut surface).unwrap_err();
    assert!(matches!(err, LoadError::Surface(_)));
    assert!(surface.content().is_none());
}

#[test]
fn file_source_feeds_html_page() {
    let dir = TempDir::new().unwrap();
    let sheet = dir.path().join("people.csv");
    fs::write(&sheet, "ID,Поколение,Имя\r\n1,1,Анна\r\n").unwrap();

    let loader = TreeLoader::new(FileSource::new(&sheet), Labels::default());
    let mut surface = HtmlSurface::new(LayoutMetrics::default());
    loader.refresh(&mut surface).unwrap();

    let out = dir.path().join("tree.html");
    surface.write(&out).unwrap();
    let page = fs::read_to_string(out).unwrap();
    assert!(page.contains("Анна"));
    assert!(page.contains("<html lang=\"ru\""));
}

#[test]
fn surface_trait_objects_are_interchangeable() {
    let loader = TreeLoader::new(SheetText(TWO_GENERATIONS), Labels::default());
    let mut surfaces: Vec<Box<dyn RenderSurface>> = vec![
        Box::new(MemorySurface::new()),
        Box::new(HtmlSurface::new(LayoutMetrics::default())),
    ];
    for surface in &mut surfaces {
        let outcome = loader.refresh(surface.as_mut()).unwrap();
        assert!(matches!(outcome, DrawOutcome::Drawn { parent_links: 1, .. }));
        assert_eq!(surface.card_rects().len(), 2);
    }
}
