//! Load orchestration
//!
//! Fetches the spreadsheet text from a [`DataSource`] and drives parsing,
//! grouping and layout onto a [`RenderSurface`]. Connector drawing is handed
//! back as a [`PendingDraw`] so it runs only after the surface has settled its
//! layout, and only if no newer load cycle has started in the meantime.

use crate::core::labels::Labels;
use crate::core::models::PersonRecord;
use crate::core::render::{RenderSurface, Status, SurfaceError};
use crate::core::sheet::parse_csv;
use crate::core::tree::{resolve_connectors, select_valid, ConnectorKind, PositionTable, TreeContent};
use crate::{debug, error, info};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a load cycle
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request could not be sent or the body could not be read
    #[error("Transport error: {0}")]
    Transport(Box<reqwest::Error>),

    /// The server answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// A local source could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The render surface could not take the tree
    #[error("Render surface error: {0}")]
    Surface(#[from] SurfaceError),
}

impl From<reqwest::Error> for LoadError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(Box::new(error))
    }
}

/// Something that yields raw spreadsheet CSV text
pub trait DataSource {
    /// Fetch the complete CSV text
    ///
    /// # Errors
    /// Returns a [`LoadError`] when the text cannot be obtained
    fn fetch(&self) -> Result<String, LoadError>;

    /// Human-readable location used in log messages
    fn describe(&self) -> String;
}

impl<D: DataSource + ?Sized> DataSource for Box<D> {
    fn fetch(&self) -> Result<String, LoadError> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Published spreadsheet fetched over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    /// Create a source for the given CSV export URL
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    /// The export URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<String, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// CSV export saved to a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<String, LoadError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Cancellation handle owned by one load cycle
///
/// A token is current until the loader that issued it starts another cycle.
#[derive(Debug, Clone)]
pub struct CycleToken {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl CycleToken {
    /// Whether no newer cycle has started since this one
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }

    /// Sequence number of the cycle
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

/// Result of running a deferred connector pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Connectors were drawn
    Drawn {
        /// Number of parent links
        parent_links: usize,
        /// Number of spouse links
        spouse_links: usize,
    },
    /// The container shows the "no data" placeholder; nothing to draw
    NoData,
    /// A newer load cycle started; the surface was left untouched
    Superseded,
}

/// Connector pass scheduled by a load cycle
///
/// Run it after the surface has had its chance to settle; running it
/// performs the settle checkpoint itself before measuring.
#[derive(Debug)]
#[must_use = "connectors are only drawn when the pending draw is run"]
pub struct PendingDraw {
    token: CycleToken,
    records: Option<Vec<PersonRecord>>,
}

impl PendingDraw {
    /// Token of the cycle that scheduled this draw
    pub const fn token(&self) -> &CycleToken {
        &self.token
    }

    /// Settle the surface, measure card positions and draw connectors
    pub fn run(self, surface: &mut dyn RenderSurface) -> DrawOutcome {
        if !self.token.is_current() {
            debug!("Cycle {} superseded, skipping connector pass", self.token.id);
            return DrawOutcome::Superseded;
        }
        let Some(records) = self.records else {
            return DrawOutcome::NoData;
        };

        surface.flush_layout();
        let positions = PositionTable::from_rects(surface.card_rects());
        let connectors = resolve_connectors(&records, &positions);

        let parent_links = connectors
            .iter()
            .filter(|c| c.kind == ConnectorKind::Parent)
            .count();
        let spouse_links = connectors.len() - parent_links;
        debug!(
            "Cycle {}: {} cards measured, {parent_links} parent and {spouse_links} spouse links",
            self.token.id,
            positions.len()
        );

        surface.replace_connectors(connectors);
        DrawOutcome::Drawn {
            parent_links,
            spouse_links,
        }
    }
}

/// Drives full load cycles from a data source onto a render surface
#[derive(Debug)]
pub struct TreeLoader<S> {
    source: S,
    labels: Labels,
    latest_cycle: Arc<AtomicU64>,
}

impl<S: DataSource> TreeLoader<S> {
    /// Create a loader for the given source
    pub fn new(source: S, labels: Labels) -> Self {
        Self {
            source,
            labels,
            latest_cycle: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The data source
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn begin_cycle(&self) -> CycleToken {
        let id = self.latest_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        CycleToken {
            id,
            latest: Arc::clone(&self.latest_cycle),
        }
    }

    /// Run one load cycle up to the point where connectors can be drawn
    ///
    /// Invalidates the pending draw of every earlier cycle. On success the
    /// container holds the new tree (or the "no data" placeholder) and the
    /// status region is hidden.
    ///
    /// # Errors
    /// Returns a [`LoadError`] if fetching fails (the status region then shows
    /// the failure message) or if the surface has no container.
    pub fn load(&self, surface: &mut dyn RenderSurface) -> Result<PendingDraw, LoadError> {
        let token = self.begin_cycle();
        surface.set_status(Status::Loading(self.labels.loading.to_string()));

        let text = self.source.fetch().map_err(|e| {
            error!("Failed to load data from {}: {e}", self.source.describe());
            surface.set_status(Status::Failed(self.labels.load_failed.to_string()));
            e
        })?;
        info!(
            "Fetched {} bytes from {}",
            text.len(),
            self.source.describe()
        );

        let records: Vec<PersonRecord> = parse_csv(&text)
            .iter()
            .map(PersonRecord::from_raw)
            .collect();
        let valid = select_valid(records);
        let content = TreeContent::build(&valid, &self.labels);
        let has_tree = content.layout().is_some();

        surface.replace_content(content).map_err(|e| {
            error!("Cannot build tree: {e}");
            LoadError::from(e)
        })?;
        surface.set_status(Status::Hidden);

        Ok(PendingDraw {
            token,
            records: has_tree.then_some(valid),
        })
    }

    /// Run a complete cycle: load, settle, then draw connectors
    ///
    /// # Errors
    /// Same as [`load`](Self::load)
    pub fn refresh(&self, surface: &mut dyn RenderSurface) -> Result<DrawOutcome, LoadError> {
        let pending = self.load(surface)?;
        Ok(pending.run(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::MemorySurface;
    use std::cell::Cell;

    struct StaticSource {
        text: &'static str,
        fetches: Cell<usize>,
    }

    impl StaticSource {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                fetches: Cell::new(0),
            }
        }
    }

    impl DataSource for StaticSource {
        fn fetch(&self) -> Result<String, LoadError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.text.to_string())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct FailingSource;

    impl DataSource for FailingSource {
        fn fetch(&self) -> Result<String, LoadError> {
            Err(LoadError::Status(404))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    const FAMILY: &str = "ID,Поколение,Имя,Отец ID\n1,1,Анна,\n2,2,Борис,1";

    #[test]
    fn test_refresh_draws_parent_link() {
        let loader = TreeLoader::new(StaticSource::new(FAMILY), Labels::default());
        let mut surface = MemorySurface::new();

        let outcome = loader.refresh(&mut surface).unwrap();
        assert_eq!(
            outcome,
            DrawOutcome::Drawn {
                parent_links: 1,
                spouse_links: 0
            }
        );
        assert_eq!(surface.status(), Some(&Status::Hidden));
        assert_eq!(surface.connectors()[0].from_id, "person-1");
        assert_eq!(surface.connectors()[0].to_id, "person-2");
    }

    #[test]
    fn test_stale_draw_is_superseded() {
        let loader = TreeLoader::new(StaticSource::new(FAMILY), Labels::default());
        let mut surface = MemorySurface::new();

        let first = loader.load(&mut surface).unwrap();
        let second = loader.load(&mut surface).unwrap();
        assert!(!first.token().is_current());
        assert!(second.token().is_current());

        assert_eq!(first.run(&mut surface), DrawOutcome::Superseded);
        assert!(surface.connectors().is_empty());
        assert!(matches!(second.run(&mut surface), DrawOutcome::Drawn { .. }));
        assert_eq!(loader.source().fetches.get(), 2);
    }

    #[test]
    fn test_fetch_failure_sets_status() {
        let loader = TreeLoader::new(FailingSource, Labels::default());
        let mut surface = MemorySurface::new();

        let err = loader.load(&mut surface).unwrap_err();
        assert!(matches!(err, LoadError::Status(404)));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
        assert_eq!(
            surface.status(),
            Some(&Status::Failed(
                "Ошибка загрузки. Проверьте подключение.".to_string()
            ))
        );
        assert!(surface.content().is_none());
    }

    #[test]
    fn test_header_only_is_no_data() {
        let loader = TreeLoader::new(StaticSource::new("ID,Имя\n"), Labels::default());
        let mut surface = MemorySurface::new();

        assert_eq!(loader.refresh(&mut surface).unwrap(), DrawOutcome::NoData);
        assert_eq!(
            surface.content(),
            Some(&TreeContent::NoData("Нет данных.".to_string()))
        );
        assert_eq!(surface.connector_layers(), 0);
    }

    #[test]
    fn test_missing_container_aborts() {
        let loader = TreeLoader::new(StaticSource::new(FAMILY), Labels::default());
        let mut surface = MemorySurface::without_container();

        let err = loader.load(&mut surface).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Surface(SurfaceError::MissingContainer(_))
        ));
        assert!(matches!(surface.status(), Some(Status::Loading(_))));
    }

    #[test]
    fn test_file_source_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.csv");
        fs::write(&path, FAMILY).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.fetch().unwrap(), FAMILY);
        assert!(source.describe().ends_with("tree.csv"));

        let missing = FileSource::new(dir.path().join("missing.csv"));
        assert!(matches!(missing.fetch(), Err(LoadError::Io(_))));
    }
}
