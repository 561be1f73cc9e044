//! Incremental photo loader backing an infinite-scrolling grid.
//!
//! The loader owns the pagination state and the growing photo collection.
//! Pages are requested one at a time: a load-more signal is ignored while a
//! fetch is in flight or after the catalog has returned an empty page. Each
//! fetch runs on its own tokio task under a child of the loader's
//! [`CancellationToken`], so a result that arrives after the loader was
//! dropped or re-initialized is discarded instead of applied.
//!
//! Consumers read state through [`PhotoLoader::get_state`] or follow every
//! transition through [`PhotoLoader::subscribe`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use picsum_api::types::{Photo, PhotoID};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::catalog::Catalog;
use crate::config::GalleryConfig;
use crate::error::LoadError;

/// Where the loader is in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Next page to request (1-indexed).
    pub current_page: u32,
    /// False once the catalog returned an empty page.
    pub has_more: bool,
    /// True while a page request is outstanding.
    pub is_loading: bool,
    /// Failure of the most recent request, cleared by the next success.
    pub last_error: Option<LoadError>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more: true,
            is_loading: false,
            last_error: None,
        }
    }
}

/// Read-only view of the loader handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSnapshot {
    pub photos: Arc<Vec<Photo>>,
    pub current_page: u32,
    pub is_loading: bool,
    pub has_more: bool,
    pub last_error: Option<LoadError>,
}

impl LoaderSnapshot {
    /// A failure with nothing loaded yet. Grids show a full-page error with a
    /// reload action here, and an inline error otherwise.
    pub fn is_initial_failure(&self) -> bool {
        self.last_error.is_some() && self.photos.is_empty()
    }

    /// The catalog is exhausted and at least one photo was shown.
    pub fn reached_end(&self) -> bool {
        !self.has_more && !self.photos.is_empty()
    }
}

/// Tracks which rendered item the grid is watching for visibility.
///
/// The observed item is always the last photo of the collection. It moves
/// after every append and disconnects once the catalog is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityTrigger {
    observed: Option<PhotoID>,
}

impl VisibilityTrigger {
    fn observe(&mut self, id: &str) {
        if self.observed.as_deref() != Some(id) {
            tracing::trace!("visibility trigger moved to photo {}", id);
            self.observed = Some(id.to_string());
        }
    }

    fn disconnect(&mut self) {
        self.observed = None;
    }

    /// Id of the item currently observed, if any.
    pub fn observed(&self) -> Option<&str> {
        self.observed.as_deref()
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.as_deref() == Some(id)
    }
}

/// How a page request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// `count` photos from `page` were appended.
    Appended { page: u32, count: usize },
    /// `page` was empty; the loader will not request more.
    Exhausted { page: u32 },
    /// `page` failed; the next signal requests it again.
    Failed { page: u32, error: LoadError },
    /// The loader was dropped or re-initialized before the result arrived.
    Discarded { page: u32 },
}

/// Handle to an in-flight page request.
///
/// Dropping the handle does not cancel the request.
#[derive(Debug)]
pub struct FetchHandle {
    page: u32,
    task: JoinHandle<FetchOutcome>,
}

impl FetchHandle {
    /// Page being requested.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Waits for the request to settle. A task that panicked reports
    /// `Discarded` and leaves the loader ready for the next signal.
    pub async fn wait(self) -> FetchOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("page {} fetch task failed: {}", self.page, e);
                FetchOutcome::Discarded { page: self.page }
            }
        }
    }
}

struct Inner {
    pagination: PaginationState,
    photos: Arc<Vec<Photo>>,
    trigger: VisibilityTrigger,
    /// Bumped by `initialize`; fetches started under an older generation are stale.
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl Inner {
    fn new() -> Self {
        Self {
            pagination: PaginationState::default(),
            photos: Arc::new(Vec::new()),
            trigger: VisibilityTrigger::default(),
            generation: 0,
            in_flight: None,
        }
    }

    fn snapshot(&self) -> LoaderSnapshot {
        LoaderSnapshot {
            photos: Arc::clone(&self.photos),
            current_page: self.pagination.current_page,
            is_loading: self.pagination.is_loading,
            has_more: self.pagination.has_more,
            last_error: self.pagination.last_error.clone(),
        }
    }
}

/// State shared between the loader and its fetch tasks.
struct Shared {
    inner: Mutex<Inner>,
    tx: watch::Sender<LoaderSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, inner: &Inner) {
        self.tx.send_replace(inner.snapshot());
    }

    fn apply(
        &self,
        page: u32,
        generation: u64,
        token: &CancellationToken,
        result: Result<Vec<Photo>, picsum_api::Error>,
    ) -> FetchOutcome {
        let mut inner = self.lock();
        if token.is_cancelled() || inner.generation != generation {
            tracing::debug!("discarding stale result for page {}", page);
            return FetchOutcome::Discarded { page };
        }
        inner.in_flight = None;
        inner.pagination.is_loading = false;

        let outcome = match result {
            Ok(photos) if photos.is_empty() => {
                tracing::debug!("page {} is empty, catalog exhausted", page);
                inner.pagination.has_more = false;
                inner.pagination.last_error = None;
                inner.trigger.disconnect();
                FetchOutcome::Exhausted { page }
            }
            Ok(photos) => {
                warn_on_duplicates(&inner.photos, &photos, page);
                let count = photos.len();
                Arc::make_mut(&mut inner.photos).extend(photos);
                inner.pagination.current_page += 1;
                inner.pagination.last_error = None;
                let last = inner.photos.last().map(|p| p.id.clone());
                if let Some(last) = last {
                    inner.trigger.observe(&last);
                }
                tracing::debug!(
                    "page {} appended {} photos ({} total)",
                    page,
                    count,
                    inner.photos.len()
                );
                FetchOutcome::Appended { page, count }
            }
            Err(e) => {
                tracing::warn!("page {} failed: {}", page, e);
                let error = LoadError::page(e);
                inner.pagination.last_error = Some(error.clone());
                FetchOutcome::Failed { page, error }
            }
        };
        self.publish(&inner);
        outcome
    }
}

/// Clears the loading flag if a fetch task unwinds before its result is
/// applied, so later signals are not ignored forever.
struct FetchGuard {
    shared: Arc<Shared>,
    page: u32,
    generation: u64,
    token: CancellationToken,
    armed: bool,
}

impl FetchGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if !self.armed || self.token.is_cancelled() {
            return;
        }
        let mut inner = self.shared.lock();
        if inner.generation != self.generation {
            return;
        }
        tracing::error!("page {} fetch ended without a result", self.page);
        inner.in_flight = None;
        inner.pagination.is_loading = false;
        self.shared.publish(&inner);
    }
}

/// Appending never drops records; repeated ids are only reported.
fn warn_on_duplicates(existing: &[Photo], incoming: &[Photo], page: u32) {
    let seen: HashSet<&str> = existing.iter().map(|p| p.id.as_str()).collect();
    let duplicates = incoming
        .iter()
        .filter(|p| seen.contains(p.id.as_str()))
        .count();
    if duplicates > 0 {
        tracing::warn!(
            "page {} repeats {} photo id(s) already in the collection",
            page,
            duplicates
        );
    }
}

/// Pages through a [`Catalog`] on demand.
///
/// Must be used from within a tokio runtime: each page request is spawned.
/// Dropping the loader cancels any outstanding request.
pub struct PhotoLoader<C: Catalog> {
    catalog: Arc<C>,
    page_size: u32,
    shared: Arc<Shared>,
    shutdown: CancellationToken,
}

impl<C: Catalog> PhotoLoader<C> {
    /// Creates a loader at page 1 with an empty collection. No request is
    /// made until the first load-more signal.
    pub fn new(catalog: Arc<C>, page_size: u32) -> Self {
        let inner = Inner::new();
        let (tx, _) = watch::channel(inner.snapshot());
        Self {
            catalog,
            page_size,
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                tx,
            }),
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a loader using the configured page size.
    pub fn with_config(catalog: Arc<C>, config: &GalleryConfig) -> Self {
        Self::new(catalog, config.page_size)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Resets to page 1 with an empty collection. An outstanding request is
    /// cancelled and its result will be discarded.
    pub fn initialize(&self) {
        let mut inner = self.shared.lock();
        if let Some(token) = inner.in_flight.take() {
            token.cancel();
        }
        inner.generation += 1;
        inner.pagination = PaginationState::default();
        inner.photos = Arc::new(Vec::new());
        inner.trigger.disconnect();
        tracing::debug!("loader reset (generation {})", inner.generation);
        self.shared.publish(&inner);
    }

    /// Requests the next page unless one is already in flight or the catalog
    /// is exhausted, in which case this is a no-op returning `None`.
    pub fn on_load_more_signal(&self) -> Option<FetchHandle> {
        let (page, generation, token) = {
            let mut inner = self.shared.lock();
            if inner.pagination.is_loading || !inner.pagination.has_more {
                tracing::trace!(
                    "load-more ignored (loading: {}, has_more: {})",
                    inner.pagination.is_loading,
                    inner.pagination.has_more
                );
                return None;
            }
            inner.pagination.is_loading = true;
            let token = self.shutdown.child_token();
            inner.in_flight = Some(token.clone());
            self.shared.publish(&inner);
            (inner.pagination.current_page, inner.generation, token)
        };

        tracing::debug!("requesting page {} (limit {})", page, self.page_size);
        let catalog = Arc::clone(&self.catalog);
        let shared = Arc::clone(&self.shared);
        let limit = self.page_size;
        let task = tokio::spawn(async move {
            let guard = FetchGuard {
                shared: Arc::clone(&shared),
                page,
                generation,
                token: token.clone(),
                armed: true,
            };
            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("page {} request cancelled", page);
                    return FetchOutcome::Discarded { page };
                }
                result = catalog.list_photos(page, limit) => result,
            };
            let outcome = shared.apply(page, generation, &token, result);
            guard.disarm();
            outcome
        });
        Some(FetchHandle { page, task })
    }

    /// Visibility callback for a rendered item. Only the observed (last)
    /// item triggers a load.
    pub fn on_item_visible(&self, id: &str) -> Option<FetchHandle> {
        if !self.shared.lock().trigger.is_observing(id) {
            return None;
        }
        self.on_load_more_signal()
    }

    /// Id of the item the visibility trigger is attached to.
    pub fn observed_item(&self) -> Option<PhotoID> {
        self.shared.lock().trigger.observed().map(str::to_string)
    }

    pub fn get_state(&self) -> LoaderSnapshot {
        self.shared.lock().snapshot()
    }

    pub fn pagination(&self) -> PaginationState {
        self.shared.lock().pagination.clone()
    }

    /// Receiver that sees every state transition.
    pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot> {
        self.shared.tx.subscribe()
    }
}

impl<C: Catalog> Drop for PhotoLoader<C> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
