//! Single-photo loading for a detail view.

use std::sync::Arc;

use picsum_api::types::{ImageSize, Photo};
use picsum_api::Client;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::catalog::Catalog;
use crate::error::LoadError;

/// Description shown in the detail view when the photo has none of its own.
pub const DEFAULT_DESCRIPTION: &str = "A beautiful image from Lorem Picsum, carefully curated to \
inspire creativity and showcase the art of visual storytelling. Each photograph in our collection \
represents a unique perspective and moment captured in time.";

/// Loading state of a detail view. `Loaded` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(Photo),
    Failed(LoadError),
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading)
    }

    pub fn photo(&self) -> Option<&Photo> {
        match self {
            DetailState::Loaded(photo) => Some(photo),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            DetailState::Failed(error) => Some(error),
            _ => None,
        }
    }

    fn from_result(result: Result<Photo, picsum_api::Error>) -> Self {
        match result {
            Ok(photo) => DetailState::Loaded(photo),
            Err(e) => DetailState::Failed(LoadError::detail(e)),
        }
    }
}

/// Fetches one photo when mounted. There is no retry: a failed loader stays
/// failed and a new one must be mounted.
///
/// Dropping the loader cancels the request; a late response is discarded.
pub struct DetailLoader {
    id: String,
    rx: watch::Receiver<DetailState>,
    shutdown: CancellationToken,
}

impl DetailLoader {
    /// Starts fetching `id`. Must be called from within a tokio runtime.
    pub fn mount<C: Catalog>(catalog: Arc<C>, id: &str) -> Self {
        let (tx, rx) = watch::channel(DetailState::Loading);
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let photo_id = id.to_string();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("detail request for {} cancelled", photo_id);
                    return;
                }
                result = catalog.get_photo(&photo_id) => result,
            };
            if token.is_cancelled() {
                tracing::debug!("discarding late detail result for {}", photo_id);
                return;
            }
            if let Err(e) = &result {
                tracing::warn!("detail for {} failed: {}", photo_id, e);
            }
            tx.send_replace(DetailState::from_result(result));
        });
        Self {
            id: id.to_string(),
            rx,
            shutdown,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current state without waiting.
    pub fn state(&self) -> DetailState {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.rx.clone()
    }

    /// Waits until the request settles and returns the terminal state.
    pub async fn wait(&mut self) -> DetailState {
        let settled = self
            .rx
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            // The fetch task ended without publishing (cancelled).
            Err(_) => self.rx.borrow().clone(),
        }
    }
}

impl Drop for DetailLoader {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Fetches `id` and resolves straight to the terminal state.
pub async fn load_detail<C: Catalog + ?Sized>(catalog: &C, id: &str) -> DetailState {
    DetailState::from_result(catalog.get_photo(id).await)
}

/// Display fields of the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoDetail {
    pub id: String,
    pub author: String,
    /// Original dimensions, e.g. `5000 × 3333`.
    pub dimensions: String,
    pub description: String,
    /// Full-size rendering shown in the view.
    pub image_url: String,
    /// Page of the original upload.
    pub source_url: String,
    pub download_url: String,
}

impl PhotoDetail {
    pub fn new(photo: &Photo, client: &Client) -> Self {
        let size = ImageSize::DETAIL;
        Self {
            id: photo.id.clone(),
            author: photo.author.clone(),
            dimensions: photo.size().to_string(),
            description: photo
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
            image_url: client.full_size_url(&photo.id, size.width, size.height),
            source_url: photo.url.clone(),
            download_url: photo.download_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::scripted::{photo, ScriptedCatalog};

    #[tokio::test]
    async fn known_id_loads() {
        let catalog = Arc::new(ScriptedCatalog::new());
        catalog.insert_photo(photo("237"));

        let mut loader = DetailLoader::mount(Arc::clone(&catalog), "237");
        assert_eq!(loader.id(), "237");
        let state = loader.wait().await;
        assert_eq!(state.photo().map(|p| p.id.as_str()), Some("237"));
        assert!(!loader.state().is_loading());
    }

    #[tokio::test]
    async fn unknown_id_fails() {
        let catalog = Arc::new(ScriptedCatalog::new());

        let mut loader = DetailLoader::mount(Arc::clone(&catalog), "nonexistent");
        let state = loader.wait().await;
        let error = state.error().unwrap();
        assert!(error.is_not_found());
        assert_eq!(error.message(), LoadError::DETAIL_MESSAGE);
    }

    #[tokio::test]
    async fn starts_loading() {
        let catalog = Arc::new(ScriptedCatalog::new());
        catalog.insert_photo(photo("1"));
        let gate = catalog.gate();

        let mut loader = DetailLoader::mount(Arc::clone(&catalog), "1");
        assert!(loader.state().is_loading());
        gate.notify_one();
        assert!(matches!(loader.wait().await, DetailState::Loaded(_)));
    }

    #[tokio::test]
    async fn drop_discards_late_result() {
        let catalog = Arc::new(ScriptedCatalog::new());
        catalog.insert_photo(photo("1"));
        let gate = catalog.gate();

        let loader = DetailLoader::mount(Arc::clone(&catalog), "1");
        let mut rx = loader.subscribe();
        drop(loader);
        gate.notify_one();

        // Sender goes away without ever publishing a result.
        assert!(rx.changed().await.is_err());
        assert!(rx.borrow().is_loading());
    }

    #[tokio::test]
    async fn load_detail_resolves_directly() {
        let catalog = ScriptedCatalog::new();
        catalog.insert_photo(photo("10"));
        assert!(matches!(
            load_detail(&catalog, "10").await,
            DetailState::Loaded(_)
        ));
        assert!(matches!(
            load_detail(&catalog, "11").await,
            DetailState::Failed(_)
        ));
    }

    #[test]
    fn photo_detail_fields() {
        let client = Client::with_base_url("https://picsum.photos");
        let detail = PhotoDetail::new(&photo("237"), &client);
        assert_eq!(detail.author, "Author 237");
        assert_eq!(detail.dimensions, "4000 × 3000");
        assert_eq!(detail.image_url, "https://picsum.photos/id/237/1400/900");
        assert_eq!(detail.source_url, "https://unsplash.com/photos/237");
        assert_eq!(detail.download_url, "https://picsum.photos/id/237/4000/3000");
        assert_eq!(detail.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn photo_detail_prefers_catalog_description() {
        let client = Client::new();
        let mut captioned = photo("3");
        captioned.description = Some("Fog over the bay".to_string());
        assert_eq!(
            PhotoDetail::new(&captioned, &client).description,
            "Fog over the bay"
        );

        captioned.description = Some("  ".to_string());
        assert_eq!(
            PhotoDetail::new(&captioned, &client).description,
            DEFAULT_DESCRIPTION
        );
    }
}
