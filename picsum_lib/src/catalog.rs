//! The catalog seam the loaders fetch through.

use async_trait::async_trait;
use picsum_api::types::Photo;
use picsum_api::{Client, Error};

/// Source of photo records. Implemented by [`picsum_api::Client`]; tests
/// substitute scripted doubles.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Fetches page `page` (1-indexed) holding at most `limit` photos.
    async fn list_photos(&self, page: u32, limit: u32) -> Result<Vec<Photo>, Error>;

    /// Fetches a single photo by id.
    async fn get_photo(&self, id: &str) -> Result<Photo, Error>;
}

#[async_trait]
impl Catalog for Client {
    async fn list_photos(&self, page: u32, limit: u32) -> Result<Vec<Photo>, Error> {
        Client::list_photos(self, page, limit).await
    }

    async fn get_photo(&self, id: &str) -> Result<Photo, Error> {
        Client::get_photo(self, id).await
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    //! In-memory catalog whose responses are queued per page, with optional
    //! gates that hold a request open until released.

    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use picsum_api::types::Photo;
    use picsum_api::Error;
    use tokio::sync::Notify;

    use super::Catalog;

    type Response = Result<Vec<Photo>, Error>;

    #[derive(Default)]
    pub struct ScriptedCatalog {
        pages: Mutex<HashMap<u32, VecDeque<Response>>>,
        photos: Mutex<HashMap<String, Photo>>,
        gate: Mutex<Option<Arc<Notify>>>,
        calls: Mutex<Vec<(u32, u32)>>,
    }

    pub fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            author: format!("Author {}", id),
            width: 4000,
            height: 3000,
            url: format!("https://unsplash.com/photos/{}", id),
            download_url: format!("https://picsum.photos/id/{}/4000/3000", id),
            description: None,
        }
    }

    /// `count` photos with ids `start..start + count`.
    pub fn photos(start: usize, count: usize) -> Vec<Photo> {
        (start..start + count).map(|i| photo(&i.to_string())).collect()
    }

    impl ScriptedCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a response for `page`. Responses for the same page are
        /// served in the order they were queued.
        pub fn respond(&self, page: u32, response: Response) -> &Self {
            self.pages
                .lock()
                .unwrap()
                .entry(page)
                .or_default()
                .push_back(response);
            self
        }

        pub fn insert_photo(&self, photo: Photo) -> &Self {
            self.photos.lock().unwrap().insert(photo.id.clone(), photo);
            self
        }

        /// Makes every subsequent request wait on the returned `Notify`.
        pub fn gate(&self) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
            notify
        }

        /// `(page, limit)` of every listing request, in call order.
        pub fn calls(&self) -> Vec<(u32, u32)> {
            self.calls.lock().unwrap().clone()
        }

        async fn wait_gate(&self) {
            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl Catalog for ScriptedCatalog {
        async fn list_photos(&self, page: u32, limit: u32) -> Result<Vec<Photo>, Error> {
            self.calls.lock().unwrap().push((page, limit));
            self.wait_gate().await;
            self.pages
                .lock()
                .unwrap()
                .get_mut(&page)
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get_photo(&self, id: &str) -> Result<Photo, Error> {
            self.wait_gate().await;
            self.photos
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| Error::NotFound { id: id.to_string() })
        }
    }
}
