use serde::{Deserialize, Serialize};

pub type PhotoID = String;

/// A photo record as returned by `/v2/list` and `/id/{id}/info`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoID,
    pub author: String,
    pub width: u32,
    pub height: u32,
    /// Page of the original upload (usually Unsplash).
    pub url: String,
    /// Direct link to the full resolution image.
    pub download_url: String,
    /// Caption, when the catalog has one. `/v2/list` does not send it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Requested pixel dimensions for a rendered image.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Default thumbnail dimensions.
    pub const THUMBNAIL: ImageSize = ImageSize::new(400, 300);
    /// Portrait thumbnail used by grid cards.
    pub const CARD: ImageSize = ImageSize::new(600, 750);
    /// Default full-size dimensions.
    pub const FULL: ImageSize = ImageSize::new(1200, 800);
    /// Full-size dimensions used by the detail view.
    pub const DETAIL: ImageSize = ImageSize::new(1400, 900);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

impl Photo {
    /// Original dimensions of the uploaded image.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}
