use regex::Regex;

use crate::error::GalleryError;

/// Largest page size the catalog accepts.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Largest edge length accepted for rendered images.
pub const MAX_DIMENSION: u32 = 5000;

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: u32) -> Result<u32, GalleryError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(GalleryError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate an image edge length in pixels (must be 1..=5000).
pub fn validate_dimension(pixels: u32) -> Result<u32, GalleryError> {
    if !(1..=MAX_DIMENSION).contains(&pixels) {
        return Err(GalleryError::InvalidInput(format!(
            "image dimensions must be between 1 and {} pixels",
            MAX_DIMENSION
        )));
    }
    Ok(pixels)
}

/// Validate a photo id typed on the command line.
///
/// Ids are trimmed; anything other than ASCII letters, digits, `-` and `_`
/// (1 to 64 characters) is rejected.
pub fn validate_photo_id(input: &str) -> Result<String, GalleryError> {
    let id_re = Regex::new(r"^[A-Za-z0-9_-]{1,64}$")
        .map_err(|e| GalleryError::InvalidInput(format!("regex compile error: {}", e)))?;
    let trimmed = input.trim();
    if !id_re.is_match(trimmed) {
        return Err(GalleryError::InvalidInput(format!(
            "invalid photo id '{}': expected 1-64 letters, digits, '-' or '_'",
            input
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_bounds() {
        assert!(validate_page_size(0).is_err());
        assert_eq!(validate_page_size(1).unwrap(), 1);
        assert_eq!(validate_page_size(100).unwrap(), 100);
        assert!(validate_page_size(101).is_err());
    }

    #[test]
    fn dimension_bounds() {
        assert!(validate_dimension(0).is_err());
        assert_eq!(validate_dimension(600).unwrap(), 600);
        assert!(validate_dimension(5001).is_err());
    }

    #[test]
    fn photo_id_accepts_catalog_ids() {
        assert_eq!(validate_photo_id("237").unwrap(), "237");
        assert_eq!(validate_photo_id(" 10 ").unwrap(), "10");
        assert_eq!(validate_photo_id("nonexistent").unwrap(), "nonexistent");
    }

    #[test]
    fn photo_id_rejects_path_characters() {
        assert!(validate_photo_id("").is_err());
        assert!(validate_photo_id("../etc").is_err());
        assert!(validate_photo_id("1/info").is_err());
        assert!(validate_photo_id("a b").is_err());
        assert!(validate_photo_id(&"9".repeat(65)).is_err());
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = validate_page_size(500).unwrap_err();
        assert!(err.to_string().contains("page_size"));
        let err = validate_photo_id("?").unwrap_err();
        assert!(err.to_string().contains("photo id"));
    }
}
