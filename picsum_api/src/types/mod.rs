mod photo;
pub use self::photo::{ImageSize, Photo, PhotoID};
