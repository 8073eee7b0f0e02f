//! Resolving tour image references to files on disk. Decoding and display are
//! left to the operating system's image viewer.

use std::path::{Path, PathBuf};

/// File shown for tours without an image of their own.
pub const PLACEHOLDER_IMAGE: &str = "picture.png";

/// Where a tour's picture lives, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourImage {
    Available(PathBuf),
    /// The reference resolved to a path that does not exist or is not a file.
    Unavailable(PathBuf),
}

impl TourImage {
    pub fn path(&self) -> &Path {
        match self {
            TourImage::Available(path) | TourImage::Unavailable(path) => path,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, TourImage::Available(_))
    }
}

/// Turn a stored image reference into a path. Missing references fall back to
/// the placeholder; relative paths are taken relative to `image_dir`. This
/// never fails: a bad reference just comes back as `Unavailable`.
pub fn resolve_image(image: Option<&str>, image_dir: &Path) -> TourImage {
    let reference = image
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE);

    let candidate = Path::new(reference);
    let path = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        image_dir.join(candidate)
    };

    if path.is_file() {
        TourImage::Available(path)
    } else {
        TourImage::Unavailable(path)
    }
}
