//! Source resolution - find the natural dimensions behind a locator.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use pinboard_api::{ItemSource, Size};
use thiserror::Error;

/// Why a source could not be resolved.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported source: {0}")]
    Unsupported(String),

    #[error("unknown source: {0}")]
    Unknown(String),
}

/// Turns an item source into its natural dimensions.
///
/// Called from loader worker threads, one call per source.
pub trait SourceResolver: Send + Sync {
    fn resolve(&self, source: &ItemSource) -> Result<Size, SourceError>;
}

// =========================================================================
// Image files
// =========================================================================

/// Reads image headers from the local filesystem.
///
/// Accepts plain paths and `file://` URLs; relative paths are joined onto
/// the configured root. Remote schemes are not fetched.
#[derive(Debug, Clone, Default)]
pub struct ImageFileResolver {
    root: Option<PathBuf>,
}

impl ImageFileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locators against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn path_for(&self, locator: &str) -> Result<PathBuf, SourceError> {
        let raw = match locator.split_once("://") {
            Some(("file", rest)) => rest,
            Some(_) => return Err(SourceError::Unsupported(locator.to_string())),
            None => locator,
        };

        let path = Path::new(raw);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl SourceResolver for ImageFileResolver {
    fn resolve(&self, source: &ItemSource) -> Result<Size, SourceError> {
        let path = self.path_for(&source.locator)?;
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a file", path.display()),
            )
            .into());
        }
        let dims = image::image_dimensions(&path)?;
        Ok(Size::from(dims))
    }
}

// =========================================================================
// Pre-measured sources
// =========================================================================

/// Serves dimensions that are already known, keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct FixedResolver {
    sizes: HashMap<String, Size>,
}

impl FixedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl Into<String>, natural: Size) -> Self {
        self.sizes.insert(locator.into(), natural);
        self
    }
}

impl SourceResolver for FixedResolver {
    fn resolve(&self, source: &ItemSource) -> Result<Size, SourceError> {
        self.sizes
            .get(&source.locator)
            .copied()
            .ok_or_else(|| SourceError::Unknown(source.locator.clone()))
    }
}
