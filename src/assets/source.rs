use std::{
    collections::HashMap,
    path::PathBuf,
};

use base64::Engine;

use crate::{
    assets::{PreparedImage, decode::decode_image},
    foundation::error::{SlideError, SlideResult},
};

/// Where slide background bytes come from.
pub trait ImageSource {
    /// Fetch the raw encoded bytes referenced by `src`.
    fn load_bytes(&self, src: &str) -> SlideResult<Vec<u8>>;
}

/// Resolves image references against a directory on disk.
///
/// Accepts relative paths (no `..`, no leading `/`), `file://` paths and inline `data:` URIs.
/// Remote URLs are rejected; fetch them before handing the document to the renderer.
#[derive(Clone, Debug)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    /// Source resolving relative references against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageSource for FsImageSource {
    fn load_bytes(&self, src: &str) -> SlideResult<Vec<u8>> {
        if src.starts_with("data:") {
            return decode_data_uri(src);
        }
        if src.starts_with("http://") || src.starts_with("https://") {
            return Err(SlideError::resource_unavailable(format!(
                "remote image '{src}' is not supported"
            )));
        }

        let path = match src.strip_prefix("file://") {
            Some(abs) => PathBuf::from(abs),
            None => self.root.join(normalize_rel_path(src)?),
        };
        std::fs::read(&path).map_err(|e| {
            SlideError::resource_unavailable(format!("read image '{}': {e}", path.display()))
        })
    }
}

/// In-memory image table keyed by the exact `image_src` string.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<String, Vec<u8>>,
}

impl MemoryImageSource {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes under `src`, replacing any previous entry.
    pub fn insert(&mut self, src: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(src.into(), bytes);
    }

    /// Builder form of [`MemoryImageSource::insert`].
    pub fn with(mut self, src: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(src, bytes);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load_bytes(&self, src: &str) -> SlideResult<Vec<u8>> {
        if let Some(bytes) = self.images.get(src) {
            return Ok(bytes.clone());
        }
        if src.starts_with("data:") {
            return decode_data_uri(src);
        }
        Err(SlideError::resource_unavailable(format!(
            "image '{src}' is not loaded"
        )))
    }
}

/// Fetch and decode a slide background. Every failure maps to
/// [`SlideError::ResourceUnavailable`].
#[tracing::instrument(level = "debug", skip(source))]
pub fn load_image(source: &dyn ImageSource, src: &str) -> SlideResult<PreparedImage> {
    let bytes = source.load_bytes(src).map_err(|e| match e {
        SlideError::ResourceUnavailable(_) => e,
        other => SlideError::resource_unavailable(format!("image '{src}': {other}")),
    })?;
    let img = decode_image(&bytes)
        .map_err(|e| SlideError::resource_unavailable(format!("image '{src}': {e}")))?;
    tracing::debug!(width = img.width, height = img.height, "decoded background");
    Ok(img)
}

pub(crate) fn normalize_rel_path(source: &str) -> SlideResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SlideError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(SlideError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SlideError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SlideError::validation("image path must contain a file name"));
    }

    Ok(out.join("/"))
}

fn decode_data_uri(uri: &str) -> SlideResult<Vec<u8>> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| SlideError::resource_unavailable("malformed data URI"))?;
    if header.contains(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| SlideError::resource_unavailable(format!("data URI payload: {e}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
