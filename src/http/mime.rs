//! MIME type detection module
//!
//! 3D asset and script types are pinned by an override table; everything
//! else falls back to `mime_guess`.

use std::path::Path;

/// Content type used when nothing matches
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Suffix overrides, matched case-sensitively against the file name
const OVERRIDES: &[(&str, &str)] = &[
    (".js", "application/javascript"),
    (".mjs", "application/javascript"),
    (".glb", "model/gltf-binary"),
    (".gltf", "model/gltf+json"),
    (".bin", "application/octet-stream"),
    (".wasm", "application/wasm"),
];

/// Immutable extension-to-content-type table
#[derive(Debug, Clone)]
pub struct ContentTypes {
    overrides: Vec<(&'static str, &'static str)>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypes {
    pub fn new() -> Self {
        Self {
            overrides: OVERRIDES.to_vec(),
        }
    }

    /// Resolve the Content-Type for a file path
    ///
    /// # Examples
    /// ```
    /// use ar_devserver::http::mime::ContentTypes;
    /// use std::path::Path;
    /// let types = ContentTypes::new();
    /// assert_eq!(types.resolve(Path::new("scan.glb")), "model/gltf-binary");
    /// assert_eq!(types.resolve(Path::new("index.html")), "text/html");
    /// ```
    pub fn resolve(&self, path: &Path) -> &'static str {
        if let Some(content_type) = self.lookup_override(&path.to_string_lossy()) {
            return content_type;
        }

        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    fn lookup_override(&self, name: &str) -> Option<&'static str> {
        self.overrides
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, content_type)| *content_type)
    }
}
