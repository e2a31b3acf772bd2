//! Static file serving module
//!
//! Maps URL paths onto the serving root, keeps requests inside it, and
//! builds file, directory and redirect responses.

use crate::error::ServeError;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, ContentTypes};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Tried in order when a directory is requested
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// A URL path translated onto the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    pub path: PathBuf,
    /// The URL path ended in `/`
    pub trailing_slash: bool,
}

/// What a GET/HEAD path resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Listing(PathBuf),
    Redirect(String),
}

/// File content ready to be sent
pub struct LoadedFile {
    pub content: Bytes,
    pub content_type: &'static str,
    pub modified: Option<SystemTime>,
}

/// Serve a GET or HEAD request from the serving root
pub async fn serve_path(
    ctx: &RequestContext<'_>,
    root: &Path,
    content_types: &ContentTypes,
) -> Result<Response<Full<Bytes>>, ServeError> {
    match resolve(root, ctx.path, ctx.query).await? {
        Resolved::Redirect(location) => Ok(http::build_redirect_response(&location)),
        Resolved::Listing(dir) => {
            let page = listing::render_listing(&dir, ctx.path).await?;
            Ok(http::build_html_response(page, ctx.is_head))
        }
        Resolved::File(path) => {
            let file = load_file(&path, content_types).await?;

            if let Some(modified) = file.modified {
                if cache::is_not_modified(ctx.if_modified_since, ctx.if_none_match, modified) {
                    return Ok(http::build_304_response());
                }
            }

            let last_modified = file.modified.map(cache::format_http_date);
            Ok(http::build_file_response(
                file.content,
                file.content_type,
                last_modified.as_deref(),
                ctx.is_head,
            ))
        }
    }
}

/// Translate a URL path into a path under `root`
///
/// Query and fragment are dropped, the path is percent-decoded and
/// normalized lexically, so `..` can never climb above `root`. Segments
/// holding a backslash or NUL are discarded.
pub fn translate_path(root: &Path, url_path: &str) -> TranslatedPath {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let trailing_slash = path.trim_end().ends_with('/');
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut fs_path = root.to_path_buf();
    for segment in segments {
        if segment.contains(['\\', '\0']) {
            continue;
        }
        fs_path.push(segment);
    }

    TranslatedPath {
        path: fs_path,
        trailing_slash,
    }
}

/// Resolve a request path to a file, a directory listing or a redirect
pub async fn resolve(
    root: &Path,
    url_path: &str,
    query: Option<&str>,
) -> Result<Resolved, ServeError> {
    let target = translate_path(root, url_path);
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serving directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return Err(ServeError::NotFound);
        }
    };

    let canonical = confine(&root_canonical, &target.path, url_path).await?;
    let metadata = fs::metadata(&canonical)
        .await
        .map_err(|_| ServeError::NotFound)?;

    if metadata.is_dir() {
        if !url_path.ends_with('/') {
            return Ok(Resolved::Redirect(directory_location(url_path, query)));
        }
        for index in INDEX_FILES {
            let candidate = target.path.join(index);
            if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
                confine(&root_canonical, &candidate, url_path).await?;
                return Ok(Resolved::File(candidate));
            }
        }
        return Ok(Resolved::Listing(target.path));
    }

    if target.trailing_slash {
        return Err(ServeError::NotFound);
    }

    Ok(Resolved::File(target.path))
}

/// Read a file and determine its content type
pub async fn load_file(
    path: &Path,
    content_types: &ContentTypes,
) -> Result<LoadedFile, ServeError> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|_| ServeError::NotFound)?;
    if metadata.is_dir() {
        return Err(ServeError::NotFound);
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return Err(ServeError::NotFound);
        }
    };

    Ok(LoadedFile {
        content: Bytes::from(content),
        content_type: content_types.resolve(path),
        modified: metadata.modified().ok(),
    })
}

/// Canonicalize `path` and make sure it stays under the root
async fn confine(
    root_canonical: &Path,
    path: &Path,
    url_path: &str,
) -> Result<PathBuf, ServeError> {
    // File not found is common (404), no need to log
    let Ok(canonical) = fs::canonicalize(path).await else {
        return Err(ServeError::NotFound);
    };
    if !canonical.starts_with(root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {url_path} -> {}",
            canonical.display()
        ));
        return Err(ServeError::NotFound);
    }
    Ok(canonical)
}

/// Location for a directory requested without its trailing slash
fn directory_location(url_path: &str, query: Option<&str>) -> String {
    // A leading `//` would be read by browsers as a network-path reference
    let path = if url_path.starts_with("//") {
        format!("/{}", url_path.trim_start_matches('/'))
    } else {
        url_path.to_string()
    };
    match query {
        Some(q) => format!("{path}/?{q}"),
        None => format!("{path}/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempdir::TempDir;

    fn root() -> PathBuf {
        PathBuf::from("/srv/app")
    }

    #[test]
    fn test_translate_simple() {
        let t = translate_path(&root(), "/models/skull.glb");
        assert_eq!(t.path, PathBuf::from("/srv/app/models/skull.glb"));
        assert!(!t.trailing_slash);
    }

    #[test]
    fn test_translate_strips_query_and_fragment() {
        let t = translate_path(&root(), "/app.js?v=3#top");
        assert_eq!(t.path, PathBuf::from("/srv/app/app.js"));
    }

    #[test]
    fn test_translate_decodes_percent() {
        let t = translate_path(&root(), "/my%20model.gltf");
        assert_eq!(t.path, PathBuf::from("/srv/app/my model.gltf"));
    }

    #[test]
    fn test_translate_blocks_parent_dirs() {
        let t = translate_path(&root(), "/../../etc/passwd");
        assert_eq!(t.path, PathBuf::from("/srv/app/etc/passwd"));

        let t = translate_path(&root(), "/models/%2e%2e/%2e%2e/%2e%2e/etc/passwd");
        assert_eq!(t.path, PathBuf::from("/srv/app/etc/passwd"));

        let t = translate_path(&root(), "/a/b/../c");
        assert_eq!(t.path, PathBuf::from("/srv/app/a/c"));
    }

    #[test]
    fn test_translate_trailing_slash() {
        let t = translate_path(&root(), "/models/");
        assert_eq!(t.path, PathBuf::from("/srv/app/models"));
        assert!(t.trailing_slash);
    }

    #[test]
    fn test_translate_drops_backslash_segments() {
        let t = translate_path(&root(), "/..\\secret/file.txt");
        assert_eq!(t.path, PathBuf::from("/srv/app/file.txt"));
    }

    #[test]
    fn test_directory_location() {
        assert_eq!(directory_location("/models", None), "/models/");
        assert_eq!(directory_location("/models", Some("a=1")), "/models/?a=1");
        assert_eq!(directory_location("//evil.com", None), "/evil.com/");
    }

    #[tokio::test]
    async fn test_resolve_cases() {
        let dir = TempDir::new("resolve").unwrap();
        std::fs::create_dir(dir.path().join("models")).unwrap();
        std::fs::create_dir(dir.path().join("site")).unwrap();
        std::fs::write(dir.path().join("models/skull.glb"), b"glTF").unwrap();
        std::fs::write(dir.path().join("site/index.html"), b"<h1>hi</h1>").unwrap();

        assert_eq!(
            resolve(dir.path(), "/models/skull.glb", None).await,
            Ok(Resolved::File(dir.path().join("models/skull.glb")))
        );
        assert_eq!(
            resolve(dir.path(), "/models", None).await,
            Ok(Resolved::Redirect("/models/".to_string()))
        );
        assert_eq!(
            resolve(dir.path(), "/models/", None).await,
            Ok(Resolved::Listing(dir.path().join("models")))
        );
        assert_eq!(
            resolve(dir.path(), "/site/", None).await,
            Ok(Resolved::File(dir.path().join("site/index.html")))
        );
        std::fs::create_dir_all(dir.path().join("odd/index.html")).unwrap();
        assert_eq!(
            resolve(dir.path(), "/odd/", None).await,
            Ok(Resolved::Listing(dir.path().join("odd")))
        );
        assert_eq!(
            resolve(dir.path(), "/models/skull.glb/", None).await,
            Err(ServeError::NotFound)
        );
        assert_eq!(
            resolve(dir.path(), "/missing.glb", None).await,
            Err(ServeError::NotFound)
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_refused() {
        let outside = TempDir::new("outside").unwrap();
        std::fs::write(outside.path().join("secret.txt"), b"secret").unwrap();
        let dir = TempDir::new("served").unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.txt"),
            dir.path().join("link.txt"),
        )
        .unwrap();

        assert_eq!(
            resolve(dir.path(), "/link.txt", None).await,
            Err(ServeError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = TempDir::new("load").unwrap();
        let path = dir.path().join("decoder.wasm");
        std::fs::write(&path, [0u8, 0x61, 0x73, 0x6d]).unwrap();

        let file = load_file(&path, &ContentTypes::new()).await.unwrap();
        assert_eq!(file.content_type, "application/wasm");
        assert_eq!(&file.content[..], &[0u8, 0x61, 0x73, 0x6d]);
        assert!(file.modified.is_some());
    }
}
