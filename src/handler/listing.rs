//! Directory listing module
//!
//! Renders a plain HTML index for directories without an index file.

use crate::error::ServeError;
use crate::http::response::escape_html;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;
use tokio::fs;

/// Characters left unescaped in listing links
const LINK_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingEntry {
    display_name: String,
    link: String,
}

impl ListingEntry {
    fn new(name: &str, is_dir: bool, is_symlink: bool) -> Self {
        let (mut display_name, link) = if is_dir {
            (format!("{name}/"), format!("{name}/"))
        } else {
            (name.to_string(), name.to_string())
        };
        if is_symlink {
            display_name = format!("{name}@");
        }
        Self { display_name, link }
    }

    fn render(&self) -> String {
        format!(
            "<li><a href=\"{}\">{}</a></li>",
            utf8_percent_encode(&self.link, LINK_SAFE),
            escape_html(&self.display_name)
        )
    }
}

/// Render the listing page for `dir`, titled with the request path
pub async fn render_listing(dir: &Path, url_path: &str) -> Result<String, ServeError> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|_| ServeError::ListingDenied)?;

    let mut names = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|_| ServeError::ListingDenied)?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|t| t.is_symlink());
        // Follows symlinks, so a link to a directory is listed as one
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        names.push((name, is_dir, is_symlink));
    }
    names.sort_by_cached_key(|(name, _, _)| name.to_lowercase());

    let entries: Vec<ListingEntry> = names
        .iter()
        .map(|(name, is_dir, is_symlink)| ListingEntry::new(name, *is_dir, *is_symlink))
        .collect();

    let display_path = percent_decode_str(url_path).decode_utf8_lossy();
    Ok(render_page(&display_path, &entries))
}

fn render_page(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut lines = vec![
        "<!DOCTYPE HTML>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{title}</title>\n</head>"),
        format!("<body>\n<h1>{title}</h1>"),
        "<hr>\n<ul>".to_string(),
    ];
    lines.extend(entries.iter().map(ListingEntry::render));
    lines.push("</ul>\n<hr>\n</body>\n</html>\n".to_string());
    lines.join("\n")
}
