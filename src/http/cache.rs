//! HTTP cache validation module
//!
//! Emits `Last-Modified` and answers `If-Modified-Since` with 304. The
//! server never tells clients to cache, but browsers still revalidate.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header, `None` when malformed
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// Check whether the client's copy is still current
///
/// `If-None-Match` takes precedence over `If-Modified-Since`; since no
/// `ETag` is ever sent, its presence means the resource is served in full.
/// Sub-second precision of `modified` is ignored.
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    if_none_match: Option<&str>,
    modified: SystemTime,
) -> bool {
    if if_none_match.is_some() {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn rfc_example() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(784_111_777)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(
            format_http_date(rfc_example()),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn test_parse_http_date() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified() {
        let modified = rfc_example() + Duration::from_millis(400);
        let same = Some("Sun, 06 Nov 1994 08:49:37 GMT");
        let later = Some("Mon, 07 Nov 1994 08:49:37 GMT");
        let earlier = Some("Sat, 05 Nov 1994 08:49:37 GMT");

        assert!(is_not_modified(same, None, modified));
        assert!(is_not_modified(later, None, modified));
        assert!(!is_not_modified(earlier, None, modified));
    }

    #[test]
    fn test_if_none_match_wins() {
        let later = Some("Mon, 07 Nov 1994 08:49:37 GMT");
        assert!(!is_not_modified(later, Some("\"abc\""), rfc_example()));
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert!(!is_not_modified(None, None, rfc_example()));
        assert!(!is_not_modified(Some("not a date"), None, rfc_example()));
    }
}
