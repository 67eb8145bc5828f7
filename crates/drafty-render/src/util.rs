//! Shared helpers for attachment presentation.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::options::Size;

/// Characters escaped in query keys and values (RFC 3986 unreserved kept).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Shorten `name` to `first keep` + `…` + `last keep` characters when it is
/// longer than `limit` characters.
///
/// # Examples
///
/// ```
/// use drafty_render::shorten;
///
/// assert_eq!(shorten("report.pdf", 16, 8), "report.pdf");
/// assert_eq!(shorten("quarterly-report-final.pdf", 16, 8), "quarterl…inal.pdf");
/// ```
#[must_use]
pub fn shorten(name: &str, limit: usize, keep: usize) -> String {
    let count = name.chars().count();
    if count <= limit {
        return name.to_owned();
    }
    let head: String = name.chars().take(keep).collect();
    let tail: String = name.chars().skip(count.saturating_sub(keep)).collect();
    format!("{head}…{tail}")
}

/// Append `pairs` to the query of `base`, keeping any fragment last.
///
/// The base string is otherwise left untouched, so `https://example.com`
/// gains no trailing slash.
#[must_use]
pub(crate) fn append_query(base: &str, pairs: &[(&str, &str)]) -> String {
    let (head, fragment) = match base.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (base, None),
    };

    let mut url = head.to_owned();
    for (key, value) in pairs {
        let separator = match url.find('?') {
            None => "?",
            Some(pos) if pos + 1 == url.len() || url.ends_with('&') => "",
            Some(_) => "&",
        };
        url.push_str(separator);
        url.extend(utf8_percent_encode(key, QUERY_COMPONENT));
        url.push('=');
        url.extend(utf8_percent_encode(value, QUERY_COMPONENT));
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// Human-readable byte count: `0 Bytes`, `512 Bytes`, `1.50 KB`, `12.3 MB`.
///
/// Values under 3 units keep two fractional digits, under 30 one, larger
/// values none. Plain byte counts are never fractional.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let bucket = (63 - bytes.leading_zeros() as usize) / 10;
    let count = bytes as f64 / 1024_f64.powi(i32::try_from(bucket).unwrap_or(0));
    let round_to = match bucket {
        0 => 0,
        _ if count < 3.0 => 2,
        _ if count < 30.0 => 1,
        _ => 0,
    };
    format!("{count:.round_to$} {}", UNITS[bucket])
}

/// Scale `original` down to fit under `fit`, keeping the aspect ratio.
///
/// Never scales up and never returns a dimension below one point.
#[must_use]
pub fn size_under(original: Size, fit: Size) -> Size {
    if original.width <= 0.0 || original.height <= 0.0 {
        return Size::new(fit.width.max(1.0), fit.height.max(1.0));
    }
    let scale_x = original.width.min(fit.width) / original.width;
    let scale_y = original.height.min(fit.height) / original.height;
    let scale = scale_x.min(scale_y);
    Size::new(
        fit.width.min(original.width * scale).max(1.0),
        fit.height.min(original.height * scale).max(1.0),
    )
}

/// Short description of a mime type, such as `PDF Document`.
///
/// Returns `None` for types without a known description.
#[must_use]
pub fn mime_description(mime: &str) -> Option<&'static str> {
    let mime = mime.trim().to_ascii_lowercase();
    let exact = match mime.as_str() {
        "application/pdf" => Some("PDF Document"),
        "application/zip" | "application/x-zip-compressed" => Some("ZIP Archive"),
        "application/gzip" | "application/x-gzip" => Some("Gzip Archive"),
        "application/msword"
        | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            Some("Word Document")
        }
        "application/vnd.ms-excel"
        | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
            Some("Spreadsheet")
        }
        "application/json" => Some("JSON"),
        "text/plain" => Some("Plain Text"),
        "text/html" => Some("HTML Document"),
        "text/csv" => Some("CSV Document"),
        _ => None,
    };
    exact.or_else(|| {
        let (kind, _) = mime.split_once('/')?;
        match kind {
            "image" => Some("Image"),
            "audio" => Some("Audio"),
            "video" => Some("Video"),
            "text" => Some("Text"),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shorten_counts_chars() {
        let name = "ééééééééééééééééééé.txt";
        let short = shorten(name, 16, 8);
        assert_eq!(short.chars().count(), 17);
        assert!(short.starts_with("éééééééé…"));
        assert!(short.ends_with("ééé.txt"));
    }

    #[test]
    fn test_shorten_at_limit_unchanged() {
        let name = "a".repeat(32);
        assert_eq!(shorten(&name, 32, 14), name);
    }

    #[test]
    fn test_append_query() {
        assert_eq!(
            append_query("https://example.com", &[("a", "b")]),
            "https://example.com?a=b"
        );
        assert_eq!(
            append_query("https://example.com/p?x=1#top", &[("a", "b c")]),
            "https://example.com/p?x=1&a=b%20c#top"
        );
        assert_eq!(
            append_query("drafty://action/post", &[("title", "Yes"), ("name", "a")]),
            "drafty://action/post?title=Yes&name=a"
        );
    }

    #[test]
    fn test_human_size_buckets() {
        assert_eq!(human_size(0), "0 Bytes");
        assert_eq!(human_size(512), "512 Bytes");
        assert_eq!(human_size(1536), "1.50 KB");
        assert_eq!(human_size(10 * 1024 + 512), "10.5 KB");
        assert_eq!(human_size(100 * 1024 * 1024), "100 MB");
    }

    #[test]
    fn test_size_under_keeps_aspect() {
        let size = size_under(Size::new(600.0, 300.0), Size::new(300.0, 300.0));
        assert_eq!(size, Size::new(300.0, 150.0));
    }

    #[test]
    fn test_size_under_never_scales_up() {
        let size = size_under(Size::new(20.0, 10.0), Size::new(300.0, 300.0));
        assert_eq!(size, Size::new(20.0, 10.0));
    }

    #[test]
    fn test_size_under_minimum_one_point() {
        let size = size_under(Size::new(10_000.0, 1.0), Size::new(100.0, 100.0));
        assert_eq!(size, Size::new(100.0, 1.0));
    }

    #[test]
    fn test_mime_description() {
        assert_eq!(mime_description("application/pdf"), Some("PDF Document"));
        assert_eq!(mime_description("IMAGE/PNG"), Some("Image"));
        assert_eq!(mime_description("application/octet-stream"), None);
    }
}
