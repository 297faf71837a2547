//! URL list input for batch submissions.

use std::path::Path;

use log::warn;

/// Longest URL accepted for submission.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes a URL for submission.
///
/// Adds an `https://` prefix only when no scheme is given; an explicit
/// scheme is kept and must be http(s). Returns `None` (and logs a warning)
/// for URLs that are too long, unparsable or not http(s).
pub fn validate_submission_url(url: &str) -> Option<String> {
    let url = url.trim();
    let normalized = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => {
            Some(normalized)
        }
        Ok(_) => {
            warn!("Skipping unsupported URL: {url}");
            None
        }
        Err(e) => {
            warn!("Skipping invalid URL {url}: {e}");
            None
        }
    }
}

/// Parses one URL per line.
///
/// Blank lines and lines starting with `#` are skipped, as are invalid URLs.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(validate_submission_url)
        .collect()
}

/// Reads a URL list file; see `parse_url_list`.
pub fn read_url_file(path: &Path) -> std::io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_url_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_prefix() {
        assert_eq!(
            validate_submission_url("example.com/sitemap.xml"),
            Some("https://example.com/sitemap.xml".to_string())
        );
    }

    #[test]
    fn test_keeps_explicit_scheme() {
        assert_eq!(
            validate_submission_url("http://example.com/a"),
            Some("http://example.com/a".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert_eq!(validate_submission_url("ftp://example.com/a"), None);
        assert_eq!(validate_submission_url("https://"), None);
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_submission_url(&long), None);
    }

    #[test]
    fn test_explicit_foreign_scheme_is_not_prefixed() {
        for input in ["ftp://example.com/a", "file:///etc/passwd", "ws://example.com/"] {
            assert_eq!(validate_submission_url(input), None, "{input}");
        }
        assert_eq!(
            validate_submission_url("HTTPS://Example.com/a"),
            Some("HTTPS://Example.com/a".to_string())
        );
    }

    #[test]
    fn test_parse_url_list_drops_foreign_schemes() {
        let text = "ftp://example.com/sitemap.xml\nexample.com/sitemap.xml\n";
        assert_eq!(
            parse_url_list(text),
            vec!["https://example.com/sitemap.xml".to_string()]
        );
    }

    #[test]
    fn test_parse_url_list_skips_comments_and_blanks() {
        let text = "# sitemaps\nhttps://example.com/sitemap.xml\n\n   \n  # indented comment\nexample.com/news.xml\n";
        assert_eq!(
            parse_url_list(text),
            vec![
                "https://example.com/sitemap.xml".to_string(),
                "https://example.com/news.xml".to_string()
            ]
        );
    }
}
