//! Display derivations for article fields.
//!
//! Small pure functions shared by the site renderer, the shells, and the
//! metadata synthesizer. Nothing here touches the filesystem.

use crate::store::Category;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Fragment appended to PDF URLs so the in-browser viewer shows its chrome.
pub const PDF_VIEWER_FRAGMENT: &str = "#toolbar=1&navpanes=1&scrollbar=1";

/// Long-form date for display: `"2025-02-18"` → `"February 18, 2025"`.
///
/// An unparseable input is an error, never a silently mangled date — the
/// store rejects bad dates at load time, so hitting this path means the
/// caller bypassed validation.
pub fn format_date(date: &str) -> Result<String, FormatError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| FormatError::InvalidDate(date.to_string()))?;
    Ok(parsed.format("%B %-d, %Y").to_string())
}

/// Capitalized badge label for a category. Unrecognized source values are
/// displayed as-is.
pub fn category_badge(category: &Category) -> String {
    match category {
        Category::Research => "Research".to_string(),
        Category::Review => "Review".to_string(),
        Category::Conference => "Conference".to_string(),
        Category::Preprint => "Preprint".to_string(),
        Category::Other(s) => s.clone(),
    }
}

/// Resolve a PDF reference to an absolute URL.
///
/// Absolute inputs (anything with an `http(s)` scheme) pass through
/// unchanged; site-relative paths are joined onto `base_url` with exactly
/// one separating slash.
pub fn resolve_pdf_url(pdf_url: &str, base_url: &str) -> String {
    if pdf_url.starts_with("http://") || pdf_url.starts_with("https://") {
        pdf_url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            pdf_url.trim_start_matches('/')
        )
    }
}

/// Absolute PDF URL with the in-browser viewer fragment appended.
///
/// Idempotent: an input that already carries the fragment is returned
/// unchanged rather than double-appended.
pub fn pdf_embed_url(pdf_url: &str, base_url: &str) -> String {
    let full = resolve_pdf_url(pdf_url, base_url);
    if full.ends_with(PDF_VIEWER_FRAGMENT) {
        full
    } else {
        format!("{full}{PDF_VIEWER_FRAGMENT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_date_long_form() {
        assert_eq!(format_date("2025-02-18").unwrap(), "February 18, 2025");
        assert_eq!(format_date("2024-12-01").unwrap(), "December 1, 2024");
    }

    #[test]
    fn format_date_rejects_garbage() {
        assert_eq!(
            format_date("not-a-date"),
            Err(FormatError::InvalidDate("not-a-date".to_string()))
        );
    }

    #[test]
    fn format_date_rejects_impossible_calendar_date() {
        assert!(format_date("2025-02-30").is_err());
    }

    #[test]
    fn badges_for_canonical_categories() {
        assert_eq!(category_badge(&Category::Research), "Research");
        assert_eq!(category_badge(&Category::Review), "Review");
        assert_eq!(category_badge(&Category::Conference), "Conference");
        assert_eq!(category_badge(&Category::Preprint), "Preprint");
    }

    #[test]
    fn badge_passes_unknown_category_through() {
        assert_eq!(
            category_badge(&Category::Other("editorial".to_string())),
            "editorial"
        );
    }

    #[test]
    fn absolute_pdf_url_passes_through() {
        assert_eq!(
            pdf_embed_url("https://x/y.pdf", "https://psl.institute"),
            "https://x/y.pdf#toolbar=1&navpanes=1&scrollbar=1"
        );
    }

    #[test]
    fn relative_pdf_url_resolved_against_base() {
        assert_eq!(
            pdf_embed_url("/pdfs/a.pdf", "https://psl.institute"),
            "https://psl.institute/pdfs/a.pdf#toolbar=1&navpanes=1&scrollbar=1"
        );
    }

    #[test]
    fn no_duplicate_slashes_when_joining() {
        assert_eq!(
            resolve_pdf_url("/pdfs/a.pdf", "https://psl.institute/"),
            "https://psl.institute/pdfs/a.pdf"
        );
        assert_eq!(
            resolve_pdf_url("pdfs/a.pdf", "https://psl.institute"),
            "https://psl.institute/pdfs/a.pdf"
        );
    }

    #[test]
    fn fragment_never_doubled() {
        let once = pdf_embed_url("/pdfs/a.pdf", "https://psl.institute");
        let twice = pdf_embed_url(&once, "https://psl.institute");
        assert_eq!(once, twice);
    }
}
