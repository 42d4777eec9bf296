//! The article record store.
//!
//! `articles.json` is the sole persisted state: a JSON array of article
//! records matching [`Article`]. The store loads it once, validates every
//! record eagerly, and is read-only for the lifetime of the process. Adding
//! an article means appending to the file and rebuilding.
//!
//! ## Validation
//!
//! Loading enforces these rules, failing fast before any output is written:
//!
//! - `id` values are pairwise distinct, non-empty, and URL-safe
//!   (`id` ends up in URLs, filenames, and BibTeX keys)
//! - every record has a non-empty `title` and at least one author
//! - `publicationDate` parses as a real `YYYY-MM-DD` calendar date
//!
//! An unrecognized `category` is *not* an error: it deserializes into
//! [`Category::Other`] and is displayed as-is downstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot read article source {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed article source: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate article id: {0}")]
    DuplicateId(String),
    #[error("article id '{0}' is not a URL-safe slug")]
    InvalidId(String),
    #[error("article '{0}' has an empty title")]
    EmptyTitle(String),
    #[error("article '{0}' has no authors")]
    NoAuthors(String),
    #[error("article '{id}' has invalid publication date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { id: String, value: String },
}

/// Article kind, displayed as a badge on cards and detail pages.
///
/// The four canonical values are closed over by styling and filtering;
/// anything else round-trips through [`Category::Other`] untouched so an
/// unexpected source value degrades to display-as-is rather than a load
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Research,
    Review,
    Conference,
    Preprint,
    Other(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "research" => Category::Research,
            "review" => Category::Review,
            "conference" => Category::Conference,
            "preprint" => Category::Preprint,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Research => "research".to_string(),
            Category::Review => "review".to_string(),
            Category::Conference => "conference".to_string(),
            Category::Preprint => "preprint".to_string(),
            Category::Other(s) => s,
        }
    }
}

/// One published article. Immutable once loaded.
///
/// Field names in `articles.json` are camelCase (`publicationDate`,
/// `pdfUrl`); `abstract` is a Rust keyword and maps to [`Article::summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Article {
    /// URL-safe slug, unique within the store. Embedded in page URLs,
    /// preview filenames (`<id>-preview.jpg`), and the BibTeX key.
    pub id: String,
    pub title: String,
    /// Ordered, at least one entry.
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub publication_date: String,
    /// Absolute URL or site-root-relative path to the source PDF.
    pub pdf_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// `first-last` range or a single page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    pub category: Category,
    pub publisher: String,
}

impl Article {
    /// Four-digit publication year as it appears in citations.
    ///
    /// The store guarantees `publication_date` parsed at load time, so this
    /// is a plain prefix extraction.
    pub fn year(&self) -> &str {
        self.publication_date
            .split('-')
            .next()
            .unwrap_or(&self.publication_date)
    }

    /// Publication date as a typed value.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.publication_date, "%Y-%m-%d").ok()
    }
}

/// The immutable, validated article list. Iteration preserves source order.
#[derive(Debug)]
pub struct Store {
    articles: Vec<Article>,
}

impl Store {
    /// Load and validate `articles.json`.
    ///
    /// Any read, parse, or validation failure aborts the load — generators
    /// call this before writing anything, so a bad source never produces
    /// partial output.
    pub fn load(path: &Path) -> Result<Store, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let articles: Vec<Article> = serde_json::from_str(&content)?;
        Store::from_articles(articles)
    }

    /// Build a store from in-memory records, applying the same validation
    /// as [`Store::load`].
    pub fn from_articles(articles: Vec<Article>) -> Result<Store, StoreError> {
        let mut seen: Vec<&str> = Vec::with_capacity(articles.len());
        for article in &articles {
            validate_article(article)?;
            if seen.contains(&article.id.as_str()) {
                return Err(StoreError::DuplicateId(article.id.clone()));
            }
            seen.push(&article.id);
        }
        Ok(Store { articles })
    }

    /// Look up an article by id. `None` means not found — callers render a
    /// graceful not-found state, never a crash.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }
}

fn validate_article(article: &Article) -> Result<(), StoreError> {
    if article.id.is_empty() || !article.id.chars().all(is_slug_char) {
        return Err(StoreError::InvalidId(article.id.clone()));
    }
    if article.title.trim().is_empty() {
        return Err(StoreError::EmptyTitle(article.id.clone()));
    }
    if article.authors.is_empty() {
        return Err(StoreError::NoAuthors(article.id.clone()));
    }
    if NaiveDate::parse_from_str(&article.publication_date, "%Y-%m-%d").is_err() {
        return Err(StoreError::InvalidDate {
            id: article.id.clone(),
            value: article.publication_date.clone(),
        });
    }
    Ok(())
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{minimal_article, sample_article, write_articles_json};
    use tempfile::TempDir;

    #[test]
    fn load_reads_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write_articles_json(dir.path(), &[sample_article(), minimal_article("second")]);

        let store = Store::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.articles()[0].id, "lui-ou-nous");
        assert_eq!(store.articles()[1].id, "second");
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Store::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn load_fails_on_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(&path, "[{not json").unwrap();
        let err = Store::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err =
            Store::from_articles(vec![minimal_article("same"), minimal_article("same")])
                .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "same"));
    }

    #[test]
    fn ids_are_pairwise_distinct_in_valid_store() {
        let store = Store::from_articles(vec![
            minimal_article("a"),
            minimal_article("b"),
            minimal_article("c"),
        ])
        .unwrap();
        let ids: Vec<&str> = store.iter().map(|a| a.id.as_str()).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
    }

    #[test]
    fn empty_authors_rejected() {
        let mut article = minimal_article("no-authors");
        article.authors.clear();
        let err = Store::from_articles(vec![article]).unwrap_err();
        assert!(matches!(err, StoreError::NoAuthors(_)));
    }

    #[test]
    fn empty_title_rejected() {
        let mut article = minimal_article("blank-title");
        article.title = "   ".to_string();
        let err = Store::from_articles(vec![article]).unwrap_err();
        assert!(matches!(err, StoreError::EmptyTitle(_)));
    }

    #[test]
    fn invalid_date_rejected_at_load() {
        let mut article = minimal_article("bad-date");
        article.publication_date = "2025-13-40".to_string();
        let err = Store::from_articles(vec![article]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDate { .. }));
    }

    #[test]
    fn non_slug_id_rejected() {
        let mut article = minimal_article("ok");
        article.id = "has spaces/slashes".to_string();
        let err = Store::from_articles(vec![article]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }

    #[test]
    fn get_finds_by_id() {
        let store = Store::from_articles(vec![sample_article()]).unwrap();
        assert!(store.get("lui-ou-nous").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn unknown_category_passes_through() {
        let json = r#"[{
            "id": "odd-one",
            "title": "Odd",
            "authors": ["A"],
            "abstract": "x",
            "keywords": [],
            "publicationDate": "2024-01-01",
            "pdfUrl": "/pdfs/odd-one.pdf",
            "category": "editorial",
            "publisher": "PSL Institute"
        }]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(
            articles[0].category,
            Category::Other("editorial".to_string())
        );
    }

    #[test]
    fn category_serializes_to_source_value() {
        assert_eq!(String::from(Category::Research), "research");
        assert_eq!(String::from(Category::Other("note".into())), "note");
    }

    #[test]
    fn year_is_date_prefix() {
        assert_eq!(sample_article().year(), "2025");
    }

    #[test]
    fn empty_store_is_valid() {
        let store = Store::from_articles(vec![]).unwrap();
        assert!(store.is_empty());
    }
}
