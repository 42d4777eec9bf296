//! Shared test utilities for the paperstack test suite.
//!
//! Provides canonical sample records and a fixture writer for
//! filesystem-backed tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = Store::from_articles(vec![sample_article()]).unwrap();
//! let set = meta::synthesize(&store.articles()[0], &test_config());
//! ```

use crate::config::SiteConfig;
use crate::store::{Article, Category};
use std::path::{Path, PathBuf};

/// The catalog's first real record, trimmed to the fields tests assert on.
/// Carries journal, volume, and pages but no DOI.
pub fn sample_article() -> Article {
    Article {
        id: "lui-ou-nous".to_string(),
        title: "Lui ou nous".to_string(),
        authors: vec!["Baptiste Rossigneux".to_string()],
        summary: "Je définis et relie les notions de Moloch, de réalisme et de RWA \
                  pour y former une théorie cohérente."
            .to_string(),
        keywords: vec![
            "Moloch".to_string(),
            "Réalisme".to_string(),
            "RWA".to_string(),
        ],
        publication_date: "2025-02-18".to_string(),
        pdf_url: "/pdfs/lui-ou-nous.pdf".to_string(),
        doi: None,
        journal: Some("Mirages et Miracles".to_string()),
        volume: Some("1".to_string()),
        pages: Some("1-14".to_string()),
        category: Category::Conference,
        publisher: "PSL Institute".to_string(),
    }
}

/// A record with no optional fields. Title is the id with the first letter
/// capitalized, author and date are fixed so citation tests stay literal.
pub fn minimal_article(id: &str) -> Article {
    let mut chars = id.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Article {
        id: id.to_string(),
        title,
        authors: vec!["Ada Lovelace".to_string()],
        summary: "A short abstract.".to_string(),
        keywords: vec![],
        publication_date: "2024-06-01".to_string(),
        pdf_url: format!("/pdfs/{id}.pdf"),
        doi: None,
        journal: None,
        volume: None,
        pages: None,
        category: Category::Preprint,
        publisher: "PSL Institute".to_string(),
    }
}

/// Stock configuration used by nearly every test.
pub fn test_config() -> SiteConfig {
    SiteConfig::default()
}

/// Serialize articles to `dir/articles.json` and return the path.
pub fn write_articles_json(dir: &Path, articles: &[Article]) -> PathBuf {
    let path = dir.join("articles.json");
    let json = serde_json::to_string_pretty(articles).unwrap();
    std::fs::write(&path, json).unwrap();
    path
}
