//! Document metadata synthesis.
//!
//! Given one article record, produces the complete set of head metadata the
//! site emits for it: Google-Scholar-style `citation_*` tags, generic SEO
//! tags, Dublin Core fields, Open Graph / Twitter preview tags, and one
//! JSON-LD `ScholarlyArticle` payload.
//!
//! ## Metadata as a value
//!
//! [`synthesize`] is pure: record in, [`MetadataSet`] out. The set is
//! immutable and knows how to render itself as head markup
//! ([`MetadataSet::render_head`]), which is what the static shells and the
//! generated article pages both use — the crawler-visible subset and the
//! full set are the same value by construction.
//!
//! ## Head ownership
//!
//! A document head is a shared mutable resource: installing article B's tags
//! while article A's are still present corrupts what crawlers see.
//! [`DocumentHead`] models that resource explicitly with a matched
//! apply/clear pair. `apply` clears before installing, so applying a second
//! set fully removes every tag attributable to the first — callers sequence
//! transitions, the synthesizer stays pure.

use crate::config::SiteConfig;
use crate::format::resolve_pdf_url;
use crate::store::Article;
use maud::{Markup, PreEscaped, html};
use serde_json::json;

/// How a meta tag is keyed: `<meta name=…>` for search/citation crawlers,
/// `<meta property=…>` for Open Graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKey {
    Name(String),
    Property(String),
}

impl TagKey {
    pub fn as_str(&self) -> &str {
        match self {
            TagKey::Name(s) | TagKey::Property(s) => s,
        }
    }
}

/// One head meta tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub key: TagKey,
    pub content: String,
}

fn name(key: &str, content: impl Into<String>) -> MetaTag {
    MetaTag {
        key: TagKey::Name(key.to_string()),
        content: content.into(),
    }
}

fn property(key: &str, content: impl Into<String>) -> MetaTag {
    MetaTag {
        key: TagKey::Property(key.to_string()),
        content: content.into(),
    }
}

/// The complete head metadata for one article. Immutable; produced by
/// [`synthesize`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataSet {
    /// Document title (`<title>`).
    pub title: String,
    /// Canonical page URL (`<link rel="canonical">`, `og:url`).
    pub canonical: String,
    /// Ordered meta tags.
    pub tags: Vec<MetaTag>,
    /// Exactly one JSON-LD `ScholarlyArticle` object.
    pub json_ld: serde_json::Value,
}

impl MetadataSet {
    /// All tags with the given key, in emission order.
    pub fn contents_of(&self, key: &str) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|t| t.key.as_str() == key)
            .map(|t| t.content.as_str())
            .collect()
    }

    /// Render the set as head markup: title, meta tags, canonical link, and
    /// the JSON-LD script. Shared by shells and generated article pages.
    pub fn render_head(&self) -> Markup {
        html! {
            title { (self.title) }
            @for tag in &self.tags {
                @match &tag.key {
                    TagKey::Name(n) => {
                        meta name=(n) content=(tag.content);
                    }
                    TagKey::Property(p) => {
                        meta property=(p) content=(tag.content);
                    }
                }
            }
            link rel="canonical" href=(self.canonical);
            script type="application/ld+json" {
                (PreEscaped(self.json_ld.to_string()))
            }
        }
    }
}

/// Produce the full metadata set for one article.
pub fn synthesize(article: &Article, config: &SiteConfig) -> MetadataSet {
    let canonical = format!("{}/article/{}", config.base_url, article.id);
    let pdf_url = resolve_pdf_url(&article.pdf_url, &config.base_url);
    let journal_title = article.journal.as_deref().unwrap_or(&config.site_name);

    let mut tags = vec![
        name("citation_title", &article.title),
    ];
    // One tag per author — indexing crawlers do not split joined lists.
    for author in &article.authors {
        tags.push(name("citation_author", author));
    }
    tags.push(name(
        "citation_publication_date",
        &article.publication_date,
    ));
    tags.push(name("citation_pdf_url", &pdf_url));
    tags.push(name("citation_journal_title", journal_title));
    tags.push(name("citation_publisher", &article.publisher));
    if let Some(issn) = &config.issn {
        tags.push(name("citation_issn", issn));
    }
    if let Some(doi) = &article.doi {
        tags.push(name("citation_doi", doi));
    }
    if let Some(volume) = &article.volume {
        tags.push(name("citation_volume", volume));
    }
    if let Some(pages) = &article.pages {
        let (first, last) = split_pages(pages);
        tags.push(name("citation_firstpage", first));
        if let Some(last) = last {
            tags.push(name("citation_lastpage", last));
        }
    }
    for keyword in &article.keywords {
        tags.push(name("citation_keyword", keyword));
    }

    // Generic SEO
    tags.push(name("description", &article.summary));
    tags.push(name("keywords", article.keywords.join(", ")));
    tags.push(name("robots", "index,follow"));

    // Dublin Core
    tags.push(name("DC.Title", &article.title));
    for author in &article.authors {
        tags.push(name("DC.Creator", author));
    }
    tags.push(name("DC.Date", &article.publication_date));
    tags.push(name("DC.Description", &article.summary));
    tags.push(name("DC.Publisher", &article.publisher));
    tags.push(name("DC.Type", "Text"));
    tags.push(name("DC.Language", "en"));

    // Open Graph / Twitter previews
    tags.push(property("og:type", "article"));
    tags.push(property("og:title", &article.title));
    tags.push(property("og:description", &article.summary));
    tags.push(property("og:url", &canonical));
    tags.push(property("og:site_name", &config.site_name));
    tags.push(name("twitter:card", "summary"));
    tags.push(name("twitter:title", &article.title));
    tags.push(name("twitter:description", &article.summary));

    let json_ld = json!({
        "@context": "https://schema.org",
        "@type": "ScholarlyArticle",
        "headline": article.title,
        "author": article
            .authors
            .iter()
            .map(|a| json!({ "@type": "Person", "name": a }))
            .collect::<Vec<_>>(),
        "datePublished": article.publication_date,
        "abstract": article.summary,
        "keywords": article.keywords,
        "publisher": {
            "@type": "Organization",
            "name": article.publisher,
            "url": format!("{}/", config.base_url),
        },
        "isPartOf": {
            "@type": "Periodical",
            "name": journal_title,
        },
        "url": canonical,
        "encoding": {
            "@type": "MediaObject",
            "contentUrl": pdf_url,
            "encodingFormat": "application/pdf",
        },
    });

    MetadataSet {
        title: article.title.clone(),
        canonical,
        tags,
        json_ld,
    }
}

/// Split a `pages` value on the first `-`. `"1-14"` → `("1", Some("14"))`,
/// `"7"` → `("7", None)`.
fn split_pages(pages: &str) -> (&str, Option<&str>) {
    match pages.split_once('-') {
        Some((first, last)) => (first, Some(last)),
        None => (pages, None),
    }
}

/// The document head as an explicit resource.
///
/// Holds at most one metadata set at a time. [`DocumentHead::apply`] is the
/// article-view transition: it clears whatever set was installed before
/// inserting the new one, so tags from a previous article can never linger.
#[derive(Debug, Default)]
pub struct DocumentHead {
    title: Option<String>,
    tags: Vec<MetaTag>,
    canonical: Option<String>,
    json_ld: Option<serde_json::Value>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a metadata set, replacing any previously applied set
    /// wholesale.
    pub fn apply(&mut self, set: &MetadataSet) {
        self.clear();
        self.title = Some(set.title.clone());
        self.tags = set.tags.clone();
        self.canonical = Some(set.canonical.clone());
        self.json_ld = Some(set.json_ld.clone());
    }

    /// Remove every installed tag and script. The matched counterpart to
    /// [`DocumentHead::apply`]; idempotent.
    pub fn clear(&mut self) {
        self.title = None;
        self.tags.clear();
        self.canonical = None;
        self.json_ld = None;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn tags(&self) -> &[MetaTag] {
        &self.tags
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn json_ld(&self) -> Option<&serde_json::Value> {
        self.json_ld.as_ref()
    }

    /// Whether any installed tag contains `needle` in its content.
    pub fn mentions(&self, needle: &str) -> bool {
        self.tags.iter().any(|t| t.content.contains(needle))
    }
}
