//! HTML site generation.
//!
//! Renders the browsable static site from the article store:
//!
//! - **Index page** (`/index.html`): homepage grid of article cards
//! - **Article pages** (`/article/{id}/index.html`): full detail pages —
//!   same head metadata as the crawler shells, plus the rendered body
//! - **Not-found page** (`/404.html`): graceful state for unknown ids
//!
//! Article-page heads are rendered from the same
//! [`MetadataSet`](crate::meta::MetadataSet) the shells use, so the
//! crawler-visible and browsable documents carry identical metadata.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! the stylesheet is embedded at compile time from `static/style.css` and
//! inlined into every page.

use crate::citation;
use crate::config::SiteConfig;
use crate::format::{self, FormatError};
use crate::meta;
use crate::preview::preview_filename;
use crate::store::{Article, Store};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

/// Counts of what a generate run produced.
#[derive(Debug, Default)]
pub struct GenerateStats {
    pub article_pages: usize,
}

const CSS: &str = include_str!("../static/style.css");

/// Render and write the full site into `output_dir`.
pub fn generate(
    store: &Store,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateStats, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let index = render_index(store, config)?;
    fs::write(output_dir.join("index.html"), index.into_string())?;

    let not_found = render_not_found(config);
    fs::write(output_dir.join("404.html"), not_found.into_string())?;

    let mut stats = GenerateStats::default();
    for article in store.iter() {
        let dir = output_dir.join("article").join(&article.id);
        fs::create_dir_all(&dir)?;
        let page = render_article_page(article, config)?;
        fs::write(dir.join("index.html"), page.into_string())?;
        stats.article_pages += 1;
    }

    Ok(stats)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Base document for pages without article metadata (index, 404).
fn base_document(title: &str, description: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(description);
                meta name="robots" content="index,follow";
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Document shell for article pages: head comes from the metadata set.
fn article_document(set: &meta::MetadataSet, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (set.render_head())
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (config.site_name) }
            p.site-tagline { (config.description) }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            p { "© " (config.publisher) }
        }
    }
}

/// Category badge + formatted date line shown on cards and detail pages.
fn meta_line(article: &Article) -> Result<Markup, FormatError> {
    let badge = format::category_badge(&article.category);
    let date = format::format_date(&article.publication_date)?;
    Ok(html! {
        div.article-meta {
            span.category-badge { (badge) }
            time.publication-date datetime=(article.publication_date) { (date) }
        }
    })
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Homepage: grid of article cards.
fn render_index(store: &Store, config: &SiteConfig) -> Result<Markup, FormatError> {
    let mut cards = Vec::with_capacity(store.len());
    for article in store.iter() {
        cards.push(render_card(article, config)?);
    }

    let content = html! {
        (site_header(config))
        main.index-page {
            @if store.is_empty() {
                p.empty-note { "No publications yet." }
            } @else {
                div.article-grid {
                    @for card in cards {
                        (card)
                    }
                }
            }
        }
        (site_footer(config))
    };

    Ok(base_document(
        &config.site_name,
        &config.description,
        content,
    ))
}

fn render_card(article: &Article, config: &SiteConfig) -> Result<Markup, FormatError> {
    let href = format!("/article/{}/", article.id);
    let preview_src = format!("/{}/{}", config.paths.previews, preview_filename(&article.id));
    let teaser = teaser(&article.summary, 240);
    let meta_line = meta_line(article)?;

    Ok(html! {
        a.article-card href=(href) {
            img.card-preview src=(preview_src) alt={ "First page of " (article.title) } loading="lazy";
            div.card-body {
                (meta_line)
                h2.card-title { (article.title) }
                p.card-authors { (article.authors.join(", ")) }
                p.card-abstract { (teaser) }
                @if !article.keywords.is_empty() {
                    div.keyword-list {
                        @for keyword in &article.keywords {
                            span.keyword-tag { (keyword) }
                        }
                    }
                }
            }
        }
    })
}

/// Article detail page: full metadata head plus the rendered record.
fn render_article_page(article: &Article, config: &SiteConfig) -> Result<Markup, FormatError> {
    let set = meta::synthesize(article, config);
    let embed_url = format::pdf_embed_url(&article.pdf_url, &config.base_url);
    let download_url = format::resolve_pdf_url(&article.pdf_url, &config.base_url);
    let meta_line = meta_line(article)?;

    let content = html! {
        nav.article-nav {
            a.back-link href="/" { "← Back to publications" }
        }
        article.article-content {
            header.article-header {
                (meta_line)
                h1.article-title { (article.title) }
                div.article-authors {
                    h2 { @if article.authors.len() > 1 { "Authors" } @else { "Author" } }
                    ul.authors-list {
                        @for author in &article.authors {
                            li { (author) }
                        }
                    }
                }
                @if article.journal.is_some() {
                    (publication_info(article))
                }
            }
            section.article-body {
                div.abstract-section {
                    h2 { "Abstract" }
                    p { (article.summary) }
                }
                @if !article.keywords.is_empty() {
                    div.keywords-section {
                        h2 { "Keywords" }
                        div.keyword-list {
                            @for keyword in &article.keywords {
                                span.keyword-tag { (keyword) }
                            }
                        }
                    }
                }
                div.citation-section {
                    h2 { "Cite this article" }
                    h3 { "APA" }
                    p.citation-text { (citation::apa_citation(article)) }
                    h3 { "BibTeX" }
                    pre.citation-bibtex { (citation::bibtex_citation(article)) }
                }
                div.download-section {
                    h2 { "Full paper" }
                    // The object fallback keeps a download path available when
                    // the embedded viewer cannot load the document.
                    object.pdf-embed data=(embed_url) type="application/pdf" {
                        p {
                            "The preview could not be displayed. "
                            a href=(download_url) { "Download the PDF instead." }
                        }
                    }
                    div.download-actions {
                        a.btn href=(download_url) { "Download PDF" }
                        @if let Some(doi) = &article.doi {
                            a.btn href={ "https://doi.org/" (doi) } { "View on publisher website" }
                        }
                    }
                }
            }
        }
        (site_footer(config))
    };

    Ok(article_document(&set, content))
}

fn publication_info(article: &Article) -> Markup {
    html! {
        div.publication-info {
            h2 { "Publication Information" }
            div.publication-details {
                @if let Some(journal) = &article.journal {
                    span.journal-name { (journal) }
                }
                @if let Some(volume) = &article.volume {
                    span.volume { "Vol. " (volume) }
                }
                @if let Some(pages) = &article.pages {
                    span.pages { "pp. " (pages) }
                }
                @if let Some(doi) = &article.doi {
                    a.doi-link href={ "https://doi.org/" (doi) } { "DOI: " (doi) }
                }
            }
        }
    }
}

/// Not-found page for unknown article ids.
pub fn render_not_found(config: &SiteConfig) -> Markup {
    let content = html! {
        (site_header(config))
        main.not-found-page {
            h1 { "Article Not Found" }
            p { "The requested article could not be found." }
            a.back-link href="/" { "← Back to homepage" }
        }
        (site_footer(config))
    };
    base_document("Article Not Found", &config.description, content)
}

/// First `limit` characters of an abstract, cut at a word boundary with an
/// ellipsis.
fn teaser(summary: &str, limit: usize) -> String {
    if summary.chars().count() <= limit {
        return summary.to_string();
    }
    let cut: String = summary.chars().take(limit).collect();
    let trimmed = match cut.rfind(' ') {
        Some(pos) => &cut[..pos],
        None => cut.as_str(),
    };
    format!("{}…", trimmed.trim_end_matches([',', ';', ':']))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::test_helpers::{minimal_article, sample_article, test_config};
    use tempfile::TempDir;

    #[test]
    fn index_lists_every_article() {
        let store =
            Store::from_articles(vec![sample_article(), minimal_article("second")]).unwrap();
        let html = render_index(&store, &test_config()).unwrap().into_string();
        assert!(html.contains("Lui ou nous"));
        assert!(html.contains("/article/lui-ou-nous/"));
        assert!(html.contains("/article/second/"));
    }

    #[test]
    fn index_cards_show_badge_date_and_preview() {
        let store = Store::from_articles(vec![sample_article()]).unwrap();
        let html = render_index(&store, &test_config()).unwrap().into_string();
        assert!(html.contains("Conference"));
        assert!(html.contains("February 18, 2025"));
        assert!(html.contains("/previews/lui-ou-nous-preview.jpg"));
    }

    #[test]
    fn empty_store_renders_empty_note() {
        let store = Store::from_articles(vec![]).unwrap();
        let html = render_index(&store, &test_config()).unwrap().into_string();
        assert!(html.contains("No publications yet."));
    }

    #[test]
    fn article_page_head_has_citation_metadata() {
        let html = render_article_page(&sample_article(), &test_config())
            .unwrap()
            .into_string();
        assert!(html.contains(r#"<meta name="citation_title" content="Lui ou nous">"#));
        assert!(html.contains("application/ld+json"));
        assert!(html.contains(r#"rel="canonical""#));
    }

    #[test]
    fn article_page_body_sections() {
        let html = render_article_page(&sample_article(), &test_config())
            .unwrap()
            .into_string();
        assert!(html.contains("<h1 class=\"article-title\">Lui ou nous</h1>"));
        assert!(html.contains("Abstract"));
        assert!(html.contains("Keywords"));
        assert!(html.contains("Cite this article"));
        assert!(html.contains("Baptiste Rossigneux (2025). Lui ou nous"));
        assert!(html.contains("@article{luiounous,"));
    }

    #[test]
    fn article_page_uses_singular_author_heading() {
        let html = render_article_page(&sample_article(), &test_config())
            .unwrap()
            .into_string();
        assert!(html.contains("<h2>Author</h2>"));

        let mut duo = sample_article();
        duo.authors.push("Second Author".to_string());
        let html = render_article_page(&duo, &test_config()).unwrap().into_string();
        assert!(html.contains("<h2>Authors</h2>"));
    }

    #[test]
    fn publication_info_only_with_journal() {
        let html = render_article_page(&minimal_article("bare"), &test_config())
            .unwrap()
            .into_string();
        assert!(!html.contains("Publication Information"));

        let html = render_article_page(&sample_article(), &test_config())
            .unwrap()
            .into_string();
        assert!(html.contains("Publication Information"));
        assert!(html.contains("Vol. 1"));
        assert!(html.contains("pp. 1-14"));
    }

    #[test]
    fn embed_carries_viewer_fragment_and_download_fallback() {
        let html = render_article_page(&sample_article(), &test_config())
            .unwrap()
            .into_string();
        assert!(html.contains(
            "https://psl.institute/pdfs/lui-ou-nous.pdf#toolbar=1&amp;navpanes=1&amp;scrollbar=1"
        ));
        assert!(html.contains("Download the PDF instead."));
        assert!(html.contains("Download PDF"));
    }

    #[test]
    fn generate_writes_all_pages() {
        let dir = TempDir::new().unwrap();
        let store =
            Store::from_articles(vec![sample_article(), minimal_article("second")]).unwrap();
        let stats = generate(&store, &test_config(), dir.path()).unwrap();

        assert_eq!(stats.article_pages, 2);
        assert!(dir.path().join("index.html").exists());
        assert!(dir.path().join("404.html").exists());
        assert!(dir.path().join("article/lui-ou-nous/index.html").exists());
        assert!(dir.path().join("article/second/index.html").exists());
    }

    #[test]
    fn not_found_page_is_graceful() {
        let html = render_not_found(&test_config()).into_string();
        assert!(html.contains("Article Not Found"));
        assert!(html.contains("Back to homepage"));
    }

    #[test]
    fn teaser_cuts_at_word_boundary() {
        let long = "word ".repeat(100);
        let t = teaser(&long, 50);
        assert!(t.chars().count() <= 51);
        assert!(t.ends_with('…'));
        assert!(!t.contains("word w…"));
    }

    #[test]
    fn teaser_passes_short_text_through() {
        assert_eq!(teaser("short abstract", 240), "short abstract");
    }

    #[test]
    fn html_escaped_in_titles() {
        let mut article = sample_article();
        article.title = "<script>alert('xss')</script>".to_string();
        let store = Store::from_articles(vec![article]).unwrap();
        let html = render_index(&store, &test_config()).unwrap().into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
