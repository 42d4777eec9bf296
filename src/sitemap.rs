//! Sitemap generation.
//!
//! One `<url>` entry for the site root (weekly, priority 1.0) plus one per
//! article (`lastmod` from the record's publication date, monthly, priority
//! 0.8). Output is well-formed XML with escaped `loc` content.

use crate::config::SiteConfig;
use crate::store::Store;
use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the sitemap document. `today` stamps the root entry's `lastmod`.
pub fn sitemap_xml(store: &Store, config: &SiteConfig, today: NaiveDate) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    push_url(
        &mut xml,
        &format!("{}/", config.base_url),
        &today.format("%Y-%m-%d").to_string(),
        "weekly",
        "1.0",
    );
    for article in store.iter() {
        push_url(
            &mut xml,
            &format!("{}/article/{}", config.base_url, article.id),
            &article.publication_date,
            "monthly",
            "0.8",
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    xml.push_str(&format!("    <priority>{priority}</priority>\n"));
    xml.push_str("  </url>\n");
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write `sitemap.xml` into `output_dir`, stamping the root entry with
/// today's UTC date.
pub fn write_sitemap(
    store: &Store,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<PathBuf, SitemapError> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("sitemap.xml");
    let xml = sitemap_xml(store, config, Utc::now().date_naive());
    fs::write(&path, xml)?;
    Ok(path)
}
