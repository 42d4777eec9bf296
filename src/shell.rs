//! Crawler-facing HTML shells.
//!
//! For every article, writes `article/<id>/index.html`: a minimal document
//! whose head carries the full citation metadata (rendered from the same
//! [`MetadataSet`](crate::meta::MetadataSet) as everything else) and whose
//! body is a placeholder mount point. Shells exist so indexing crawlers see
//! complete metadata at stable URLs even when the browsable site is served
//! by something else.
//!
//! The store is loaded and validated before this module runs, so a bad
//! source aborts the whole batch before any file is written. Per-article
//! write failures are isolated: each article yields a [`ShellOutcome`] and
//! one failed write never blocks the rest.

use crate::config::SiteConfig;
use crate::meta;
use crate::store::{Article, Store};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one shell generation attempt.
#[derive(Debug)]
pub enum ShellOutcome {
    Written { id: String, path: String },
    Failed { id: String, reason: String },
}

impl ShellOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ShellOutcome::Written { .. })
    }

    pub fn id(&self) -> &str {
        match self {
            ShellOutcome::Written { id, .. } | ShellOutcome::Failed { id, .. } => id,
        }
    }
}

/// Render one shell document.
pub fn render_shell(article: &Article, config: &SiteConfig) -> Markup {
    let set = meta::synthesize(article, config);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (set.render_head())
            }
            body {
                noscript { "Static preview of article: " (article.title) }
                div id="root" {}
            }
        }
    }
}

/// Write one shell per article under `output_dir/article/<id>/index.html`.
///
/// Returns one outcome per article in store order. `Err` only for failures
/// that precede the batch (creating the root output directory).
pub fn generate_shells(
    store: &Store,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<Vec<ShellOutcome>, ShellError> {
    let article_root = output_dir.join("article");
    fs::create_dir_all(&article_root)?;

    let mut outcomes = Vec::with_capacity(store.len());
    for article in store.iter() {
        let rel_path = format!("article/{}/index.html", article.id);
        let dir = article_root.join(&article.id);
        let result = fs::create_dir_all(&dir).and_then(|_| {
            fs::write(
                dir.join("index.html"),
                render_shell(article, config).into_string(),
            )
        });
        outcomes.push(match result {
            Ok(()) => ShellOutcome::Written {
                id: article.id.clone(),
                path: rel_path,
            },
            Err(err) => ShellOutcome::Failed {
                id: article.id.clone(),
                reason: err.to_string(),
            },
        });
    }
    Ok(outcomes)
}
