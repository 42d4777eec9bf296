//! # paperstack
//!
//! A minimal static site generator for academic publication catalogs.
//! A single `articles.json` file is the data source: each record describes one
//! published article, and every output — homepage grid, detail pages, crawler
//! shells, sitemap, preview thumbnails — is derived from that list.
//!
//! # Architecture: One Store, Many Derivations
//!
//! ```text
//! articles.json → Store → format / citation / meta   (pure, record-in/string-out)
//!                       → generate → dist/            (browsable HTML site)
//!                       → shell    → dist/article/     (crawler-facing shells)
//!                       → sitemap  → dist/sitemap.xml
//!                       → preview  → previews/         (first-page PDF thumbnails)
//! ```
//!
//! The store is loaded once, validated eagerly, and never mutated. Everything
//! downstream is either a pure derivation (citations, metadata sets, display
//! strings) or a batch writer that consumes the whole list sequentially.
//! There is no incremental build and no parallelism — catalogs this size
//! rebuild in well under a second.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Loads and validates the immutable article list from JSON |
//! | [`format`] | Display derivations: long dates, category badges, PDF URLs |
//! | [`citation`] | APA prose and BibTeX entries from one record |
//! | [`meta`] | Citation/Dublin-Core/Open-Graph tags and JSON-LD as a value type |
//! | [`generate`] | Renders the browsable HTML site with Maud |
//! | [`shell`] | Minimal per-article HTML shells for indexing crawlers |
//! | [`sitemap`] | `sitemap.xml` with one entry per article plus the root |
//! | [`preview`] | First-page PDF thumbnails via an external rasterizer |
//! | [`config`] | Optional `paperstack.toml`: site identity, paths, preview settings |
//! | [`output`] | CLI output formatting for all commands |
//!
//! # Design Decisions
//!
//! ## Metadata as a Value
//!
//! Academic crawlers (Google Scholar and friends) read `citation_*` meta tags
//! from the document head, and a page that swaps articles in place must
//! remove the previous article's tags before installing the next set.
//! [`meta`] therefore produces an immutable [`meta::MetadataSet`] and models
//! the head as an explicit [`meta::DocumentHead`] with a matched apply/clear
//! pair — stale tags cannot accumulate because `apply` replaces wholesale.
//! The static shells render their `<head>` from the same value, so the
//! crawler-visible subset can never drift from the runtime set.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): compile-time
//! checked, type-safe, auto-escaped, and no template directory to ship.
//!
//! ## Rasterization Is Someone Else's Job
//!
//! PDF rendering is not worth owning. [`preview`] defines a one-shot fallible
//! [`preview::Rasterizer`] seam and ships a Poppler (`pdftoppm`) backed
//! implementation; the `image` crate handles the resize and JPEG encode.
//! A failed conversion is recorded per article and reported in the batch
//! summary — one corrupt PDF never blocks the rest of the catalog.

pub mod citation;
pub mod config;
pub mod format;
pub mod generate;
pub mod meta;
pub mod output;
pub mod preview;
pub mod shell;
pub mod sitemap;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
