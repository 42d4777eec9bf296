//! Citation text generation.
//!
//! Two textual representations of one article record: APA-style prose for
//! the copy-paste box on detail pages, and a BibTeX `@article` entry for
//! reference managers. Both formats are consumed verbatim by users and
//! indexing tools, so field order and separator placement are fixed —
//! optional segments appear if and only if the source field is present, in
//! the order journal, volume, pages, DOI.

use crate::store::Article;

/// APA-style citation:
/// `Authors (Year). Title[. Journal][, Volume][, Pages][. https://doi.org/DOI]`
pub fn apa_citation(article: &Article) -> String {
    let mut citation = format!(
        "{} ({}). {}",
        article.authors.join(", "),
        article.year(),
        article.title
    );

    if let Some(journal) = &article.journal {
        citation.push_str(&format!(". {journal}"));
    }
    if let Some(volume) = &article.volume {
        citation.push_str(&format!(", {volume}"));
    }
    if let Some(pages) = &article.pages {
        citation.push_str(&format!(", {pages}"));
    }
    if let Some(doi) = &article.doi {
        citation.push_str(&format!(". https://doi.org/{doi}"));
    }

    citation
}

/// BibTeX `@article` entry. The key is the article id with hyphens removed;
/// authors are joined with `" and "` per BibTeX convention.
pub fn bibtex_citation(article: &Article) -> String {
    let key = article.id.replace('-', "");
    let mut entry = format!(
        "@article{{{key},\n  title={{{}}},\n  author={{{}}},\n  year={{{}}}",
        article.title,
        article.authors.join(" and "),
        article.year()
    );

    if let Some(journal) = &article.journal {
        entry.push_str(&format!(",\n  journal={{{journal}}}"));
    }
    if let Some(volume) = &article.volume {
        entry.push_str(&format!(",\n  volume={{{volume}}}"));
    }
    if let Some(pages) = &article.pages {
        entry.push_str(&format!(",\n  pages={{{pages}}}"));
    }
    if let Some(doi) = &article.doi {
        entry.push_str(&format!(",\n  doi={{{doi}}}"));
    }

    entry.push_str("\n}");
    entry
}
