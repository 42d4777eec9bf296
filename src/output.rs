//! CLI output formatting for all commands.
//!
//! Output is information-centric: the primary display for every article is
//! its positional index and title, with identifiers and paths as indented
//! context lines. Each command has a `format_*` function returning
//! `Vec<String>` (pure, testable) and a `print_*` wrapper that writes to
//! stdout.
//!
//! ```text
//! Articles
//! 001 Lui ou nous (Conference)
//!     Id: lui-ou-nous
//!     Published: 2025-02-18
//!
//! Previews
//! 001 lui-ou-nous → previews/lui-ou-nous-preview.jpg
//! 002 second: FAILED - PDF file not found
//!
//! Successful: 1
//! Failed: 1
//! ```

use crate::format::category_badge;
use crate::generate::GenerateStats;
use crate::preview::{PreviewOutcome, PreviewReport};
use crate::shell::ShellOutcome;
use crate::store::Store;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check(store: &Store) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    for (idx, article) in store.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(idx + 1),
            article.title,
            category_badge(&article.category)
        ));
        lines.push(format!("    Id: {}", article.id));
        lines.push(format!("    Published: {}", article.publication_date));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} article{} valid",
        store.len(),
        if store.len() == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_check(store: &Store) {
    print_lines(&format_check(store));
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate(stats: &GenerateStats, output_dir: &str) -> Vec<String> {
    vec![
        "Home → index.html".to_string(),
        format!("Generated {} article pages", stats.article_pages),
        format!("Site generated at {output_dir}"),
    ]
}

pub fn print_generate(stats: &GenerateStats, output_dir: &str) {
    print_lines(&format_generate(stats, output_dir));
}

// ============================================================================
// Shells
// ============================================================================

pub fn format_shell_report(outcomes: &[ShellOutcome]) -> Vec<String> {
    let mut lines = Vec::with_capacity(outcomes.len() + 2);
    for (idx, outcome) in outcomes.iter().enumerate() {
        match outcome {
            ShellOutcome::Written { id, path } => {
                lines.push(format!("{} {id} → {path}", format_index(idx + 1)));
            }
            ShellOutcome::Failed { id, reason } => {
                lines.push(format!("{} {id}: FAILED - {reason}", format_index(idx + 1)));
            }
        }
    }
    let written = outcomes.iter().filter(|o| o.is_written()).count();
    lines.push(String::new());
    lines.push(format!("{written}/{} shells written", outcomes.len()));
    lines
}

pub fn print_shell_report(outcomes: &[ShellOutcome]) {
    print_lines(&format_shell_report(outcomes));
}

// ============================================================================
// Previews
// ============================================================================

pub fn format_preview_report(report: &PreviewReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.outcomes.len() + 3);
    for (idx, outcome) in report.outcomes.iter().enumerate() {
        match outcome {
            PreviewOutcome::Generated { id, path } => {
                lines.push(format!(
                    "{} {id} → {}",
                    format_index(idx + 1),
                    path.display()
                ));
            }
            PreviewOutcome::Failed { id, reason } => {
                lines.push(format!("{} {id}: FAILED - {reason}", format_index(idx + 1)));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!("Successful: {}", report.success_count()));
    lines.push(format!("Failed: {}", report.failure_count()));
    lines
}

pub fn print_preview_report(report: &PreviewReport) {
    print_lines(&format_preview_report(report));
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::test_helpers::{minimal_article, sample_article};
    use std::path::PathBuf;

    #[test]
    fn check_lists_articles_with_context_lines() {
        let store =
            Store::from_articles(vec![sample_article(), minimal_article("second")]).unwrap();
        let lines = format_check(&store);
        assert_eq!(lines[0], "Articles");
        assert_eq!(lines[1], "001 Lui ou nous (Conference)");
        assert_eq!(lines[2], "    Id: lui-ou-nous");
        assert_eq!(lines[3], "    Published: 2025-02-18");
        assert_eq!(lines.last().unwrap(), "2 articles valid");
    }

    #[test]
    fn check_singular_count() {
        let store = Store::from_articles(vec![sample_article()]).unwrap();
        assert_eq!(format_check(&store).last().unwrap(), "1 article valid");
    }

    #[test]
    fn preview_report_shows_outcomes_and_summary() {
        let report = PreviewReport {
            outcomes: vec![
                PreviewOutcome::Generated {
                    id: "ok".to_string(),
                    path: PathBuf::from("previews/ok-preview.jpg"),
                },
                PreviewOutcome::Failed {
                    id: "bad".to_string(),
                    reason: "PDF file not found".to_string(),
                },
            ],
        };
        let lines = format_preview_report(&report);
        assert_eq!(lines[0], "001 ok → previews/ok-preview.jpg");
        assert_eq!(lines[1], "002 bad: FAILED - PDF file not found");
        assert!(lines.contains(&"Successful: 1".to_string()));
        assert!(lines.contains(&"Failed: 1".to_string()));
    }

    #[test]
    fn shell_report_counts_written() {
        let outcomes = vec![
            ShellOutcome::Written {
                id: "a".to_string(),
                path: "article/a/index.html".to_string(),
            },
            ShellOutcome::Failed {
                id: "b".to_string(),
                reason: "disk full".to_string(),
            },
        ];
        let lines = format_shell_report(&outcomes);
        assert_eq!(lines[0], "001 a → article/a/index.html");
        assert_eq!(lines[1], "002 b: FAILED - disk full");
        assert_eq!(lines.last().unwrap(), "1/2 shells written");
    }
}
