//! Output formatting for scan results and catalog listings.
//!
//! Separate from core logic so findcomp can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::{AssetMatch, TypeDescriptor};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print catalog labels to stdout, one per line.
pub fn print_labels(labels: &[String]) {
    print_labels_to(labels, &mut io::stdout().lock());
}

/// Print catalog labels to a custom writer.
pub fn print_labels_to<W: Write>(labels: &[String], writer: &mut W) {
    for label in labels {
        let _ = writeln!(writer, "{}", label);
    }
    if labels.is_empty() {
        let _ = writeln!(writer, "{}", "No matching component types.".dimmed());
    } else {
        let _ = writeln!(
            writer,
            "\n{} component {}",
            labels.len(),
            if labels.len() == 1 { "type" } else { "types" }
        );
    }
}

/// Print scan results to stdout.
///
/// Each matching asset is printed as a read-only reference, with the
/// extracted component instances indented one level below it.
pub fn print_matches(target: &TypeDescriptor, matches: &[AssetMatch], scanned: usize) {
    print_matches_to(target, matches, scanned, &mut io::stdout().lock());
}

/// Print scan results to a custom writer.
pub fn print_matches_to<W: Write>(
    target: &TypeDescriptor,
    matches: &[AssetMatch],
    scanned: usize,
    writer: &mut W,
) {
    for found in matches {
        let _ = writeln!(writer, "{}", found.asset_path.bold());
        for instance in &found.instances {
            let _ = writeln!(writer, "    {}", instance.node_path.dimmed());
        }
    }

    if matches.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Scanned {} assets - nothing depends on {}",
                scanned,
                target.display_label()
            )
            .red()
        );
    } else {
        let _ = writeln!(
            writer,
            "\n{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} assets - {} use {}",
                scanned,
                matches.len(),
                target.display_label()
            )
            .green()
        );
    }
}
