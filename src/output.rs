//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is an inventory of the work data, not of files. Every card is
//! shown by its position and title, with the details it will render as
//! indented context lines. Files appear only where something was written.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Experience (2 cards) → #experience-cards
//!     001 Staff Engineer
//!         Subtitle: Acme Corp
//!         Date: March 2023
//!         Link: https://acme.example
//!     002 Intern
//!         Date: June 2019
//!         Link: https://intern.example
//! Publications (1 card) → #publications-cards
//!     001 On Carousels
//!         ...
//! Projects (0 cards) → #projects-cards
//!
//! Warnings
//!     Experience 002 Intern: empty link
//!
//! 3 cards, 1 warning
//! ```
//!
//! ## Render
//!
//! ```text
//! Experience (2 cards) → experience-cards.html
//! Publications (1 card) → publications-cards.html
//! Projects (0 cards) → projects-cards.html
//!
//! Rendered 3 cards into dist/cards
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::cards::{RenderedFile, Warning, format_month_year};
use crate::types::{Category, WorkData, WorkItem};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Category header: label, card count, and where the cards go.
///
/// ```text
/// Experience (2 cards) → #experience-cards
/// ```
fn category_header(category: Category, count: usize, destination: &str) -> String {
    format!(
        "{} ({}) → {}",
        category.label(),
        plural(count, "card"),
        destination
    )
}

/// Card line: titled cards show the title, untitled ones a marker.
fn card_line(index: usize, item: &WorkItem) -> String {
    if item.title.trim().is_empty() {
        format!("{} (untitled)", format_index(index))
    } else {
        format!("{} {}", format_index(index), item.title)
    }
}

/// Format the `check` inventory.
pub fn format_check_output(data: &WorkData, warnings: &[Warning]) -> Vec<String> {
    let mut lines = Vec::new();

    for category in Category::ALL {
        let items = data.items(category);
        lines.push(category_header(
            category,
            items.len(),
            &format!("#{}", category.container_id()),
        ));
        for (i, item) in items.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), card_line(i + 1, item)));
            if let Some(subtitle) = &item.subtitle {
                lines.push(format!("{}Subtitle: {}", indent(2), subtitle));
            }
            let date = format_month_year(&item.date);
            if !date.is_empty() {
                lines.push(format!("{}Date: {}", indent(2), date));
            }
            if !item.link.is_empty() {
                lines.push(format!("{}Link: {}", indent(2), item.link));
            }
        }
    }

    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for w in warnings {
            lines.push(format!(
                "{}{} {} {}: {}",
                indent(1),
                w.category.label(),
                format_index(w.position),
                if w.title.is_empty() { "(untitled)" } else { w.title.as_str() },
                w.issue
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(data.total(), "card"),
        plural(warnings.len(), "warning")
    ));
    lines
}

pub fn print_check_output(data: &WorkData, warnings: &[Warning]) {
    for line in format_check_output(data, warnings) {
        println!("{}", line);
    }
}

/// Format the `render` summary.
pub fn format_render_output(files: &[RenderedFile], output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for file in files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());
        lines.push(category_header(file.category, file.cards, &name));
    }
    let total: usize = files.iter().map(|f| f.cards).sum();
    lines.push(String::new());
    lines.push(format!(
        "Rendered {} into {}",
        plural(total, "card"),
        output_dir.display()
    ));
    lines
}

pub fn print_render_output(files: &[RenderedFile], output_dir: &Path) {
    for line in format_render_output(files, output_dir) {
        println!("{}", line);
    }
}
