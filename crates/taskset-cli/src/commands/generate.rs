//! The `taskset generate` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use taskset_core::config::load_config_from;
use taskset_core::engine::{CopyEngine, ProgressReporter};
use taskset_core::error::DocumentError;
use taskset_core::manifest::CopyManifest;
use taskset_core::parser::{parse_assignment, validate_assignment};
use taskset_layout::html::write_html;
use taskset_layout::{ExportFormat, PageDocument};

use super::make_rng;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_copy_start(&self, index: usize, total: usize) {
        eprintln!("  Generating copy {}/{total}", index + 1);
    }

    fn on_copy_complete(&self, index: usize, page_order: &[usize]) {
        eprintln!(
            "  Done: copy {} [{}]",
            index + 1,
            format_order(page_order)
        );
    }

    fn on_copy_error(&self, index: usize, error: &DocumentError) {
        eprintln!("  ERROR: copy {}: {error}", index + 1);
    }

    fn on_batch_complete(&self, total: usize, completed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} copies ({:.1}ms)",
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    assignment_path: PathBuf,
    copies: Option<usize>,
    shuffle: Option<bool>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    // Load config; flags win over config values
    let config = load_config_from(config_path.as_deref())?;

    let copies = copies.unwrap_or(config.copies);
    anyhow::ensure!(copies >= 1, "copies must be at least 1");
    let seed = seed.or(config.seed);
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.format.clone());
    let formats = ExportFormat::parse_list(&format).map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut options = config.document_options();
    if let Some(shuffle) = shuffle {
        options.shuffle = shuffle;
    }

    // Load assignment
    let assignment = parse_assignment(&assignment_path)?;
    for w in validate_assignment(&assignment) {
        eprintln!("Warning: {w}");
    }

    eprintln!(
        "taskset v{}: generating {} copies of '{}' ({} tasks{})",
        env!("CARGO_PKG_VERSION"),
        copies,
        assignment.title,
        assignment.tasks.len(),
        if options.shuffle { ", shuffled" } else { "" }
    );
    eprintln!();

    let mut rng = make_rng(seed);
    let engine = CopyEngine::new(options);
    let generated = engine.generate(
        &assignment,
        copies,
        PageDocument::new,
        &mut rng,
        &ConsoleReporter,
    )?;

    // Save outputs
    std::fs::create_dir_all(&output)?;
    let stem = slugify(&assignment.title);
    let mut manifest = CopyManifest::new(&assignment.title, seed);

    for copy in &generated {
        let record = manifest.record(copy);
        for fmt in &formats {
            let file_name = format!("{stem}-{}.{}", record.number, fmt.extension());
            let path = output.join(&file_name);
            match fmt {
                ExportFormat::Html => write_html(&copy.document, &assignment.title, &path)?,
                ExportFormat::Json => copy.document.save_json(&path)?,
            }
            tracing::debug!(path = %path.display(), "wrote copy");
            record.files.push(file_name);
        }
    }

    let manifest_path = output.join("manifest.json");
    manifest.save_json(&manifest_path)?;

    print_summary(&manifest);
    eprintln!("Copies saved to: {}", output.display());
    eprintln!("Manifest: {}", manifest_path.display());

    Ok(())
}

fn format_order(page_order: &[usize]) -> String {
    page_order
        .iter()
        .map(|t| (t + 1).to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// File-name stem derived from the assignment title.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "assignment".to_string()
    } else {
        slug.to_string()
    }
}

fn print_summary(manifest: &CopyManifest) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Copy", "Task order", "Pages", "Files"]);

    for record in &manifest.copies {
        table.add_row(vec![
            Cell::new(record.number),
            Cell::new(format_order(&record.page_order)),
            Cell::new(record.page_order.len() + 1),
            Cell::new(record.files.join(", ")),
        ]);
    }

    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("Opgavesæt"), "opgavesæt");
        assert_eq!(slugify("Math Test: Part 2!"), "math-test-part-2");
        assert_eq!(slugify("  ---  "), "assignment");
    }

    #[test]
    fn order_is_one_based() {
        assert_eq!(format_order(&[2, 0, 1]), "3 → 1 → 2");
    }
}
