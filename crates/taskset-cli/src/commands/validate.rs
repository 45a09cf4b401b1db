//! The `taskset validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(assignment_path: PathBuf) -> Result<()> {
    let assignment = taskset_core::parser::parse_assignment(&assignment_path)?;

    let questions: usize = assignment.tasks.iter().map(|t| t.questions.len()).sum();
    println!(
        "Assignment: {} ({} tasks, {} questions)",
        assignment.title,
        assignment.tasks.len(),
        questions
    );

    let warnings = taskset_core::parser::validate_assignment(&assignment);
    for w in &warnings {
        println!("  WARNING: {w}");
    }

    if warnings.is_empty() {
        println!("Assignment valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
