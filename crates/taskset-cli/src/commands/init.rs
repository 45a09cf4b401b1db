//! The `taskset init` command.

use std::path::Path;

use anyhow::Result;

const DEFAULT_CONFIG: &str = r#"# taskset configuration

# Copies produced by `taskset generate`
copies = 1

# Shuffle task pages in every copy (the title page always stays first)
shuffle = false

# Fixed seed for reproducible copies; leave unset for fresh values each run
# seed = 42

# Page margins in millimetres: [x, y]
margin = [15.0, 25.0]

# Output directory (supports ${VAR} expansion)
output_dir = "./taskset-output"

# Output formats: html, json, all
format = "html"

[fonts]
title = 32.0
heading = 24.0
body = 12.0
"#;

const EXAMPLE_ASSIGNMENT: &str = r#"title = "Example assignment"

[[tasks]]
title = "Task 1"
body = "Solve the equations and explain your method."
questions = [
    'A) Solve: \[100..500]\x + 2 = 5',
    'B) Explain how you solved question A',
]

[[tasks]]
title = "Task 2"
body = "Rounding"
questions = [
    'A) Round \[NZQ-5..5]\ to one decimal',
    'B) Is \[N1..20]\ a prime number?',
]

[[tasks]]
title = "Task 3"
body = "Fractions"
questions = [
    'A) Reduce \[2,4,6,8]\ / \[12,16]\',
]
"#;

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("taskset.toml"), DEFAULT_CONFIG)?;

    std::fs::create_dir_all("assignments")?;
    write_if_absent(Path::new("assignments/example.toml"), EXAMPLE_ASSIGNMENT)?;

    println!("\nNext steps:");
    println!("  1. Edit assignments/example.toml or add your own assignment");
    println!("  2. Check it: taskset validate --assignment assignments/example.toml");
    println!("  3. Run: taskset generate --assignment assignments/example.toml --copies 3 --shuffle");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskset_core::config::parse_config_str;
    use taskset_core::parser::{parse_assignment_str, validate_assignment, AssignmentFormat};

    #[test]
    fn default_config_parses() {
        let config = parse_config_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.copies, 1);
        assert_eq!(config.margin, [15.0, 25.0]);
        assert_eq!(config.format, "html");
    }

    #[test]
    fn example_assignment_is_valid() {
        let assignment = parse_assignment_str(
            EXAMPLE_ASSIGNMENT,
            AssignmentFormat::Toml,
            Path::new("example.toml"),
        )
        .unwrap();
        assert_eq!(assignment.tasks.len(), 3);
        assert!(validate_assignment(&assignment).is_empty());
    }
}
