//! Assignment file parser.
//!
//! Loads assignments from TOML or JSON files, and validates them.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Assignment;
use crate::render::check_question;

/// On-disk formats an assignment can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentFormat {
    Toml,
    Json,
}

impl AssignmentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(AssignmentFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(AssignmentFormat::Json),
            _ => anyhow::bail!(
                "unsupported assignment file (expected .toml or .json): {}",
                path.display()
            ),
        }
    }
}

impl fmt::Display for AssignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentFormat::Toml => write!(f, "toml"),
            AssignmentFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a single assignment file.
pub fn parse_assignment(path: &Path) -> Result<Assignment> {
    let format = AssignmentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assignment file: {}", path.display()))?;

    parse_assignment_str(&content, format, path)
}

/// Parse an assignment from a string (useful for testing).
pub fn parse_assignment_str(
    content: &str,
    format: AssignmentFormat,
    source_path: &Path,
) -> Result<Assignment> {
    let assignment = match format {
        AssignmentFormat::Toml => toml::from_str::<Assignment>(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
        AssignmentFormat::Json => serde_json::from_str::<Assignment>(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
    };

    tracing::debug!(
        title = %assignment.title,
        tasks = assignment.tasks.len(),
        %format,
        "loaded assignment"
    );
    Ok(assignment)
}

/// A warning from assignment validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The task index (if applicable).
    pub task: Option<usize>,
    /// The question index within the task (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn assignment(message: impl Into<String>) -> Self {
        Self {
            task: None,
            question: None,
            message: message.into(),
        }
    }

    fn task(task: usize, message: impl Into<String>) -> Self {
        Self {
            task: Some(task),
            question: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.task, self.question) {
            (Some(t), Some(q)) => write!(f, "[task {}, question {}] {}", t + 1, q + 1, self.message),
            (Some(t), None) => write!(f, "[task {}] {}", t + 1, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Validate an assignment for common issues.
///
/// Every expression is checked without drawing values, so a warning-free
/// assignment always generates.
pub fn validate_assignment(assignment: &Assignment) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if assignment.title.trim().is_empty() {
        warnings.push(ValidationWarning::assignment("assignment title is empty"));
    }

    if assignment.tasks.is_empty() {
        warnings.push(ValidationWarning::assignment("assignment has no tasks"));
    }

    for (t, task) in assignment.tasks.iter().enumerate() {
        if task.title.trim().is_empty() {
            warnings.push(ValidationWarning::task(t, "task title is empty"));
        }

        if task.questions.is_empty() {
            warnings.push(ValidationWarning::task(t, "task has no questions"));
        }

        for (q, question) in task.questions.iter().enumerate() {
            if let Err(e) = check_question(question) {
                warnings.push(ValidationWarning {
                    task: Some(t),
                    question: Some(q),
                    message: e.to_string(),
                });
            }
        }
    }

    warnings
}
