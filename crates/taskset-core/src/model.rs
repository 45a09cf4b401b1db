//! Core data model types for taskset.
//!
//! An [`Assignment`] is what the editor hands over for document generation:
//! a title plus an ordered list of [`Task`]s whose questions are raw
//! templates.

use serde::{Deserialize, Serialize};

/// One question group within an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Heading printed at the top of the task page.
    pub title: String,
    /// Introductory text printed under the heading.
    #[serde(default)]
    pub body: String,
    /// Question templates, possibly containing `\[...]\` expressions.
    #[serde(default)]
    pub questions: Vec<String>,
}

/// The unit passed into document generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Printed on the title page.
    pub title: String,
    /// Tasks in authoring order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A task after every question has been rendered to literal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTask {
    pub title: String,
    pub body: String,
    pub questions: Vec<String>,
}

/// Page margins in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub x: f64,
    pub y: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { x: 15.0, y: 25.0 }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    /// Assignment title on the title page.
    #[serde(default = "default_title_size")]
    pub title: f64,
    /// Task headings.
    #[serde(default = "default_heading_size")]
    pub heading: f64,
    /// Task body and questions.
    #[serde(default = "default_body_size")]
    pub body: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: default_title_size(),
            heading: default_heading_size(),
            body: default_body_size(),
        }
    }
}

fn default_title_size() -> f64 {
    32.0
}

fn default_heading_size() -> f64 {
    24.0
}

fn default_body_size() -> f64 {
    12.0
}

/// Options for assembling one document copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentOptions {
    /// Randomize the order of task pages.
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub fonts: FontSizes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_options_default() {
        let opts = DocumentOptions::default();
        assert!(!opts.shuffle);
        assert_eq!(opts.margin, Margin { x: 15.0, y: 25.0 });
        assert_eq!(opts.fonts.title, 32.0);
        assert_eq!(opts.fonts.heading, 24.0);
        assert_eq!(opts.fonts.body, 12.0);
    }

    #[test]
    fn assignment_from_editor_json() {
        let json = r#"{
            "title": "Opgavesæt",
            "tasks": [
                {
                    "title": "Opgave 1",
                    "body": "Ligninger",
                    "questions": ["A) Løs følgende: \\[100..500]\\x + 2 = 5"]
                },
                { "title": "Opgave 2" }
            ]
        }"#;
        let assignment: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.tasks.len(), 2);
        assert_eq!(
            assignment.tasks[0].questions[0],
            "A) Løs følgende: \\[100..500]\\x + 2 = 5"
        );
        assert!(assignment.tasks[1].body.is_empty());
        assert!(assignment.tasks[1].questions.is_empty());
    }
}
