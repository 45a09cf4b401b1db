//! Copy manifest: a JSON record of what one generation batch produced.
//!
//! The manifest keeps the literal text of every rendered question and the
//! page order of every copy, which makes it usable as an answer key.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assemble::AssembledCopy;
use crate::model::RenderedTask;

/// A complete record of one generation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyManifest {
    /// Unique batch identifier.
    pub id: Uuid,
    /// When the batch was generated.
    pub created_at: DateTime<Utc>,
    /// Title of the assignment the copies were generated from.
    pub assignment_title: String,
    /// Seed of the batch generator, if one was fixed.
    #[serde(default)]
    pub seed: Option<u64>,
    /// One record per copy, in generation order.
    pub copies: Vec<CopyRecord>,
}

/// What one copy contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRecord {
    /// Unique copy identifier.
    pub id: Uuid,
    /// 1-based copy number.
    pub number: usize,
    /// Task index shown on each content page.
    pub page_order: Vec<usize>,
    /// Where the exported copy was written, if it was.
    #[serde(default)]
    pub files: Vec<String>,
    /// Rendered tasks in authoring order.
    pub tasks: Vec<RenderedTask>,
}

impl CopyManifest {
    /// Start an empty manifest for `assignment_title`.
    pub fn new(assignment_title: &str, seed: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            assignment_title: assignment_title.to_string(),
            seed,
            copies: Vec::new(),
        }
    }

    /// Record a generated copy and return its record for further edits.
    pub fn record<B>(&mut self, copy: &AssembledCopy<B>) -> &mut CopyRecord {
        let number = self.copies.len() + 1;
        self.copies.push(CopyRecord {
            id: Uuid::new_v4(),
            number,
            page_order: copy.page_order.clone(),
            files: Vec::new(),
            tasks: copy.tasks.clone(),
        });
        let last = self.copies.len() - 1;
        &mut self.copies[last]
    }

    /// Save the manifest as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize manifest")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest to {}", path.display()))?;
        Ok(())
    }

    /// Load a manifest from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest from {}", path.display()))?;
        let manifest: CopyManifest =
            serde_json::from_str(&content).context("failed to parse manifest JSON")?;
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(order: Vec<usize>) -> AssembledCopy<()> {
        AssembledCopy {
            document: (),
            page_order: order,
            tasks: vec![RenderedTask {
                title: "Task 1".into(),
                body: String::new(),
                questions: vec!["A) 2 + 3".into()],
            }],
        }
    }

    #[test]
    fn record_numbers_copies() {
        let mut manifest = CopyManifest::new("Quiz", Some(7));
        manifest.record(&copy(vec![0]));
        manifest
            .record(&copy(vec![0]))
            .files
            .push("quiz-2.html".into());

        assert_eq!(manifest.copies.len(), 2);
        assert_eq!(manifest.copies[0].number, 1);
        assert_eq!(manifest.copies[1].number, 2);
        assert_eq!(manifest.copies[1].files, vec!["quiz-2.html"]);
        assert_ne!(manifest.copies[0].id, manifest.copies[1].id);
    }

    #[test]
    fn save_and_load() {
        let mut manifest = CopyManifest::new("Quiz", None);
        manifest.record(&copy(vec![0]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("manifest.json");
        manifest.save_json(&path).unwrap();

        let loaded = CopyManifest::load_json(&path).unwrap();
        assert_eq!(loaded.id, manifest.id);
        assert_eq!(loaded.assignment_title, "Quiz");
        assert_eq!(loaded.copies[0].tasks[0].questions[0], "A) 2 + 3");
    }
}
