//! Test doubles shared by the unit tests of this crate.

use crate::model::{Assignment, Task};
use crate::traits::{LayoutBackend, TextOptions};

/// One `place_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub options: TextOptions,
}

/// A backend that records placements on A4-sized pages. Every line of text
/// is `font_size / 2` units high.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    pub pages: Vec<Vec<Placed>>,
    pub current: usize,
    pub font_size: f64,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            current: 0,
            font_size: 12.0,
        }
    }
}

impl LayoutBackend for RecordingBackend {
    fn page_width(&self) -> f64 {
        210.0
    }

    fn page_height(&self) -> f64 {
        297.0
    }

    fn line_height(&self) -> f64 {
        self.font_size / 2.0
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn place_text(&mut self, text: &str, x: f64, y: f64, options: &TextOptions) {
        let font_size = self.font_size;
        self.pages[self.current].push(Placed {
            text: text.to_string(),
            x,
            y,
            font_size,
            options: *options,
        });
    }

    fn text_height(&self, text: &str, _max_width: f64) -> f64 {
        text.lines().count().max(1) as f64 * self.line_height()
    }

    fn move_page(&mut self, from: usize, to: usize) {
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
    }
}

/// An assignment titled "Sample" with `tasks` tasks named "Task 1", ...
/// Each task has two questions, the first with a range expression.
pub fn sample_assignment(tasks: usize) -> Assignment {
    Assignment {
        title: "Sample".into(),
        tasks: (1..=tasks)
            .map(|i| Task {
                title: format!("Task {i}"),
                body: format!("Body of task {i}"),
                questions: vec![
                    "A) Solve \\[100..500]\\x + 2 = 5".into(),
                    "B) Pick \\[1,2,3]\\".into(),
                ],
            })
            .collect(),
    }
}
