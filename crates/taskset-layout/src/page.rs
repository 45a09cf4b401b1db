//! In-memory page model implementing [`LayoutBackend`].
//!
//! Lengths are millimetres, font sizes points. Text is measured with a
//! fixed average glyph width, which is close enough for Helvetica-like
//! fonts to wrap lines where a PDF renderer would.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use taskset_core::traits::{Align, LayoutBackend, TextOptions};

/// A4 portrait width in millimetres.
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 portrait height in millimetres.
pub const A4_HEIGHT_MM: f64 = 297.0;

const PT_PER_MM: f64 = 72.0 / 25.4;
const LINE_HEIGHT_FACTOR: f64 = 1.15;
const AVERAGE_GLYPH_EM: f64 = 0.5;
const DEFAULT_FONT_SIZE: f64 = 16.0;

/// A block of placed text, already split into lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub lines: Vec<String>,
    /// Anchor x: left edge, or center for centered text.
    pub x: f64,
    /// Baseline of the first line.
    pub y: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub align: Align,
}

/// One page of placed text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<TextItem>,
}

/// A paginated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    width: f64,
    height: f64,
    font_size: f64,
    #[serde(skip)]
    current: usize,
    pages: Vec<Page>,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDocument {
    /// An empty A4 document.
    pub fn new() -> Self {
        Self::with_page_size(A4_WIDTH_MM, A4_HEIGHT_MM)
    }

    /// An empty document with custom page dimensions.
    pub fn with_page_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font_size: DEFAULT_FONT_SIZE,
            current: 0,
            pages: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Width of `text` on a single line at `font_size`.
    pub fn text_width(text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * AVERAGE_GLYPH_EM / PT_PER_MM
    }

    /// Line height for `font_size`.
    pub fn line_height_for(font_size: f64) -> f64 {
        font_size * LINE_HEIGHT_FACTOR / PT_PER_MM
    }

    /// Split `text` into lines no wider than `max_width`.
    ///
    /// Explicit newlines are kept. Words are never broken, so a word wider
    /// than `max_width` gets a line of its own. Empty text has no lines.
    pub fn wrap_text(text: &str, max_width: Option<f64>, font_size: f64) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let Some(max_width) = max_width else {
            return text.split('\n').map(str::to_string).collect();
        };

        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                if line.is_empty() {
                    line.push_str(word);
                    continue;
                }
                let candidate = format!("{line} {word}");
                if Self::text_width(&candidate, font_size) <= max_width {
                    line = candidate;
                } else {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Save the page model as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize document")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write document to {}", path.display()))?;
        Ok(())
    }
}

impl LayoutBackend for PageDocument {
    fn page_width(&self) -> f64 {
        self.width
    }

    fn page_height(&self) -> f64 {
        self.height
    }

    fn line_height(&self) -> f64 {
        Self::line_height_for(self.font_size)
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn place_text(&mut self, text: &str, x: f64, y: f64, options: &TextOptions) {
        let lines = Self::wrap_text(text, options.max_width, self.font_size);
        if lines.is_empty() {
            return;
        }
        if self.pages.is_empty() {
            self.add_page();
        }

        let item = TextItem {
            lines,
            x,
            y,
            font_size: self.font_size,
            line_height: self.line_height(),
            align: options.align,
        };
        self.pages[self.current].items.push(item);
    }

    fn text_height(&self, text: &str, max_width: f64) -> f64 {
        Self::wrap_text(text, Some(max_width), self.font_size).len() as f64 * self.line_height()
    }

    fn move_page(&mut self, from: usize, to: usize) {
        let count = self.pages.len();
        if from >= count || to >= count {
            tracing::warn!(from, to, count, "ignoring out-of-range page move");
            return;
        }

        let page = self.pages.remove(from);
        self.pages.insert(to, page);

        self.current = if self.current == from {
            to
        } else if from < self.current && self.current <= to {
            self.current - 1
        } else if to <= self.current && self.current < from {
            self.current + 1
        } else {
            self.current
        };
    }
}
