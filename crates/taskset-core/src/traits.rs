//! Core trait definitions for document layout backends.
//!
//! The assembler never talks to a concrete page model. It drives a
//! [`LayoutBackend`], implemented by `taskset-layout` and by test doubles.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Layout backend trait
// ---------------------------------------------------------------------------

/// Page and text primitives of a paginated document.
///
/// Pages are addressed by 0-based index. Lengths are in the backend's layout
/// unit; font sizes are in points.
pub trait LayoutBackend {
    /// Width of a page.
    fn page_width(&self) -> f64;

    /// Height of a page.
    fn page_height(&self) -> f64;

    /// Height of one line of text at the current font size.
    fn line_height(&self) -> f64;

    /// Current font size.
    fn font_size(&self) -> f64;

    /// Change the font size used by subsequent text calls.
    fn set_font_size(&mut self, size: f64);

    /// Append a page and make it the current page.
    fn add_page(&mut self);

    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Place already-final text on the current page.
    fn place_text(&mut self, text: &str, x: f64, y: f64, options: &TextOptions);

    /// Height `text` occupies when wrapped at `max_width`.
    fn text_height(&self, text: &str, max_width: f64) -> f64;

    /// Move the page at `from` so that it ends up at index `to`.
    fn move_page(&mut self, from: usize, to: usize);
}

/// Horizontal alignment of placed text relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// How text is placed on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    pub align: Align,
    /// Wrap lines longer than this width.
    #[serde(default)]
    pub max_width: Option<f64>,
}

impl TextOptions {
    /// Left-aligned text wrapped at `max_width`.
    pub fn wrapped(max_width: f64) -> Self {
        Self {
            align: Align::Left,
            max_width: Some(max_width),
        }
    }

    /// Centered text wrapped at `max_width`.
    pub fn centered(max_width: f64) -> Self {
        Self {
            align: Align::Center,
            max_width: Some(max_width),
        }
    }
}
