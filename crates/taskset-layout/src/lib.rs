//! taskset-layout — Page layout backend and document export.
//!
//! Implements the `LayoutBackend` trait with an in-memory A4 page model and
//! exports assembled copies as printable HTML or JSON.

pub mod html;
pub mod page;

use std::fmt;
use std::str::FromStr;

pub use page::PageDocument;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Html,
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }

    /// Parse a comma-separated format list; `all` selects every format.
    pub fn parse_list(s: &str) -> Result<Vec<ExportFormat>, String> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(vec![ExportFormat::Html, ExportFormat::Json]);
        }
        let mut formats = Vec::new();
        for part in s.split(',') {
            let format: ExportFormat = part.parse()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}
