//! Printable HTML export.
//!
//! Produces a self-contained HTML file with the CSS inlined. Each page is
//! an A4-sized `<section>` with text positioned in millimetres, and print
//! styles put every section on its own sheet.

use anyhow::Result;
use std::path::Path;

use taskset_core::traits::{Align, LayoutBackend};

use crate::page::{PageDocument, TextItem};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate a printable HTML document.
pub fn generate_html(document: &PageDocument, title: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str(&format!(
        "@page {{ size: {:.0}mm {:.0}mm; margin: 0; }}\n",
        document.page_width(),
        document.page_height()
    ));
    html.push_str("</style>\n");
    html.push_str(&format!(
        "<meta name=\"generator\" content=\"taskset {}\">\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</head>\n<body>\n");

    for (index, page) in document.pages().iter().enumerate() {
        html.push_str(&format!(
            "<section class=\"page\" data-page=\"{}\" style=\"width:{:.2}mm;height:{:.2}mm\">\n",
            index + 1,
            document.page_width(),
            document.page_height()
        ));
        for item in &page.items {
            html.push_str(&text_block(item));
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Write a printable HTML document to a file.
pub fn write_html(document: &PageDocument, title: &str, path: &Path) -> Result<()> {
    let html = generate_html(document, title);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn text_block(item: &TextItem) -> String {
    // `y` is the first baseline; CSS positions the top of the line box.
    let top = item.y - item.line_height * 0.8;
    let class = match item.align {
        Align::Left => "text",
        Align::Center => "text center",
    };

    let lines: Vec<String> = item.lines.iter().map(|l| html_escape(l)).collect();
    format!(
        "  <div class=\"{}\" style=\"left:{:.2}mm;top:{:.2}mm;font-size:{:.1}pt;line-height:{:.2}mm\">{}</div>\n",
        class,
        item.x,
        top,
        item.font_size,
        item.line_height,
        lines.join("<br>")
    )
}

const CSS: &str = r#"
body { margin: 0; background: #e5e7eb; font-family: Helvetica, Arial, sans-serif; color: #111; }
.page { position: relative; margin: 1rem auto; background: #fff; box-shadow: 0 1px 4px rgba(0,0,0,.2); overflow: hidden; }
.text { position: absolute; white-space: pre; }
.center { transform: translateX(-50%); text-align: center; }
@media print {
  body { background: none; }
  .page { margin: 0; box-shadow: none; page-break-after: always; break-after: page; }
}
"#;
