//! Markdown note rendering.
//!
//! # Responsibility
//! - Turn note source into HTML with fenced code, blockquotes and tables.
//! - Prefix the fixed preview stylesheet.
//!
//! # Invariants
//! - Rendering is pure: the same source always yields the same HTML.

pub mod markup;

use pulldown_cmark::{html::push_html, Options, Parser};

/// Stylesheet placed ahead of every rendered preview.
pub const PREVIEW_CSS: &str = r#"<style>
body { font-family: 'Segoe UI', sans-serif; padding: 20px; line-height: 1.6; color: #333; }
h1, h2, h3 { color: #2c3e50; border-bottom: 1px solid #eee; padding-bottom: 5px; }
pre { background-color: #f4f4f4; border: 1px solid #ddd; padding: 10px; border-radius: 5px; font-family: 'Consolas', monospace; }
code { background-color: #f4f4f4; color: #c7254e; padding: 2px 4px; border-radius: 3px; font-family: 'Consolas', monospace; }
blockquote { border-left: 5px solid #3498db; margin: 10px 0; padding: 10px 20px; color: #555; background-color: #f0f8ff; }
table { border-collapse: collapse; width: 100%; margin: 15px 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; font-weight: bold; color: #333; }
tr:nth-child(even) { background-color: #f9f9f9; }
tr:hover { background-color: #f1f1f1; }
a { color: #3498db; text-decoration: none; font-weight: bold; }
a:hover { text-decoration: underline; }
</style>
"#;

/// Renders markdown to an HTML fragment without the stylesheet.
pub fn render_html(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_TABLES);
    let mut html = String::with_capacity(source.len() * 3 / 2);
    push_html(&mut html, parser);
    html
}

/// Renders markdown into a styled preview document.
pub fn render_preview(source: &str) -> String {
    let body = render_html(source);
    let mut page = String::with_capacity(PREVIEW_CSS.len() + body.len());
    page.push_str(PREVIEW_CSS);
    page.push_str(&body);
    page
}
