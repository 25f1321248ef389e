//! HTML page generation
//!
//! Wraps a rendered document in a self-contained HTML page with embedded CSS.
//! Pages work offline; segment hover labels use native `title` tooltips.

use crate::view::{html_escape, Document};

/// Render a document as a standalone HTML page
pub fn render_html_page(doc: &Document, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
{content}{footer}
</body>
</html>
"#,
        title = html_escape(title),
        css = inline_css(),
        content = doc
            .body
            .children
            .iter()
            .map(|c| c.to_html())
            .collect::<String>(),
        footer = render_footer(),
    )
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.5;
    color: #111827;
    background: #ffffff;
    margin: 0;
    padding: 2rem;
}

.center {
    text-align: center;
}

h5 {
    font-size: 1.1rem;
    font-weight: 600;
    margin-top: 0;
}

.bar-segment {
    box-sizing: border-box;
}

.bar-segment[title]:hover {
    opacity: 0.85;
    cursor: default;
}

footer {
    margin-top: 2rem;
    color: #9ca3af;
    font-size: 0.75rem;
    text-align: center;
}
"#
}

fn render_footer() -> String {
    r#"<footer>
    <p>Generated by runs-summary</p>
</footer>"#
        .to_string()
}
