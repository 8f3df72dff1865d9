//! Degraded markup for expressions the renderer rejected.

use html_escape::{encode_double_quoted_attribute, encode_text};

pub const DEFAULT_ERROR_COLOR: &str = "red";

const ERROR_CLASS: &str = "katex-error";

/// Styling applied to the fallback wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackStyle {
    pub error_color: String,
}

impl Default for FallbackStyle {
    fn default() -> Self {
        Self {
            error_color: DEFAULT_ERROR_COLOR.to_string(),
        }
    }
}

impl FallbackStyle {
    pub fn new(error_color: impl Into<String>) -> Self {
        Self {
            error_color: error_color.into(),
        }
    }
}

/// Echo `expression` inside an error-styled `<div>` (display) or `<span>` (inline).
///
/// The expression, diagnostic and colour are escaped, so the result never
/// carries markup from the input.
pub fn fallback_markup(
    expression: &str,
    display_mode: bool,
    diagnostic: &str,
    style: &FallbackStyle,
) -> String {
    let tag = if display_mode { "div" } else { "span" };
    let color = encode_double_quoted_attribute(&style.error_color);
    let title = encode_double_quoted_attribute(diagnostic);
    let body = encode_text(expression);

    let mut html = String::with_capacity(body.len() + title.len() + 64);
    html.push('<');
    html.push_str(tag);
    html.push_str(" class=\"");
    html.push_str(ERROR_CLASS);
    html.push_str("\" style=\"color:");
    html.push_str(&color);
    html.push('"');
    if !title.is_empty() {
        html.push_str(" title=\"");
        html.push_str(&title);
        html.push('"');
    }
    html.push('>');
    html.push_str(&body);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
    html
}
