use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One formula to render, decoded from a `[expression, display]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, bool)", into = "(String, bool)")]
pub struct RenderItem {
    /// Raw TeX source. May be syntactically invalid.
    pub expression: String,
    /// `true` renders a standalone block, `false` renders inline.
    pub display_mode: bool,
}

impl RenderItem {
    pub fn new(expression: impl Into<String>, display_mode: bool) -> Self {
        Self {
            expression: expression.into(),
            display_mode,
        }
    }

    pub fn inline(expression: impl Into<String>) -> Self {
        Self::new(expression, false)
    }

    pub fn display(expression: impl Into<String>) -> Self {
        Self::new(expression, true)
    }
}

// The display flag is a JSON boolean. Strings such as "true" are rejected at
// decode time instead of being coerced.
impl From<(String, bool)> for RenderItem {
    fn from((expression, display_mode): (String, bool)) -> Self {
        Self {
            expression,
            display_mode,
        }
    }
}

impl From<RenderItem> for (String, bool) {
    fn from(item: RenderItem) -> Self {
        (item.expression, item.display_mode)
    }
}

/// Ordered batch of formulas. Results are returned in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderRequest {
    pub items: Vec<RenderItem>,
}

impl RenderRequest {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<RenderItem> for RenderRequest {
    fn from_iter<I: IntoIterator<Item = RenderItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Outcome for a single [`RenderItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Rendered markup, or the escaped fallback wrapper when rendering failed.
    pub render: String,
    /// Empty on success, otherwise the renderer's diagnostic.
    pub error: String,
}

impl RenderResult {
    pub fn rendered(markup: String) -> Self {
        Self {
            render: markup,
            error: String::new(),
        }
    }

    pub fn failed(fallback: String, diagnostic: String) -> Self {
        Self {
            render: fallback,
            error: diagnostic,
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Failure reported by a [`MathRenderer`] for one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{message}")]
    Katex { message: String },
    #[error("failed to build KaTeX options: {message}")]
    Options { message: String },
}

impl RenderError {
    pub fn katex(message: impl Into<String>) -> Self {
        Self::Katex {
            message: message.into(),
        }
    }

    /// Diagnostic text surfaced in [`RenderResult::error`].
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

/// Math typesetting capability. Implementations must be deterministic: the
/// same expression and mode yield the same markup or the same error.
pub trait MathRenderer: Send + Sync {
    fn render(&self, expression: &str, display_mode: bool) -> Result<String, RenderError>;
}

impl<R: MathRenderer + ?Sized> MathRenderer for &R {
    fn render(&self, expression: &str, display_mode: bool) -> Result<String, RenderError> {
        (**self).render(expression, display_mode)
    }
}
