mod fallback;
mod math;

use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::application::render::types::{MathRenderer, RenderError};
use crate::config::RenderSettings;

pub use fallback::{DEFAULT_ERROR_COLOR, FallbackStyle, fallback_markup};

/// Markup flavour requested from KaTeX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Html,
    Mathml,
    /// KaTeX's own default: visual HTML plus hidden MathML for accessibility.
    #[default]
    HtmlAndMathml,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Mathml => "mathml",
            OutputFormat::HtmlAndMathml => "html_and_mathml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "html" => Ok(OutputFormat::Html),
            "mathml" => Ok(OutputFormat::Mathml),
            "html_and_mathml" | "htmlandmathml" => Ok(OutputFormat::HtmlAndMathml),
            other => Err(format!(
                "unknown output format `{other}`, expected html, mathml or html_and_mathml"
            )),
        }
    }
}

/// Options applied to every KaTeX invocation in a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KatexOptions {
    pub output: OutputFormat,
    /// Allow `\href`, `\includegraphics` and other commands KaTeX gates behind `trust`.
    pub trust: bool,
    pub macros: BTreeMap<String, String>,
}

impl From<&RenderSettings> for KatexOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            output: settings.output,
            trust: settings.trust,
            macros: settings.macros.clone(),
        }
    }
}

/// KaTeX-backed [`MathRenderer`].
#[derive(Debug, Clone, Default)]
pub struct KatexRenderer {
    options: KatexOptions,
}

impl KatexRenderer {
    pub fn new(options: KatexOptions) -> Self {
        Self { options }
    }
}

impl MathRenderer for KatexRenderer {
    fn render(&self, expression: &str, display_mode: bool) -> Result<String, RenderError> {
        math::render_math_html(expression, display_mode, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_common_spellings() {
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("MathML".parse::<OutputFormat>(), Ok(OutputFormat::Mathml));
        assert_eq!(
            "html-and-mathml".parse::<OutputFormat>(),
            Ok(OutputFormat::HtmlAndMathml)
        );
        assert!("svg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn default_output_matches_katex_default() {
        assert_eq!(KatexOptions::default().output, OutputFormat::HtmlAndMathml);
    }
}
