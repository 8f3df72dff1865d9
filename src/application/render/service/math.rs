use katex::{OptsBuilder, OutputType};

use crate::application::render::types::RenderError;

use super::{KatexOptions, OutputFormat};

const ENGINE_ERROR_MARKER: &str = ": JavaScript ";

/// Render a KaTeX expression, returning block markup when `display_mode` is set.
pub(crate) fn render_math_html(
    literal: &str,
    display_mode: bool,
    options: &KatexOptions,
) -> Result<String, RenderError> {
    let mut builder = OptsBuilder::default();
    builder.display_mode(display_mode);
    builder.output_type(output_type(options.output));
    builder.trust(options.trust);

    let mut opts = builder.build().map_err(|err| RenderError::Options {
        message: err.to_string(),
    })?;
    for (name, definition) in &options.macros {
        opts.add_macro(name.clone(), definition.clone());
    }

    katex::render_with_opts(literal, opts).map_err(|err| RenderError::katex(diagnostic(err)))
}

fn output_type(output: OutputFormat) -> OutputType {
    match output {
        OutputFormat::Html => OutputType::Html,
        OutputFormat::Mathml => OutputType::Mathml,
        OutputFormat::HtmlAndMathml => OutputType::HtmlAndMathml,
    }
}

// The JS engine appends ": JavaScript runtime error (ParseError)" to the
// exception text. Keep only the KaTeX message.
fn diagnostic(err: katex::Error) -> String {
    match err {
        katex::Error::JsExecError(message) => strip_engine_suffix(&message).to_owned(),
        other => other.to_string(),
    }
}

fn strip_engine_suffix(message: &str) -> &str {
    let Some(index) = message.rfind(ENGINE_ERROR_MARKER) else {
        return message;
    };
    let suffix = &message[index + ENGINE_ERROR_MARKER.len()..];
    if suffix.contains(" error (") && suffix.ends_with(')') {
        &message[..index]
    } else {
        message
    }
}
