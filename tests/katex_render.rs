use std::collections::BTreeMap;

use parsemath::application::render::{
    BatchRenderer, FallbackStyle, KatexOptions, KatexRenderer, MathRenderer, OutputFormat,
    RenderItem, RenderRequest, render_batch,
};

fn request(items: &[(&str, bool)]) -> RenderRequest {
    items
        .iter()
        .map(|(expression, display)| RenderItem::new(*expression, *display))
        .collect()
}

#[test]
fn inline_expression_renders_katex_markup() {
    let results = render_batch(KatexRenderer::default(), &request(&[("a^2 + b^2", false)]));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].error, "");
    assert!(results[0].render.contains("class=\"katex\""));
    assert!(!results[0].render.contains("katex-error"));
    assert!(!results[0].render.contains("katex-display"));
}

#[test]
fn display_expression_renders_block_markup() {
    let results = render_batch(KatexRenderer::default(), &request(&[("\\sum_i x_i", true)]));

    assert_eq!(results[0].error, "");
    assert!(results[0].render.contains("katex-display"));
}

#[test]
fn unbalanced_braces_fall_back_to_block_wrapper() {
    let results = render_batch(KatexRenderer::default(), &request(&[("\\frac{1", true)]));
    let result = &results[0];

    assert!(!result.error.is_empty());
    assert!(result.error.contains("KaTeX parse error"));
    assert!(result.render.starts_with("<div class=\"katex-error\""));
    assert!(result.render.contains(">\\frac{1</div>"));
}

#[test]
fn unbalanced_braces_fall_back_to_inline_wrapper() {
    let results = render_batch(KatexRenderer::default(), &request(&[("\\frac{1", false)]));
    let result = &results[0];

    assert!(!result.error.is_empty());
    assert!(result.render.starts_with("<span class=\"katex-error\""));
    assert!(result.render.contains(">\\frac{1</span>"));
}

#[test]
fn mixed_batch_keeps_order_and_isolates_failures() {
    let req = request(&[
        ("x", false),
        ("\\frac{1", true),
        ("\\alpha", false),
        ("\\notacommand{", false),
        ("x", false),
    ]);
    let results = render_batch(KatexRenderer::default(), &req);

    assert_eq!(results.len(), req.len());
    assert!(!results[0].is_error());
    assert!(results[1].is_error());
    assert!(!results[2].is_error());
    assert!(results[3].is_error());
    assert_eq!(results[0].render, results[4].render);
}

#[test]
fn mathml_output_omits_html_tree() {
    let renderer = KatexRenderer::new(KatexOptions {
        output: OutputFormat::Mathml,
        ..KatexOptions::default()
    });
    let markup = renderer.render("x", false).expect("render");

    assert!(markup.contains("<math"));
    assert!(!markup.contains("katex-html"));
}

#[test]
fn configured_macros_expand() {
    let mut macros = BTreeMap::new();
    macros.insert("\\RR".to_string(), "\\mathbb{R}".to_string());
    // HTML only: the MathML annotation would echo the unexpanded source.
    let renderer = KatexRenderer::new(KatexOptions {
        output: OutputFormat::Html,
        trust: false,
        macros,
    });

    let with_macro = renderer.render("\\RR", false).expect("macro render");
    let expanded = renderer.render("\\mathbb{R}", false).expect("plain render");
    assert_eq!(with_macro, expanded);
}

#[test]
fn fallback_style_is_configurable() {
    let batch = BatchRenderer::new(KatexRenderer::default(), FallbackStyle::new("#cc0000"));
    let result = batch.render_item(&RenderItem::inline("\\frac{1"));

    assert!(result.render.contains("style=\"color:#cc0000\""));
}

#[test]
fn fallback_echoes_expression_with_spaces_and_operators() {
    let expression = "x = \\frac{1 + 2";
    let results = render_batch(KatexRenderer::default(), &request(&[(expression, true)]));
    let result = &results[0];

    assert!(result.is_error());
    assert!(result.render.starts_with("<div class=\"katex-error\""));
    assert!(result.render.contains(expression));
    assert_eq!(
        result.error,
        "KaTeX parse error: Unexpected end of input in a macro argument, expected '}' at end of input: x = \\frac{1 + 2"
    );
}

#[test]
fn unbalanced_fraction_reports_exact_katex_message() {
    let results = render_batch(KatexRenderer::default(), &request(&[("\\frac{1", false)]));

    assert_eq!(
        results[0].error,
        "KaTeX parse error: Unexpected end of input in a macro argument, expected '}' at end of input: \\frac{1"
    );
}
