use tracing::{debug, info, warn};

use super::service::{FallbackStyle, fallback_markup};
use super::types::{MathRenderer, RenderItem, RenderRequest, RenderResult};

/// Renders every item of a request, converting per-item failures into
/// fallback records. Output position `i` always describes input position `i`.
#[derive(Debug, Clone)]
pub struct BatchRenderer<R> {
    renderer: R,
    fallback: FallbackStyle,
}

impl<R: MathRenderer> BatchRenderer<R> {
    pub fn new(renderer: R, fallback: FallbackStyle) -> Self {
        Self { renderer, fallback }
    }

    pub fn render_batch(&self, request: &RenderRequest) -> Vec<RenderResult> {
        let results: Vec<RenderResult> = request
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| self.render_indexed(index, item))
            .collect();

        let failures = results.iter().filter(|result| result.is_error()).count();
        info!(
            target = "parsemath::render::batch",
            items = results.len(),
            failures,
            "Rendered batch"
        );

        results
    }

    pub fn render_item(&self, item: &RenderItem) -> RenderResult {
        match self.renderer.render(&item.expression, item.display_mode) {
            Ok(markup) => RenderResult::rendered(markup),
            Err(err) => {
                let diagnostic = err.diagnostic();
                let fallback = fallback_markup(
                    &item.expression,
                    item.display_mode,
                    &diagnostic,
                    &self.fallback,
                );
                RenderResult::failed(fallback, diagnostic)
            }
        }
    }

    fn render_indexed(&self, index: usize, item: &RenderItem) -> RenderResult {
        let result = self.render_item(item);
        if result.is_error() {
            warn!(
                target = "parsemath::render::batch",
                index,
                display = item.display_mode,
                error = %result.error,
                "Math rendering failed, using fallback markup"
            );
        } else {
            debug!(
                target = "parsemath::render::batch",
                index,
                display = item.display_mode,
                bytes = result.render.len(),
                "Rendered expression"
            );
        }
        result
    }
}

/// Render `request` with the default fallback style.
pub fn render_batch<R: MathRenderer>(renderer: R, request: &RenderRequest) -> Vec<RenderResult> {
    BatchRenderer::new(renderer, FallbackStyle::default()).render_batch(request)
}
