//! Batch math rendering.
//!
//! The pipeline is pure: it accepts an ordered list of TeX expressions, renders
//! each through a [`MathRenderer`], and returns one [`RenderResult`] per input.
//! Rendering failures never escape the batch; they become escaped fallback
//! markup plus the renderer's diagnostic. Reading and writing the JSON
//! documents happens in [`crate::infra::io`].

mod batch;
mod service;
mod types;

pub use batch::{BatchRenderer, render_batch};
pub use service::{
    DEFAULT_ERROR_COLOR, FallbackStyle, KatexOptions, KatexRenderer, OutputFormat, fallback_markup,
};
pub use types::{MathRenderer, RenderError, RenderItem, RenderRequest, RenderResult};
