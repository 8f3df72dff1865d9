//! Batch KaTeX rendering.
//!
//! [`application::render`] holds the pure batch transform, [`infra`] the
//! stream adapter and telemetry bootstrap, and [`config`] the layered settings
//! used by the `parsemath` binary.

pub mod application;
pub mod config;
pub mod infra;

pub use application::render::{
    BatchRenderer, KatexRenderer, MathRenderer, RenderError, RenderItem, RenderRequest,
    RenderResult, render_batch,
};
