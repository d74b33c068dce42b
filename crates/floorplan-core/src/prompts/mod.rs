//! Prompt templates for the two-stage floorplan render pipeline.

pub mod analysis;
pub mod render;

pub use analysis::ANALYSIS_PROMPT;
pub use render::{render_prompt, RENDER_TEMPLATE};
