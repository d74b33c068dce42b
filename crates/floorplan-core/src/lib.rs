//! floorplan-core: the orchestration layer that turns an architectural
//! floorplan image plus a style selection into a photorealistic interior
//! render, by way of two remote Gemini calls (vision analysis, then image
//! generation).
//!
//! Delivery surfaces (the axum gateway and the interactive CLI) construct one
//! `GeminiGateway` at startup from `GatewayConfig` and hand it to a
//! `RenderPipeline`; everything else in here is pure.

mod config;
mod error;
mod gateway;
mod gemini;
mod image;
mod pipeline;
mod styles;
pub mod prompts;

pub use config::GatewayConfig;
pub use error::{RenderError, RenderResult};
pub use gateway::ModelGateway;
pub use gemini::GeminiGateway;
pub use image::{FloorplanImage, RenderedImage};
pub use pipeline::{RenderOutcome, RenderPipeline};
pub use styles::{InteriorStyle, StyleChoice, DEFAULT_STYLE};
