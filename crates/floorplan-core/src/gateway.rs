//! Model gateway seam.
//!
//! The pipeline talks to the remote models through this trait so delivery
//! surfaces inject one explicitly constructed gateway at startup and tests
//! substitute a stub. No module-level client state.

use crate::error::RenderResult;
use crate::image::{FloorplanImage, RenderedImage};
use async_trait::async_trait;

/// Two operations, one remote round trip each: spatial analysis of a
/// floorplan, and photorealistic rendering steered by a prompt.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the analysis prompt plus the floorplan to the vision model and
    /// return its text output verbatim.
    async fn analyze(&self, prompt: &str, image: &FloorplanImage) -> RenderResult<String>;

    /// Send the render prompt plus the original floorplan to the generation
    /// model and return the first image part of the response.
    async fn render(&self, prompt: &str, image: &FloorplanImage) -> RenderResult<RenderedImage>;
}
