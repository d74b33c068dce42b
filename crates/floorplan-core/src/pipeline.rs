//! Request orchestrator: the two-stage analyze-then-render sequence.
//!
//! Per request: validate the payload, ask the vision model for a spatial
//! analysis, fold the analysis and style text into the render prompt, ask the
//! generation model for the image. Strictly sequential; the second call
//! depends on the first's output. No state is shared between runs.

use crate::error::RenderResult;
use crate::gateway::ModelGateway;
use crate::image::{FloorplanImage, RenderedImage};
use crate::prompts;
use crate::styles::StyleChoice;
use std::sync::Arc;

/// Result of one pipeline run. The analysis text rides along so the CLI can
/// show it; it is not persisted anywhere.
#[derive(Debug)]
pub struct RenderOutcome {
    pub analysis: String,
    pub image: RenderedImage,
}

/// The orchestrator. Holds the injected gateway, nothing else.
#[derive(Clone)]
pub struct RenderPipeline {
    gateway: Arc<dyn ModelGateway>,
}

impl RenderPipeline {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        RenderPipeline { gateway }
    }

    /// Run the full sequence for one resolved style and validated floorplan.
    /// Any failure surfaces as a `RenderError`; nothing partial is kept.
    pub async fn run(
        &self,
        style: &StyleChoice,
        image: &FloorplanImage,
    ) -> RenderResult<RenderOutcome> {
        tracing::info!(mime = image.mime_type(), "starting floorplan analysis");
        let analysis = self.gateway.analyze(prompts::ANALYSIS_PROMPT, image).await?;
        tracing::info!(chars = analysis.len(), "spatial analysis complete");

        let prompt = prompts::render_prompt(&analysis, &style.style_text());
        tracing::info!("requesting interior render");
        let rendered = self.gateway.render(&prompt, image).await?;
        tracing::info!(
            bytes = rendered.data.len(),
            mime = %rendered.mime_type,
            "render complete"
        );

        Ok(RenderOutcome {
            analysis,
            image: rendered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::styles::InteriorStyle;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Gateway stub: canned analysis, optional canned image, records the
    /// render prompt it was handed.
    struct StubGateway {
        analysis: String,
        rendered: Option<Vec<u8>>,
        seen_render_prompt: Mutex<Option<String>>,
    }

    impl StubGateway {
        fn new(analysis: &str, rendered: Option<Vec<u8>>) -> Self {
            StubGateway {
                analysis: analysis.to_string(),
                rendered,
                seen_render_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ModelGateway for StubGateway {
        async fn analyze(&self, _prompt: &str, _image: &FloorplanImage) -> RenderResult<String> {
            Ok(self.analysis.clone())
        }

        async fn render(
            &self,
            prompt: &str,
            _image: &FloorplanImage,
        ) -> RenderResult<RenderedImage> {
            *self.seen_render_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.rendered {
                Some(data) => Ok(RenderedImage {
                    data: data.clone(),
                    mime_type: "image/png".to_string(),
                }),
                None => Err(RenderError::NoImageProduced),
            }
        }
    }

    fn floorplan() -> FloorplanImage {
        FloorplanImage::from_bytes(crate::image::png_fixture()).unwrap()
    }

    #[tokio::test]
    async fn pipeline_feeds_analysis_and_style_into_the_render_prompt() {
        let gateway = Arc::new(StubGateway::new(
            "Kitchen is walled off; NOT open concept.",
            Some(vec![1, 2, 3]),
        ));
        let pipeline = RenderPipeline::new(gateway.clone());
        let style = StyleChoice::Standard(InteriorStyle::IndustrialLoft);

        let outcome = pipeline.run(&style, &floorplan()).await.unwrap();
        assert_eq!(outcome.analysis, "Kitchen is walled off; NOT open concept.");
        assert_eq!(outcome.image.data, vec![1, 2, 3]);

        let prompt = gateway.seen_render_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Kitchen is walled off; NOT open concept."));
        assert!(prompt.contains("Industrial Loft"));
        assert!(prompt.contains("exposed brick"));
    }

    #[tokio::test]
    async fn no_image_part_surfaces_as_no_image_produced() {
        let gateway = Arc::new(StubGateway::new("some analysis", None));
        let pipeline = RenderPipeline::new(gateway);
        let style = StyleChoice::Custom("brutalist concrete den".to_string());

        let err = pipeline.run(&style, &floorplan()).await.unwrap_err();
        assert!(matches!(err, RenderError::NoImageProduced));
    }
}
