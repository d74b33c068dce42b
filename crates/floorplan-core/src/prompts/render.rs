//! Render instruction template: interpolates the spatial analysis and the
//! resolved style text into the prompt sent to the image-generation model.

/// Template with `{analysis}` and `{style}` placeholders.
pub const RENDER_TEMPLATE: &str = r#"Based on this floorplan and spatial analysis, generate a photorealistic interior render.

SPATIAL ANALYSIS:
{analysis}

RENDER RULES:
- Follow wall positions from the analysis accurately
- Maintain room proportions
- No open concept unless the analysis confirms it
- Render the interior style exactly as defined below
- Camera: 3/4 perspective
- Ceiling height: 9 ft unless the analysis states otherwise

INTERIOR STYLE: {style}"#;

/// Build the render prompt. Deterministic: identical inputs produce
/// byte-identical output, and both inputs appear verbatim in the result.
pub fn render_prompt(analysis_text: &str, style_text: &str) -> String {
    RENDER_TEMPLATE
        .replace("{analysis}", analysis_text)
        .replace("{style}", style_text)
}
