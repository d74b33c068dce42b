//! Interactive terminal surface: pick a style, render `blueprint.png` from the
//! working directory, write `render.png`.
//!
//! Unlike the HTTP gateway, an unknown style pick falls back to the default
//! with a warning instead of aborting (the lenient resolution policy). The
//! output file is written only after a successful render, so a failed run
//! never leaves a partial file behind.

use floorplan_core::{
    FloorplanImage, GatewayConfig, GeminiGateway, InteriorStyle, RenderPipeline, StyleChoice,
};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const INPUT_FILE: &str = "blueprint.png";
const OUTPUT_FILE: &str = "render.png";

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[floorplan-cli] .env not loaded: {e} (using system environment)");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Credential check happens before the style prompt: a missing key should
    // not cost the user a menu walk first.
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let style = prompt_for_style(&mut lines);
    println!("\nSelected: {}\n", style.style_text());

    let blueprint = match std::fs::read(INPUT_FILE) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("❌ Cannot read {INPUT_FILE}: {e}");
            std::process::exit(1);
        }
    };
    let image = match FloorplanImage::from_bytes(blueprint) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let gateway = match GeminiGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let pipeline = RenderPipeline::new(Arc::new(gateway));

    println!("Analyzing floorplan...");
    let outcome = match pipeline.run(&style, &image).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("❌ Render failed: {e}");
            std::process::exit(1);
        }
    };

    println!("\n--- SPATIAL ANALYSIS ---\n{}\n------------------------\n", outcome.analysis);

    if let Err(e) = std::fs::write(OUTPUT_FILE, &outcome.image.data) {
        eprintln!("❌ Cannot write {OUTPUT_FILE}: {e}");
        std::process::exit(1);
    }
    println!("Saved {OUTPUT_FILE} ({} bytes)", outcome.image.data.len());
}

/// Show the menu and resolve the pick. Built-ins use the lenient policy;
/// option 9 asks for a free-text style description.
fn prompt_for_style<B: BufRead>(lines: &mut std::io::Lines<B>) -> StyleChoice {
    println!("Choose an interior style:");
    for style in InteriorStyle::ALL {
        println!("  {}) {} — {}", style.key(), style.name(), style.descriptors());
    }
    println!("  9) Custom (describe your own)");
    print!("Style number: ");
    let _ = std::io::stdout().flush();

    let pick = read_line(lines);
    if pick == "9" {
        print!("Describe the style: ");
        let _ = std::io::stdout().flush();
        let text = read_line(lines);
        if !text.is_empty() {
            return StyleChoice::Custom(text);
        }
        eprintln!("Empty description, falling back to the default style.");
    }
    StyleChoice::resolve_or_default(&pick)
}

fn read_line<B: BufRead>(lines: &mut std::io::Lines<B>) -> String {
    lines
        .next()
        .and_then(|line| line.ok())
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(input: &str) -> StyleChoice {
        let mut lines = std::io::Cursor::new(input.to_string()).lines();
        prompt_for_style(&mut lines)
    }

    #[test]
    fn numeric_pick_resolves_builtin() {
        assert_eq!(
            pick("3\n"),
            StyleChoice::Standard(InteriorStyle::IndustrialLoft)
        );
    }

    #[test]
    fn unknown_pick_falls_back_to_default() {
        assert_eq!(
            pick("42\n"),
            StyleChoice::Standard(floorplan_core::DEFAULT_STYLE)
        );
    }

    #[test]
    fn option_nine_reads_custom_text() {
        assert_eq!(
            pick("9\nmoody gothic library\n"),
            StyleChoice::Custom("moody gothic library".to_string())
        );
    }

    #[test]
    fn empty_custom_text_falls_back_to_default() {
        assert_eq!(
            pick("9\n\n"),
            StyleChoice::Standard(floorplan_core::DEFAULT_STYLE)
        );
    }
}
