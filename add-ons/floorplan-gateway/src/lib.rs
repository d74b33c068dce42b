//! HTTP delivery surface: multipart floorplan upload in, rendered image out.
//!
//! `POST /generate` takes `file` (the floorplan) and `style_number` ("1".."8",
//! or "custom" with a `custom_style` text field). Success streams the rendered
//! bytes straight back in the response body; no shared output path exists, so
//! concurrent requests cannot race on a file. Failures map the error taxonomy
//! to 400 (bad style or unreadable upload) or 500 (upstream/no-image) with a
//! JSON `{"error": ...}` body.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use floorplan_core::{FloorplanImage, RenderError, RenderPipeline, StyleChoice};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Floorplan uploads above this size are rejected by the body limit layer.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared per-process state: the pipeline with its injected gateway.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: RenderPipeline,
}

/// Build the router. CORS allows the configured origins with credentials.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/generate", post(generate))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "floorplan-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Upload a floorplan and a style selection, receive the rendered interior.
async fn generate(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let fields = match collect_fields(&mut multipart).await {
        Ok(fields) => fields,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
    };

    // Strict style policy on the HTTP surface: a bad key is rejected, never
    // silently replaced.
    let style = match StyleChoice::from_request(&fields.style_number, fields.custom_style.as_deref())
    {
        Ok(style) => style,
        Err(err) => return error_response(&err),
    };

    let image = match FloorplanImage::from_bytes(fields.file) {
        Ok(image) => image,
        Err(err) => return error_response(&err),
    };

    match state.pipeline.run(&style, &image).await {
        Ok(outcome) => (
            [(header::CONTENT_TYPE, outcome.image.mime_type)],
            outcome.image.data,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "render pipeline failed");
            error_response(&err)
        }
    }
}

struct GenerateFields {
    file: Vec<u8>,
    style_number: String,
    custom_style: Option<String>,
}

async fn collect_fields(multipart: &mut Multipart) -> Result<GenerateFields, String> {
    let mut file: Option<Vec<u8>> = None;
    let mut style_number: Option<String> = None;
    let mut custom_style: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(format!("Malformed multipart request: {err}")),
        };
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| format!("Failed to read uploaded file: {err}"))?;
                file = Some(bytes.to_vec());
            }
            "style_number" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| format!("Failed to read style_number: {err}"))?;
                style_number = Some(text.trim().to_string());
            }
            "custom_style" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| format!("Failed to read custom_style: {err}"))?;
                custom_style = Some(text);
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    Ok(GenerateFields {
        file: file.ok_or("Missing required field: file")?,
        style_number: style_number.ok_or("Missing required field: style_number")?,
        custom_style,
    })
}

/// Map the error taxonomy to a status code and the JSON error body.
fn error_response(err: &RenderError) -> Response {
    let (status, message) = match err {
        RenderError::InvalidStyle(_) => (StatusCode::BAD_REQUEST, "Invalid style selection"),
        RenderError::BadImage(_) => (
            StatusCode::BAD_REQUEST,
            "Could not read the uploaded floorplan image",
        ),
        RenderError::Configuration(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error",
        ),
        RenderError::Upstream { .. } | RenderError::NoImageProduced => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Image generation failed",
        ),
    };
    (status, Json(json!({ "error": message }))).into_response()
}
