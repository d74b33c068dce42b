//! Error taxonomy for the render pipeline.
//!
//! Every failure a delivery surface can see is one of these variants. The
//! orchestrator converts failures into structured errors at its boundary and
//! never persists partial state.

use thiserror::Error;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while turning a floorplan into an interior render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Missing or unusable process configuration (e.g. no API credential).
    /// Fatal: surfaced before any network call is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Style key not in the catalog. Client error under the strict policy.
    #[error("invalid style selection: {0:?}")]
    InvalidStyle(String),

    /// Uploaded payload is not a readable raster image.
    #[error("unreadable floorplan image: {0}")]
    BadImage(String),

    /// Transport, auth, or quota failure from either model call.
    #[error("upstream model error (status {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// The generation model responded but produced no image part.
    #[error("model response contained no image part")]
    NoImageProduced,
}

impl RenderError {
    /// True when the failure is likely transient and worth a bounded retry:
    /// transport errors (no status) and 429/5xx responses qualify.
    pub fn is_transient(&self) -> bool {
        match self {
            RenderError::Upstream { status: None, .. } => true,
            RenderError::Upstream {
                status: Some(code), ..
            } => *code == 429 || (500..=599).contains(code),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        RenderError::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
