//! Gateway configuration loaded from the environment.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | GEMINI_API_KEY | required | model-access credential; absence fails fast |
//! | FLOORPLAN_ANALYSIS_MODEL | gemini-2.5-flash | vision model for spatial analysis |
//! | FLOORPLAN_IMAGE_MODEL | gemini-3-pro-image-preview | image-generation model |
//! | FLOORPLAN_ALLOWED_ORIGINS | localhost:3000 dev origins | comma-separated CORS allow-list |
//! | FLOORPLAN_BIND_ADDR | 127.0.0.1:8000 | HTTP bind address |
//! | FLOORPLAN_REQUEST_TIMEOUT_SECS | 120 | per-call upstream timeout |
//! | FLOORPLAN_RETRY_ATTEMPTS | 2 | extra attempts for transient upstream failures |

use crate::error::{RenderError, RenderResult};

const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Process configuration for the render service.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub analysis_model: String,
    pub image_model: String,
    pub allowed_origins: Vec<String>,
    pub bind_addr: String,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
}

impl GatewayConfig {
    /// Load configuration from environment. The credential is validated here,
    /// before any network call is attempted; everything else has defaults.
    pub fn from_env() -> RenderResult<Self> {
        let api_key = validate_api_key(std::env::var("GEMINI_API_KEY").ok())?;
        Ok(GatewayConfig {
            api_key,
            analysis_model: env_string("FLOORPLAN_ANALYSIS_MODEL", DEFAULT_ANALYSIS_MODEL),
            image_model: env_string("FLOORPLAN_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            allowed_origins: parse_origins(
                std::env::var("FLOORPLAN_ALLOWED_ORIGINS").ok().as_deref(),
            ),
            bind_addr: env_string("FLOORPLAN_BIND_ADDR", DEFAULT_BIND_ADDR),
            request_timeout_secs: env_u64(
                "FLOORPLAN_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            retry_attempts: env_u32("FLOORPLAN_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS),
        })
    }
}

/// The credential must be present and non-blank.
fn validate_api_key(value: Option<String>) -> RenderResult<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(RenderError::Configuration(
            "GEMINI_API_KEY not set; the render service cannot reach the models".into(),
        )),
    }
}

/// Comma-separated allow-list; unset falls back to the localhost dev origins.
fn parse_origins(value: Option<&str>) -> Vec<String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ],
    }
}

fn env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(v) => v.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    match std::env::var(name) {
        Ok(v) => v.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_credential_is_a_configuration_error() {
        assert!(matches!(
            validate_api_key(None),
            Err(RenderError::Configuration(_))
        ));
        assert!(matches!(
            validate_api_key(Some("   ".into())),
            Err(RenderError::Configuration(_))
        ));
        assert_eq!(
            validate_api_key(Some(" key-123 ".into())).unwrap(),
            "key-123"
        );
    }

    #[test]
    fn origin_list_parses_and_defaults() {
        assert_eq!(
            parse_origins(Some("https://a.example, https://b.example")),
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            parse_origins(None),
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(
            parse_origins(Some("  ")),
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
    }
}
