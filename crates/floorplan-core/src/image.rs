//! Image payloads: the uploaded floorplan and the rendered result.
//!
//! Validation is magic-byte sniffing only. The models consume the raster
//! directly, so there is no reason to fully decode pixels here; rejecting
//! non-image payloads early is what matters.

use crate::error::{RenderError, RenderResult};

/// An uploaded floorplan: owned bytes plus the sniffed mime type.
/// Never mutated, only read and forwarded to the models.
#[derive(Debug, Clone)]
pub struct FloorplanImage {
    data: Vec<u8>,
    mime_type: &'static str,
}

impl FloorplanImage {
    /// Validate and wrap an uploaded payload. Anything that is not a PNG,
    /// JPEG, or WebP raster fails with `BadImage`.
    pub fn from_bytes(data: Vec<u8>) -> RenderResult<FloorplanImage> {
        let mime_type = sniff_mime(&data).ok_or_else(|| {
            RenderError::BadImage("payload is not a PNG, JPEG, or WebP image".into())
        })?;
        Ok(FloorplanImage { data, mime_type })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

/// The generation model's output: raw bytes plus its reported mime type.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    None
}

/// Minimal PNG header plus padding so the length check passes.
#[cfg(test)]
pub(crate) fn png_fixture() -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0u8; 16]);
    data
}
