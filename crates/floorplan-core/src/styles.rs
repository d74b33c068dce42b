//! Interior style catalog: 8 built-in styles plus a free-text custom option.
//!
//! The catalog is a closed enum checked exhaustively at compile time, not a
//! string-keyed map. Two lookup policies exist and both are explicit API:
//! `resolve_strict` (HTTP: unknown key is a client error) and
//! `resolve_or_default` (CLI: unknown pick warns and falls back).

use crate::error::{RenderError, RenderResult};

/// The eight built-in interior design styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorStyle {
    ScandinavianModern,
    MidCenturyModern,
    IndustrialLoft,
    MinimalistJapanese,
    ContemporaryLuxury,
    CoastalHamptons,
    ArtDeco,
    RusticFarmhouse,
}

/// Fallback for the lenient (CLI) resolution policy.
pub const DEFAULT_STYLE: InteriorStyle = InteriorStyle::ScandinavianModern;

impl InteriorStyle {
    /// All built-ins in menu order (keys "1" through "8").
    pub const ALL: [InteriorStyle; 8] = [
        InteriorStyle::ScandinavianModern,
        InteriorStyle::MidCenturyModern,
        InteriorStyle::IndustrialLoft,
        InteriorStyle::MinimalistJapanese,
        InteriorStyle::ContemporaryLuxury,
        InteriorStyle::CoastalHamptons,
        InteriorStyle::ArtDeco,
        InteriorStyle::RusticFarmhouse,
    ];

    /// Catalog key as presented to callers ("1".."8").
    pub fn key(&self) -> &'static str {
        match self {
            InteriorStyle::ScandinavianModern => "1",
            InteriorStyle::MidCenturyModern => "2",
            InteriorStyle::IndustrialLoft => "3",
            InteriorStyle::MinimalistJapanese => "4",
            InteriorStyle::ContemporaryLuxury => "5",
            InteriorStyle::CoastalHamptons => "6",
            InteriorStyle::ArtDeco => "7",
            InteriorStyle::RusticFarmhouse => "8",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            InteriorStyle::ScandinavianModern => "Scandinavian Modern",
            InteriorStyle::MidCenturyModern => "Mid-Century Modern",
            InteriorStyle::IndustrialLoft => "Industrial Loft",
            InteriorStyle::MinimalistJapanese => "Minimalist Japanese",
            InteriorStyle::ContemporaryLuxury => "Contemporary Luxury",
            InteriorStyle::CoastalHamptons => "Coastal/Hamptons",
            InteriorStyle::ArtDeco => "Art Deco",
            InteriorStyle::RusticFarmhouse => "Rustic Farmhouse",
        }
    }

    /// Design-attribute text used to steer generation.
    pub fn descriptors(&self) -> &'static str {
        match self {
            InteriorStyle::ScandinavianModern => {
                "clean lines, light wood, white walls, minimal decor, natural light"
            }
            InteriorStyle::MidCenturyModern => {
                "warm woods, organic shapes, vintage furniture, bold accent colors"
            }
            InteriorStyle::IndustrialLoft => {
                "exposed brick, metal fixtures, concrete floors, open ductwork"
            }
            InteriorStyle::MinimalistJapanese => {
                "tatami elements, shoji screens, natural materials, zen simplicity"
            }
            InteriorStyle::ContemporaryLuxury => {
                "high-end finishes, marble accents, designer furniture, dramatic lighting"
            }
            InteriorStyle::CoastalHamptons => {
                "white and blue palette, natural textures, airy and bright, beach-inspired"
            }
            InteriorStyle::ArtDeco => {
                "geometric patterns, rich colors, gold accents, glamorous details"
            }
            InteriorStyle::RusticFarmhouse => {
                "reclaimed wood, vintage fixtures, cozy textiles, warm neutrals"
            }
        }
    }

    /// Catalog lookup by key. `None` for anything outside "1".."8".
    pub fn from_key(key: &str) -> Option<InteriorStyle> {
        InteriorStyle::ALL.iter().copied().find(|s| s.key() == key)
    }
}

/// A resolved style selection: one of the 8 built-ins or free-text custom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleChoice {
    Standard(InteriorStyle),
    Custom(String),
}

impl StyleChoice {
    /// Strict resolution policy: unknown key fails with `InvalidStyle`.
    /// The HTTP surface uses this so a bad key is rejected, never substituted.
    pub fn resolve_strict(key: &str) -> RenderResult<StyleChoice> {
        InteriorStyle::from_key(key)
            .map(StyleChoice::Standard)
            .ok_or_else(|| RenderError::InvalidStyle(key.to_string()))
    }

    /// Lenient resolution policy: unknown key warns and falls back to the
    /// default style. The interactive CLI uses this.
    pub fn resolve_or_default(key: &str) -> StyleChoice {
        match InteriorStyle::from_key(key) {
            Some(style) => StyleChoice::Standard(style),
            None => {
                tracing::warn!(key, default = DEFAULT_STYLE.name(), "unknown style key, using default");
                StyleChoice::Standard(DEFAULT_STYLE)
            }
        }
    }

    /// Resolve an HTTP request pair: `style_number` plus optional custom text.
    /// `style_number = "custom"` selects the free-text option, which must be
    /// non-empty; everything else goes through the strict catalog lookup.
    pub fn from_request(style_number: &str, custom_text: Option<&str>) -> RenderResult<StyleChoice> {
        if style_number.eq_ignore_ascii_case("custom") {
            let text = custom_text.map(str::trim).unwrap_or_default();
            if text.is_empty() {
                return Err(RenderError::InvalidStyle("custom (empty description)".into()));
            }
            return Ok(StyleChoice::Custom(text.to_string()));
        }
        StyleChoice::resolve_strict(style_number)
    }

    /// Style text interpolated into the render prompt.
    pub fn style_text(&self) -> String {
        match self {
            StyleChoice::Standard(style) => {
                format!("{} style — {}", style.name(), style.descriptors())
            }
            StyleChoice::Custom(text) => text.clone(),
        }
    }
}
