//! Segment model
//!
//! A segment is one weighted option on the wheel. Its position in the
//! segment list is its angular slot.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a segment shows besides its color
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SegmentVisual {
    #[default]
    None,
    /// Named icon from the UI's icon set
    Icon { name: String },
    /// Image data URL or reference, opaque to the core
    Image { source: String },
}

impl SegmentVisual {
    pub fn is_none(&self) -> bool {
        matches!(self, SegmentVisual::None)
    }
}

fn default_weight() -> f64 {
    1.0
}

/// A weighted option on the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Unique within a wheel, never reused
    pub id: String,
    pub label: String,
    /// Background color (hex RGB)
    pub color: String,
    /// Relative selection weight (> 0 to take part in a draw)
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Shown after the segment wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "SegmentVisual::is_none")]
    pub visual: SegmentVisual,
    /// Overrides the wheel's label color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl Segment {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: color.into(),
            weight,
            description: None,
            visual: SegmentVisual::None,
            text_color: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visual(mut self, visual: SegmentVisual) -> Self {
        self.visual = visual;
        self
    }

    /// True iff id, label and color are set and weight is finite and positive
    pub fn validate(&self) -> bool {
        !self.id.is_empty()
            && !self.label.is_empty()
            && !self.color.is_empty()
            && self.weight.is_finite()
            && self.weight > 0.0
    }
}

/// Named color palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Palette {
    #[default]
    Vibrant,
    Pastel,
    Ocean,
    Sunset,
    Forest,
    Monochrome,
}

impl Palette {
    pub const ALL: [Palette; 6] = [
        Palette::Vibrant,
        Palette::Pastel,
        Palette::Ocean,
        Palette::Sunset,
        Palette::Forest,
        Palette::Monochrome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::Vibrant => "Vibrant",
            Palette::Pastel => "Pastel",
            Palette::Ocean => "Ocean",
            Palette::Sunset => "Sunset",
            Palette::Forest => "Forest",
            Palette::Monochrome => "Monochrome",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vibrant" => Some(Palette::Vibrant),
            "pastel" => Some(Palette::Pastel),
            "ocean" => Some(Palette::Ocean),
            "sunset" => Some(Palette::Sunset),
            "forest" => Some(Palette::Forest),
            "monochrome" | "mono" => Some(Palette::Monochrome),
            _ => None,
        }
    }

    pub fn colors(&self) -> &'static [&'static str; 8] {
        match self {
            Palette::Vibrant => &[
                "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8",
                "#F7DC6F",
            ],
            Palette::Pastel => &[
                "#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF", "#E0BBE4", "#957DAD",
                "#D4A5A5",
            ],
            Palette::Ocean => &[
                "#1A535C", "#4ECDC4", "#F7FFF7", "#FFE66D", "#FF6B6B", "#2EC4B6", "#011627",
                "#FDFFFC",
            ],
            Palette::Sunset => &[
                "#F72585", "#B5179E", "#7209B7", "#560BAD", "#480CA8", "#3A0CA3", "#3F37C9",
                "#4361EE",
            ],
            Palette::Forest => &[
                "#2D5A27", "#4A7C59", "#82B366", "#A9D08E", "#C5E0B4", "#E2EFD9", "#F0F7EC",
                "#B7D7A8",
            ],
            Palette::Monochrome => &[
                "#1F2937", "#374151", "#4B5563", "#6B7280", "#9CA3AF", "#D1D5DB", "#E5E7EB",
                "#F3F4F6",
            ],
        }
    }
}

/// Uniform pick over every palette color (duplicates across palettes included)
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let all: Vec<&str> = Palette::ALL
        .iter()
        .flat_map(|p| p.colors().iter().copied())
        .collect();
    all[rng.random_range(0..all.len())].to_string()
}

/// First default-palette color not in `used`; random once the palette runs out.
pub fn next_color<S: AsRef<str>, R: Rng + ?Sized>(used: &[S], rng: &mut R) -> String {
    Palette::default()
        .colors()
        .iter()
        .find(|c| !used.iter().any(|u| u.as_ref().eq_ignore_ascii_case(c)))
        .map(|c| c.to_string())
        .unwrap_or_else(|| random_color(rng))
}

/// Fresh random id drawn from `rng`
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.random())
        .into_uuid()
        .to_string()
}

/// New segment appended after `existing`: fresh id, positional label,
/// next free palette color, weight 1.
pub fn create_default<R: Rng + ?Sized>(existing: &[Segment], rng: &mut R) -> Segment {
    let mut id = new_id(rng);
    while existing.iter().any(|s| s.id == id) {
        id = new_id(rng);
    }
    let used: Vec<&str> = existing.iter().map(|s| s.color.as_str()).collect();
    let color = next_color(&used, rng);
    Segment::new(id, format!("Option {}", existing.len() + 1), color, 1.0)
}
