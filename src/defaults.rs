//! Built-in default wheel
//!
//! The default segment list is maintained separately and published as a
//! JSON array; `parse_default_segments` is the gate every published list
//! goes through before it reaches a wheel.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Result, WheelError};
use crate::settings::WheelConfig;
use crate::state::SavedWheel;
use crate::wheel::Segment;

/// Fixed id of the built-in saved wheel
pub const DEFAULT_WHEEL_ID: &str = "default-wheel";
pub const DEFAULT_WHEEL_NAME: &str = "Decision Wheel";

const DEFAULT_SEGMENTS: [(&str, &str, &str, &str); 10] = [
    ("1", "Pizza", "Split a large pie", "#3B82F6"),
    ("2", "Tacos", "Two each, extra salsa", "#06B6D4"),
    ("3", "Sushi", "Chef's choice platter", "#10B981"),
    ("4", "Burgers", "Fries are mandatory", "#F59E0B"),
    ("5", "Salad", "Build your own bowl", "#EF4444"),
    ("6", "Curry", "Medium heat, garlic naan", "#8B5CF6"),
    ("7", "Noodles", "Ramen or pho, winner picks", "#EC4899"),
    ("8", "Sandwiches", "Deli run", "#14B8A6"),
    ("9", "Leftovers", "Clear out the fridge", "#F97316"),
    ("10", "Chef's Surprise", "Whoever spun cooks", "#6366F1"),
];

/// The baked-in default segment set
pub fn default_segments() -> Vec<Segment> {
    DEFAULT_SEGMENTS
        .iter()
        .map(|(id, label, description, color)| {
            Segment::new(*id, *label, *color, 1.0).with_description(*description)
        })
        .collect()
}

fn default_wheel_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The built-in saved wheel, always offered in the wheel list
pub fn default_wheel() -> SavedWheel {
    let stamp = default_wheel_timestamp();
    SavedWheel {
        id: DEFAULT_WHEEL_ID.to_string(),
        name: DEFAULT_WHEEL_NAME.to_string(),
        segments: default_segments(),
        config: WheelConfig::default(),
        created_at: stamp,
        updated_at: stamp,
        thumbnail: None,
    }
}

/// Parse a published default segment list.
///
/// Entries that do not decode or fail `Segment::validate` are skipped with a
/// warning; a missing weight counts as 1. Fails only when the document is
/// not a JSON array.
pub fn parse_default_segments(json: &str) -> Result<Vec<Segment>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = values.len();

    let segments: Vec<Segment> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<Segment>(value) {
            Ok(segment) if segment.validate() => Some(segment),
            Ok(segment) => {
                log::warn!("Skipping invalid default segment {} ({:?})", i, segment.id);
                None
            }
            Err(e) => {
                log::warn!("Skipping undecodable default segment {}: {}", i, e);
                None
            }
        })
        .collect();

    log::info!("Parsed {} of {} default segments", segments.len(), total);
    Ok(segments)
}

/// Serialize a default segment list for publishing. Refuses lists with
/// segments that would be skipped on the way back in.
pub fn render_default_segments(segments: &[Segment]) -> Result<String> {
    if let Some(bad) = segments.iter().find(|s| !s.validate()) {
        return Err(WheelError::invalid_input(format!(
            "segment {:?} is not valid for publishing",
            bad.id
        )));
    }
    Ok(serde_json::to_string_pretty(segments)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::SegmentVisual;

    #[test]
    fn test_default_segments_are_valid_and_unique() {
        let segments = default_segments();
        assert_eq!(segments.len(), 10);
        assert!(segments.iter().all(|s| s.validate()));
        for (i, a) in segments.iter().enumerate() {
            assert!(segments[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_default_wheel() {
        let wheel = default_wheel();
        assert_eq!(wheel.id, DEFAULT_WHEEL_ID);
        assert_eq!(wheel.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(wheel.segments, default_segments());
    }

    #[test]
    fn test_parse_skips_invalid_entries() {
        let json = r##"[
            {"id": "1", "label": "One", "color": "#111111", "weight": 2},
            {"id": "2", "label": "Two", "color": "#222222"},
            {"id": "", "label": "No id", "color": "#333333"},
            {"id": "4", "label": "Zero", "color": "#444444", "weight": 0},
            {"label": "Missing id"},
            {"id": "6", "label": "Icon", "color": "#666666", "visual": {"kind": "icon", "name": "pizza"}}
        ]"##;
        let segments = parse_default_segments(json).unwrap();
        let ids: Vec<&str> = segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "6"]);
        assert_eq!(segments[0].weight, 2.0);
        assert_eq!(segments[1].weight, 1.0);
        assert_eq!(segments[2].visual, SegmentVisual::Icon { name: "pizza".into() });
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(parse_default_segments("{}"), Err(WheelError::Parse(_))));
        assert!(matches!(parse_default_segments("[{"), Err(WheelError::Parse(_))));
    }

    #[test]
    fn test_render_then_parse_is_lossless() {
        let segments = default_segments();
        let json = render_default_segments(&segments).unwrap();
        assert_eq!(parse_default_segments(&json).unwrap(), segments);

        let mut bad = segments.clone();
        bad[3].weight = 0.0;
        assert!(matches!(render_default_segments(&bad), Err(WheelError::InvalidInput(_))));
    }
}
