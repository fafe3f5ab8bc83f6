//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time and RNG seeding
//! - The JSON bridge the JS UI talks to (wasm-bindgen exports on web)
//!
//! The bridge functions are plain Rust so native tests cover them; the
//! wasm exports only convert errors into `JsValue`s.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::defaults::{parse_default_segments, render_default_segments};
use crate::error::Result;
use crate::settings::{AppSettings, WheelConfig};
use crate::wheel::{OddsAllocation, Segment, SpinPlan};

/// Current wall-clock time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Seed for the runtime RNG, taken from the clock
#[cfg(target_arch = "wasm32")]
pub fn seed_from_clock() -> u64 {
    // Sub-millisecond digits vary between page loads
    (js_sys::Date::now() * 1000.0) as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// Seed for the runtime RNG, taken from the clock
#[cfg(not(target_arch = "wasm32"))]
pub fn seed_from_clock() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// RNG for interactive use; tests seed their own
pub fn runtime_rng() -> Pcg32 {
    let seed = seed_from_clock();
    log::debug!("Runtime RNG seeded with {}", seed);
    Pcg32::seed_from_u64(seed)
}

// === JSON bridge ===

/// Plan a weighted spin from JSON segments, config and settings
pub fn plan_spin_json(
    segments_json: &str,
    config_json: &str,
    settings_json: &str,
    current_rotation: f32,
    rng: &mut Pcg32,
) -> Result<String> {
    let segments: Vec<Segment> = serde_json::from_str(segments_json)?;
    let config: WheelConfig = serde_json::from_str(config_json)?;
    let settings: AppSettings = serde_json::from_str(settings_json)?;
    let plan = SpinPlan::random(&segments, &config, &settings, current_rotation, rng)?;
    Ok(serde_json::to_string(&plan)?)
}

/// Fresh odds allocation for the editor
pub fn odds_open_json(segments_json: &str) -> Result<String> {
    let segments: Vec<Segment> = serde_json::from_str(segments_json)?;
    Ok(serde_json::to_string(&OddsAllocation::initialize(&segments))?)
}

/// Apply one slider edit to an allocation
pub fn odds_set_json(allocation_json: &str, id: &str, value: i32) -> Result<String> {
    let mut allocation: OddsAllocation = serde_json::from_str(allocation_json)?;
    allocation.set_percentage(id, value)?;
    Ok(serde_json::to_string(&allocation)?)
}

/// Flip one lock
pub fn odds_toggle_lock_json(allocation_json: &str, id: &str) -> Result<String> {
    let mut allocation: OddsAllocation = serde_json::from_str(allocation_json)?;
    allocation.toggle_lock(id)?;
    Ok(serde_json::to_string(&allocation)?)
}

/// Turn a finished allocation back into segments
pub fn odds_commit_json(allocation_json: &str, segments_json: &str) -> Result<String> {
    let allocation: OddsAllocation = serde_json::from_str(allocation_json)?;
    let segments: Vec<Segment> = serde_json::from_str(segments_json)?;
    Ok(serde_json::to_string(&allocation.commit(&segments)?)?)
}

/// Clean up a default list before it is published
pub fn normalize_default_list_json(json: &str) -> Result<String> {
    render_default_segments(&parse_default_segments(json)?)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use glam::Vec2;
    use wasm_bindgen::prelude::*;

    use super::*;
    use crate::error::WheelError;
    use crate::wheel;

    fn js_err(e: WheelError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    thread_local! {
        static RNG: std::cell::RefCell<Pcg32> = std::cell::RefCell::new(runtime_rng());
    }

    #[wasm_bindgen(js_name = drawIndex)]
    pub fn draw_index(weights: &[f64]) -> std::result::Result<u32, JsValue> {
        RNG.with(|rng| wheel::draw(weights, &mut *rng.borrow_mut()))
            .map(|i| i as u32)
            .map_err(js_err)
    }

    #[wasm_bindgen(js_name = hitTest)]
    pub fn hit_test(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation: f32,
        segment_count: u32,
        pointer_angle: f32,
    ) -> Option<u32> {
        wheel::hit_test(
            Vec2::new(x, y),
            Vec2::new(width, height),
            rotation,
            segment_count as usize,
            pointer_angle,
        )
        .map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = indexAtRotation)]
    pub fn index_at_rotation(rotation: f32, segment_count: u32) -> Option<u32> {
        wheel::index_at_rotation(rotation, segment_count as usize).map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = targetRotation)]
    pub fn target_rotation(
        index: u32,
        segment_count: u32,
        current_rotation: f32,
        extra_turns: u32,
    ) -> std::result::Result<f32, JsValue> {
        wheel::target_rotation_for_index(
            index as usize,
            segment_count as usize,
            current_rotation,
            extra_turns,
        )
        .map_err(js_err)
    }

    #[wasm_bindgen(js_name = planSpin)]
    pub fn plan_spin(
        segments_json: &str,
        config_json: &str,
        settings_json: &str,
        current_rotation: f32,
    ) -> std::result::Result<String, JsValue> {
        RNG.with(|rng| {
            plan_spin_json(
                segments_json,
                config_json,
                settings_json,
                current_rotation,
                &mut rng.borrow_mut(),
            )
        })
        .map_err(js_err)
    }

    #[wasm_bindgen(js_name = oddsOpen)]
    pub fn odds_open(segments_json: &str) -> std::result::Result<String, JsValue> {
        odds_open_json(segments_json).map_err(js_err)
    }

    #[wasm_bindgen(js_name = oddsSet)]
    pub fn odds_set(
        allocation_json: &str,
        id: &str,
        value: i32,
    ) -> std::result::Result<String, JsValue> {
        odds_set_json(allocation_json, id, value).map_err(js_err)
    }

    #[wasm_bindgen(js_name = oddsToggleLock)]
    pub fn odds_toggle_lock(allocation_json: &str, id: &str) -> std::result::Result<String, JsValue> {
        odds_toggle_lock_json(allocation_json, id).map_err(js_err)
    }

    #[wasm_bindgen(js_name = oddsCommit)]
    pub fn odds_commit(
        allocation_json: &str,
        segments_json: &str,
    ) -> std::result::Result<String, JsValue> {
        odds_commit_json(allocation_json, segments_json).map_err(js_err)
    }

    #[wasm_bindgen(js_name = normalizeDefaultList)]
    pub fn normalize_default_list(json: &str) -> std::result::Result<String, JsValue> {
        normalize_default_list_json(json).map_err(js_err)
    }
}
