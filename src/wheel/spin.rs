//! Spin planning
//!
//! Turns a draw into the final resting rotation the animation must reach.
//! The animation owns easing and timing; the plan only fixes where it ends,
//! and that end is always the drawn slice under the pointer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::target_rotation_for_index;
use super::sampler::draw_segment;
use super::segment::Segment;
use crate::consts::MIN_SPIN_SEGMENTS;
use crate::error::{Result, WheelError};
use crate::settings::{AppSettings, WheelConfig};

/// Everything the animation needs for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinPlan {
    /// Winning slot
    pub index: usize,
    pub segment_id: String,
    pub start_rotation: f32,
    /// Final resting rotation (degrees, clockwise)
    pub target_rotation: f32,
    pub duration_secs: f32,
}

impl SpinPlan {
    /// Weighted draw, then the rotation that lands on it
    pub fn random<R: Rng + ?Sized>(
        segments: &[Segment],
        config: &WheelConfig,
        settings: &AppSettings,
        current_rotation: f32,
        rng: &mut R,
    ) -> Result<Self> {
        let index = draw_segment(segments, rng)?;
        Self::to_index(index, segments, config, settings, current_rotation)
    }

    /// Rigged spin onto a known slot
    pub fn to_index(
        index: usize,
        segments: &[Segment],
        config: &WheelConfig,
        settings: &AppSettings,
        current_rotation: f32,
    ) -> Result<Self> {
        if segments.len() < MIN_SPIN_SEGMENTS {
            return Err(WheelError::invalid_state(format!(
                "a wheel needs at least {} segments to spin",
                MIN_SPIN_SEGMENTS
            )));
        }
        let segment = segments.get(index).ok_or_else(|| {
            WheelError::invalid_input(format!("no segment at index {}", index))
        })?;

        let target_rotation = target_rotation_for_index(
            index,
            segments.len(),
            current_rotation,
            config.effective_rotation_count(settings),
        )?;

        log::debug!(
            "Spin to {} ({}): {:.1} -> {:.1}",
            index,
            segment.label,
            current_rotation,
            target_rotation
        );

        Ok(Self {
            index,
            segment_id: segment.id.clone(),
            start_rotation: current_rotation,
            target_rotation,
            duration_secs: config.effective_spin_duration(settings),
        })
    }

    /// Rigged spin onto a segment id
    pub fn to_segment(
        segment_id: &str,
        segments: &[Segment],
        config: &WheelConfig,
        settings: &AppSettings,
        current_rotation: f32,
    ) -> Result<Self> {
        let index = segments
            .iter()
            .position(|s| s.id == segment_id)
            .ok_or_else(|| WheelError::invalid_input(format!("no segment with id {}", segment_id)))?;
        Self::to_index(index, segments, config, settings, current_rotation)
    }

    /// Degrees travelled by the animation
    pub fn travel(&self) -> f32 {
        self.target_rotation - self.start_rotation
    }
}
