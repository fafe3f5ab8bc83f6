//! Wheel geometry
//!
//! Angles are degrees, clockwise from 12 o'clock. The wheel has `n` equal
//! slices; slice `i` spans `[i * 360/n, (i + 1) * 360/n)` in the wheel's own
//! frame, and that frame starts at the pointer. A wheel turned clockwise by
//! `rotation` degrees therefore shows the slice at `normalize(-rotation)`
//! under the pointer.
//!
//! Rotation is always passed in by the caller (the animation owns it).

use glam::Vec2;

use crate::consts::{DEAD_ZONE_RATIO, FULL_TURN, WHEEL_RADIUS_RATIO};
use crate::error::{Result, WheelError};
use crate::{normalize_degrees, screen_to_wheel_angle, wheel_radius};

/// Angular width of one slice
#[inline]
pub fn slice_span(segment_count: usize) -> f32 {
    FULL_TURN / segment_count as f32
}

/// Middle of slice `index`, in the wheel's own frame
#[inline]
pub fn slice_center(index: usize, segment_count: usize) -> f32 {
    (index as f32 + 0.5) * slice_span(segment_count)
}

/// Closest a landing point may sit to a slice edge, in degrees
const EDGE_MARGIN: f32 = 0.05;

/// Slice containing a wheel-frame angle
#[inline]
fn slot_index(slot_angle: f32, segment_count: usize) -> usize {
    let slot = normalize_degrees(slot_angle);
    (slot / slice_span(segment_count)).floor() as usize % segment_count
}

/// Segment under a screen point, or `None` when the point is off the wheel,
/// inside the hub dead zone, or the inputs are degenerate.
///
/// `click` and `canvas` are in screen pixels (y down, origin top-left).
pub fn hit_test(
    click: Vec2,
    canvas: Vec2,
    rotation: f32,
    segment_count: usize,
    pointer_angle: f32,
) -> Option<usize> {
    let radius = wheel_radius(canvas);
    if segment_count == 0
        || radius <= 0.0
        || !radius.is_finite()
        || !click.is_finite()
        || !rotation.is_finite()
        || !pointer_angle.is_finite()
    {
        return None;
    }

    let offset = click - canvas / 2.0;
    let distance = offset.length();
    if distance > radius * WHEEL_RADIUS_RATIO || distance < radius * DEAD_ZONE_RATIO {
        return None;
    }

    let wheel_angle = screen_to_wheel_angle(offset);
    // Undo the live rotation, then the pointer offset
    let unrotated = normalize_degrees(wheel_angle - rotation);
    let slot = normalize_degrees(unrotated - pointer_angle);
    Some(slot_index(slot, segment_count))
}

/// Segment currently under the pointer (drives tick sounds and highlights)
pub fn index_at_rotation(rotation: f32, segment_count: usize) -> Option<usize> {
    if segment_count == 0 || !rotation.is_finite() {
        return None;
    }
    Some(slot_index(-rotation, segment_count))
}

/// Final rotation for a spin that stops with the pointer at the middle of
/// slice `index`, at least `extra_turns` full turns past `current_rotation`.
pub fn target_rotation_for_index(
    index: usize,
    segment_count: usize,
    current_rotation: f32,
    extra_turns: u32,
) -> Result<f32> {
    target_rotation_with_offset(index, segment_count, current_rotation, extra_turns, 0.5)
}

/// Like `target_rotation_for_index`, but stops at `fraction` (0..1) of the
/// way through the slice in the direction of travel.
///
/// The landing point is kept `EDGE_MARGIN` inside the slice so rounding can
/// never tip the pointer onto a neighbor; `0.0` lands just past the edge.
pub fn target_rotation_with_offset(
    index: usize,
    segment_count: usize,
    current_rotation: f32,
    extra_turns: u32,
    fraction: f32,
) -> Result<f32> {
    if index >= segment_count {
        return Err(WheelError::invalid_input(format!(
            "segment index {} out of range for {} segments",
            index, segment_count
        )));
    }
    if !current_rotation.is_finite() {
        return Err(WheelError::invalid_input("current rotation is not finite"));
    }
    if !(0.0..1.0).contains(&fraction) {
        return Err(WheelError::invalid_input(format!(
            "landing fraction {} outside [0, 1)",
            fraction
        )));
    }

    let span = slice_span(segment_count);
    let margin = EDGE_MARGIN.min(span / 4.0);
    let landing = index as f32 * span + (fraction * span).clamp(margin, span - margin);
    // Rotation (mod 360) that puts `landing` under the pointer
    let resting = normalize_degrees(-landing);
    let forward = normalize_degrees(resting - normalize_degrees(current_rotation));

    Ok(current_rotation + extra_turns as f32 * FULL_TURN + forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_on_wheel;
    use proptest::prelude::*;

    const CANVAS: Vec2 = Vec2::new(600.0, 400.0);

    #[test]
    fn test_slice_centers_hit_their_slice() {
        for i in 0..6 {
            let click = point_on_wheel(CANVAS, slice_center(i, 6), 0.6);
            assert_eq!(hit_test(click, CANVAS, 0.0, 6, 0.0), Some(i));
        }
    }

    #[test]
    fn test_dead_zone_returns_none() {
        for angle in [0.0_f32, 45.0, 170.0, 300.0] {
            let click = point_on_wheel(CANVAS, angle, 0.14);
            assert_eq!(hit_test(click, CANVAS, 0.0, 6, 0.0), None);
        }
        assert_eq!(hit_test(CANVAS / 2.0, CANVAS, 0.0, 6, 0.0), None);
    }

    #[test]
    fn test_off_wheel_returns_none() {
        let click = point_on_wheel(CANVAS, 90.0, 0.96);
        assert_eq!(hit_test(click, CANVAS, 0.0, 6, 0.0), None);
        // Corner of the canvas is outside the wheel circle
        assert_eq!(hit_test(Vec2::new(1.0, 1.0), CANVAS, 0.0, 6, 0.0), None);
        // Just inside the band still hits
        let click = point_on_wheel(CANVAS, 90.0, 0.94);
        assert_eq!(hit_test(click, CANVAS, 0.0, 6, 0.0), Some(1));
    }

    #[test]
    fn test_degenerate_inputs_return_none() {
        let click = point_on_wheel(CANVAS, 10.0, 0.5);
        assert_eq!(hit_test(click, CANVAS, 0.0, 0, 0.0), None);
        assert_eq!(hit_test(click, Vec2::ZERO, 0.0, 4, 0.0), None);
        assert_eq!(hit_test(click, CANVAS, f32::NAN, 4, 0.0), None);
        assert_eq!(index_at_rotation(f32::INFINITY, 4), None);
        assert_eq!(index_at_rotation(0.0, 0), None);
    }

    #[test]
    fn test_rotation_shifts_hit() {
        // Wheel turned one slice clockwise: slice 0 now sits where slice 1 was
        let click = point_on_wheel(CANVAS, slice_center(1, 4), 0.5);
        assert_eq!(hit_test(click, CANVAS, 90.0, 4, 0.0), Some(0));
        assert_eq!(hit_test(click, CANVAS, -90.0, 4, 0.0), Some(2));
        assert_eq!(hit_test(click, CANVAS, 90.0 + 720.0, 4, 0.0), Some(0));
    }

    #[test]
    fn test_pointer_angle_shifts_layout() {
        // Layout starts at the pointer: with the pointer at 3 o'clock,
        // slice 0 is centered at 135 degrees on screen
        let click = point_on_wheel(CANVAS, 90.0 + slice_center(0, 4), 0.5);
        assert_eq!(hit_test(click, CANVAS, 0.0, 4, 90.0), Some(0));
    }

    #[test]
    fn test_index_at_rotation() {
        assert_eq!(index_at_rotation(0.0, 4), Some(0));
        assert_eq!(index_at_rotation(10.0, 4), Some(3));
        assert_eq!(index_at_rotation(-10.0, 4), Some(0));
        assert_eq!(index_at_rotation(-100.0, 4), Some(1));
        assert_eq!(index_at_rotation(360.0 * 3.0 + 10.0, 4), Some(3));
    }

    #[test]
    fn test_target_rotation_lands_on_index() {
        for n in [2usize, 3, 6, 10] {
            for i in 0..n {
                let target = target_rotation_for_index(i, n, 37.5, 5).unwrap();
                assert!(target >= 37.5 + 5.0 * 360.0);
                assert!(target < 37.5 + 6.0 * 360.0);
                assert_eq!(index_at_rotation(target, n), Some(i));
                let top = point_on_wheel(CANVAS, 0.0, 0.8);
                assert_eq!(hit_test(top, CANVAS, target, n, 0.0), Some(i));
            }
        }
    }

    #[test]
    fn test_target_rotation_at_slice_edges() {
        for n in 2usize..40 {
            for i in 0..n {
                for current in [0.0_f32, 37.5, 123.4, 1000.0, -250.0] {
                    for fraction in [0.0_f32, 0.9999] {
                        let target = target_rotation_with_offset(i, n, current, 5, fraction).unwrap();
                        assert_eq!(
                            index_at_rotation(target, n),
                            Some(i),
                            "n={n} i={i} current={current} fraction={fraction}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_target_rotation_rejects_bad_input() {
        assert!(matches!(
            target_rotation_for_index(4, 4, 0.0, 1),
            Err(WheelError::InvalidInput(_))
        ));
        assert!(target_rotation_for_index(0, 0, 0.0, 1).is_err());
        assert!(target_rotation_with_offset(0, 4, 0.0, 1, 1.0).is_err());
        assert!(target_rotation_with_offset(0, 4, 0.0, 1, -0.1).is_err());
        assert!(target_rotation_for_index(0, 4, f32::NAN, 1).is_err());
    }

    proptest! {
        #[test]
        fn prop_hit_inside_band_always_in_range(
            angle in 0.0f32..360.0,
            radius in 0.16f32..0.94,
            rotation in -5000.0f32..5000.0,
            pointer in -360.0f32..360.0,
            n in 1usize..64,
        ) {
            let click = point_on_wheel(CANVAS, angle, radius);
            let hit = hit_test(click, CANVAS, rotation, n, pointer);
            prop_assert!(matches!(hit, Some(i) if i < n));
        }

        #[test]
        fn prop_target_rotation_round_trips(
            n in 2usize..40,
            index in 0usize..40,
            current in -3600.0f32..3600.0,
            turns in 0u32..10,
            fraction in prop_oneof![Just(0.0f32), 0.0f32..1.0, Just(0.99999f32)],
        ) {
            let index = index % n;
            let target = target_rotation_with_offset(index, n, current, turns, fraction).unwrap();
            prop_assert!(target >= current + turns as f32 * 360.0 - 1e-2);
            prop_assert_eq!(index_at_rotation(target, n), Some(index));
        }
    }
}
