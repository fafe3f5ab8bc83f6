//! Spin Wheel - weighted decision wheel core
//!
//! Core modules:
//! - `wheel`: Segment model, weighted draw, odds editor, and wheel geometry
//! - `settings`: Wheel appearance and app preferences
//! - `history`: Capped spin history
//! - `state`: Explicitly owned application state (segments, saved wheels, history)
//! - `defaults`: Built-in default wheel and the published default-list format
//! - `persistence`: Versioned JSON snapshots of the application state
//! - `platform`: Browser/native platform abstraction

pub mod defaults;
pub mod error;
pub mod history;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod state;
pub mod wheel;

pub use error::{Result, WheelError};
pub use history::{SpinHistory, SpinResult};
pub use settings::{AppSettings, Theme, WheelConfig};
pub use state::{SavedWheel, WheelState};
pub use wheel::{OddsAllocation, OddsSession, Segment, SegmentVisual, SpinPlan};

use glam::Vec2;

/// Wheel configuration constants
pub mod consts {
    /// Clicks beyond this fraction of the wheel radius are off the wheel
    pub const WHEEL_RADIUS_RATIO: f32 = 0.95;
    /// Clicks inside this fraction of the wheel radius hit the hub dead zone
    pub const DEAD_ZONE_RATIO: f32 = 0.15;

    /// A wheel needs at least this many segments before it can spin
    pub const MIN_SPIN_SEGMENTS: usize = 2;

    /// Total every valid odds allocation must sum to
    pub const ODDS_TOTAL: i32 = 100;

    /// Spin history cap (oldest evicted first)
    pub const MAX_HISTORY: usize = 50;

    pub const FULL_TURN: f32 = 360.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(consts::FULL_TURN);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if a >= consts::FULL_TURN { 0.0 } else { a }
}

/// Radius of the wheel drawn inside a canvas of the given size
#[inline]
pub fn wheel_radius(canvas: Vec2) -> f32 {
    canvas.min_element() / 2.0
}

/// Convert a screen-space offset from the canvas center (y pointing down)
/// to a wheel angle: degrees clockwise from 12 o'clock.
#[inline]
pub fn screen_to_wheel_angle(offset: Vec2) -> f32 {
    // Standard screen angle: 0 = east, counter-clockwise, y up
    let screen_angle = (-offset.y).atan2(offset.x).to_degrees();
    normalize_degrees(90.0 - screen_angle)
}

/// Screen point at `wheel_angle` (clockwise from top) and `radius_fraction`
/// of the wheel radius, for a canvas of the given size.
#[inline]
pub fn point_on_wheel(canvas: Vec2, wheel_angle: f32, radius_fraction: f32) -> Vec2 {
    let r = wheel_radius(canvas) * radius_fraction;
    let theta = wheel_angle.to_radians();
    canvas / 2.0 + Vec2::new(r * theta.sin(), -r * theta.cos())
}
