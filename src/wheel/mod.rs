//! Wheel core
//!
//! Pure functions over explicit inputs. This module must stay free of
//! storage, rendering and platform dependencies:
//! - Randomness only through an injected `rand::Rng`
//! - Rotation is an input parameter, never internal state
//! - Segment order is the angular slot order

pub mod geometry;
pub mod odds;
pub mod sampler;
pub mod segment;
pub mod spin;

pub use geometry::{
    hit_test, index_at_rotation, slice_center, slice_span, target_rotation_for_index,
    target_rotation_with_offset,
};
pub use odds::{OddsAllocation, OddsEntry, OddsSession, SessionPhase};
pub use sampler::{draw, draw_segment, format_probability, probability};
pub use segment::{Palette, Segment, SegmentVisual, create_default, next_color, random_color};
pub use spin::SpinPlan;
