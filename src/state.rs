//! Application state
//!
//! One owned value holding everything the UI edits: the live segment list,
//! wheel config, saved wheels, settings and history. The UI layer owns the
//! instance and decides when to persist it; nothing here is global. Time and
//! randomness come in as arguments so every transition is reproducible.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SPIN_SEGMENTS;
use crate::defaults::{DEFAULT_WHEEL_NAME, default_segments, default_wheel};
use crate::error::{Result, WheelError};
use crate::history::{SpinHistory, SpinResult};
use crate::settings::{AppSettings, WheelConfig};
use crate::wheel::segment::new_id;
use crate::wheel::{OddsSession, Segment, SpinPlan, create_default};

/// A named wheel kept for later
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWheel {
    pub id: String,
    pub name: String,
    pub segments: Vec<Segment>,
    pub config: WheelConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Preview image data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Complete application state. Fields missing from a stored copy fall back
/// to the fresh-state defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelState {
    /// Live wheel, in slot order
    pub segments: Vec<Segment>,
    pub config: WheelConfig,
    pub current_wheel_name: String,
    pub saved_wheels: Vec<SavedWheel>,
    pub settings: AppSettings,
    pub history: SpinHistory,
    /// Spin in flight (not persisted)
    #[serde(skip)]
    spin: Option<SpinPlan>,
    /// Winner of the last settled spin (not persisted)
    #[serde(skip)]
    last_result: Option<Segment>,
}

impl Default for WheelState {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelState {
    /// Fresh state holding the built-in default wheel
    pub fn new() -> Self {
        Self {
            segments: default_segments(),
            config: WheelConfig::default(),
            current_wheel_name: DEFAULT_WHEEL_NAME.to_string(),
            saved_wheels: vec![default_wheel()],
            settings: AppSettings::default(),
            history: SpinHistory::new(),
            spin: None,
            last_result: None,
        }
    }

    /// Back to the built-in defaults, dropping everything
    pub fn reset(&mut self) {
        log::info!("State reset to defaults");
        *self = Self::new();
    }

    // === Segments ===

    fn segment_position(&self, id: &str) -> Result<usize> {
        self.segments
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WheelError::invalid_input(format!("no segment with id {}", id)))
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Append a segment under a fresh id (any id it carries is replaced)
    pub fn add_segment<R: Rng + ?Sized>(&mut self, mut segment: Segment, rng: &mut R) -> &Segment {
        segment.id = new_id(rng);
        while self.segment(&segment.id).is_some() {
            segment.id = new_id(rng);
        }
        self.segments.push(segment);
        &self.segments[self.segments.len() - 1]
    }

    /// Append a default "Option N" segment in the next free color
    pub fn add_default_segment<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Segment {
        let segment = create_default(&self.segments, rng);
        self.segments.push(segment);
        &self.segments[self.segments.len() - 1]
    }

    /// Edit a segment in place. The id cannot be changed.
    pub fn update_segment(&mut self, id: &str, edit: impl FnOnce(&mut Segment)) -> Result<()> {
        let i = self.segment_position(id)?;
        let segment = &mut self.segments[i];
        edit(segment);
        segment.id = id.to_string();
        Ok(())
    }

    pub fn remove_segment(&mut self, id: &str) -> Option<Segment> {
        let i = self.segments.iter().position(|s| s.id == id)?;
        Some(self.segments.remove(i))
    }

    /// Move the segment at `from` so it ends up at `to`
    pub fn reorder_segments(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.segments.len();
        if from >= len || to >= len {
            return Err(WheelError::invalid_input(format!(
                "cannot move segment {} to {} in a wheel of {}",
                from, to, len
            )));
        }
        let segment = self.segments.remove(from);
        self.segments.insert(to, segment);
        Ok(())
    }

    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }

    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }

    pub fn total_weight(&self) -> f64 {
        self.segments.iter().map(|s| s.weight).sum()
    }

    // === Odds editor ===

    /// Start an odds editing session seeded from the live segments
    pub fn open_odds_editor(&self) -> OddsSession {
        OddsSession::open(&self.segments)
    }

    /// Save an odds session into the live segments
    pub fn apply_odds(&mut self, session: &mut OddsSession) -> Result<()> {
        self.segments = session.commit(&self.segments)?;
        Ok(())
    }

    // === Spinning ===

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    pub fn current_spin(&self) -> Option<&SpinPlan> {
        self.spin.as_ref()
    }

    pub fn last_result(&self) -> Option<&Segment> {
        self.last_result.as_ref()
    }

    /// Enough segments and no spin in flight
    pub fn can_spin(&self) -> bool {
        self.segments.len() >= MIN_SPIN_SEGMENTS && !self.is_spinning()
    }

    fn start(&mut self, plan: SpinPlan) -> SpinPlan {
        self.last_result = None;
        self.spin = Some(plan.clone());
        log::info!("Spin started, landing on {}", plan.segment_id);
        plan
    }

    fn ensure_can_spin(&self) -> Result<()> {
        if self.is_spinning() {
            return Err(WheelError::invalid_state("a spin is already in progress"));
        }
        if self.segments.len() < MIN_SPIN_SEGMENTS {
            return Err(WheelError::invalid_state(format!(
                "a wheel needs at least {} segments to spin, has {}",
                MIN_SPIN_SEGMENTS,
                self.segments.len()
            )));
        }
        Ok(())
    }

    /// Weighted spin from `current_rotation`
    pub fn begin_spin<R: Rng + ?Sized>(
        &mut self,
        current_rotation: f32,
        rng: &mut R,
    ) -> Result<SpinPlan> {
        self.ensure_can_spin()?;
        let plan = SpinPlan::random(
            &self.segments,
            &self.config,
            &self.settings,
            current_rotation,
            rng,
        )?;
        Ok(self.start(plan))
    }

    /// Spin that lands on a chosen segment
    pub fn begin_spin_to(&mut self, segment_id: &str, current_rotation: f32) -> Result<SpinPlan> {
        self.ensure_can_spin()?;
        let plan = SpinPlan::to_segment(
            segment_id,
            &self.segments,
            &self.config,
            &self.settings,
            current_rotation,
        )?;
        Ok(self.start(plan))
    }

    /// The wheel settled: record the winner and add it to history
    pub fn complete_spin<R: Rng + ?Sized>(
        &mut self,
        timestamp: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<SpinResult> {
        let plan = self
            .spin
            .take()
            .ok_or_else(|| WheelError::invalid_state("no spin in progress"))?;
        let winner = self
            .segment(&plan.segment_id)
            .cloned()
            .ok_or_else(|| {
                WheelError::invalid_state(format!(
                    "winning segment {} was removed mid-spin",
                    plan.segment_id
                ))
            })?;

        log::info!("Spin settled on {} ({})", winner.label, winner.id);
        self.last_result = Some(winner.clone());
        let result = self
            .history
            .record(winner, timestamp, Some(self.current_wheel_name.clone()), rng)
            .clone();
        Ok(result)
    }

    /// Abandon a spin without a result
    pub fn cancel_spin(&mut self) {
        if self.spin.take().is_some() {
            log::debug!("Spin cancelled");
        }
    }

    /// Remove the last winner when auto-remove is on
    pub fn apply_auto_remove(&mut self) -> Option<Segment> {
        if !self.settings.auto_remove_winner {
            return None;
        }
        let id = self.last_result.take()?.id;
        let removed = self.remove_segment(&id);
        if removed.is_some() {
            log::info!("Auto-removed winner {}", id);
        }
        removed
    }

    // === Saved wheels ===

    fn wheel_position(&self, id: &str) -> Result<usize> {
        self.saved_wheels
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WheelError::invalid_input(format!("no saved wheel with id {}", id)))
    }

    pub fn saved_wheel(&self, id: &str) -> Option<&SavedWheel> {
        self.saved_wheels.iter().find(|w| w.id == id)
    }

    /// Snapshot the live wheel under `name`, returning the new id
    pub fn save_current_wheel<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> String {
        let id = new_id(rng);
        self.saved_wheels.push(SavedWheel {
            id: id.clone(),
            name: name.to_string(),
            segments: self.segments.clone(),
            config: self.config.clone(),
            created_at: now,
            updated_at: now,
            thumbnail: None,
        });
        log::info!("Saved wheel {:?} ({} segments)", name, self.segments.len());
        id
    }

    /// Replace the live wheel with a saved one
    pub fn load_wheel(&mut self, id: &str) -> Result<()> {
        let wheel = &self.saved_wheels[self.wheel_position(id)?];
        self.segments = wheel.segments.clone();
        self.config = wheel.config.clone();
        self.current_wheel_name = wheel.name.clone();
        log::info!("Loaded wheel {:?}", self.current_wheel_name);
        Ok(())
    }

    pub fn delete_wheel(&mut self, id: &str) -> Result<SavedWheel> {
        let i = self.wheel_position(id)?;
        Ok(self.saved_wheels.remove(i))
    }

    pub fn rename_wheel(&mut self, id: &str, name: &str, now: DateTime<Utc>) -> Result<()> {
        let i = self.wheel_position(id)?;
        let wheel = &mut self.saved_wheels[i];
        wheel.name = name.to_string();
        wheel.updated_at = now;
        Ok(())
    }

    /// Copy a saved wheel under a new id, returning it
    pub fn duplicate_wheel<R: Rng + ?Sized>(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<String> {
        let source = &self.saved_wheels[self.wheel_position(id)?];
        let copy = SavedWheel {
            id: new_id(rng),
            name: format!("{} (Copy)", source.name),
            created_at: now,
            updated_at: now,
            ..source.clone()
        };
        let new_id = copy.id.clone();
        self.saved_wheels.push(copy);
        Ok(new_id)
    }
}
