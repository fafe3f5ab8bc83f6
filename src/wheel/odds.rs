//! Odds editor
//!
//! A percentage view of segment weights. Editing one entry pushes the
//! opposite change onto the unlocked entries in proportion to their share,
//! so the allocation stays at (or near) 100 while the user drags. Rounding
//! can leave the total a few points off after a drag; `is_valid` gates
//! saving instead of forcing the sum on every intermediate step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::segment::{Segment, new_id, next_color};
use crate::consts::ODDS_TOTAL;
use crate::error::{Result, WheelError};

/// Prefix of ids handed out to entries added inside the editor
pub const PLACEHOLDER_PREFIX: &str = "new-";

/// One row of the odds editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsEntry {
    pub id: String,
    pub label: String,
    pub color: String,
    /// Whole percent. Normally 0..=100; see `OddsAllocation::initialize`.
    pub percentage: i32,
    /// Excluded from automatic redistribution
    pub locked: bool,
}

impl OddsEntry {
    /// Added in this editing session, not yet a segment
    pub fn is_new(&self) -> bool {
        self.id.starts_with(PLACEHOLDER_PREFIX)
    }
}

/// Percentage allocation across a wheel's segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsAllocation {
    entries: Vec<OddsEntry>,
}

impl OddsAllocation {
    /// Seed an allocation from segment weights.
    pub fn initialize(segments: &[Segment]) -> Self {
        let total: f64 = segments.iter().map(|s| s.weight).sum();
        Self::initialize_with_total(segments, total)
    }

    /// Seed an allocation from segment weights against a known total.
    ///
    /// Each entry gets its rounded share (an equal split when the total is
    /// not positive). The whole rounding remainder lands on the first entry,
    /// which for very large wheels can push it outside 0..=100.
    pub fn initialize_with_total(segments: &[Segment], total_weight: f64) -> Self {
        let count = segments.len();
        let mut entries: Vec<OddsEntry> = segments
            .iter()
            .map(|s| {
                let share = if total_weight > 0.0 {
                    s.weight / total_weight * 100.0
                } else {
                    100.0 / count as f64
                };
                OddsEntry {
                    id: s.id.clone(),
                    label: s.label.clone(),
                    color: s.color.clone(),
                    percentage: share.round() as i32,
                    locked: false,
                }
            })
            .collect();

        let sum: i32 = entries.iter().map(|e| e.percentage).sum();
        if let Some(first) = entries.first_mut() {
            first.percentage += ODDS_TOTAL - sum;
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[OddsEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&OddsEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all percentages (the "total allocation" indicator). Widened so
    /// an allocation decoded from untrusted JSON cannot overflow it.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|e| i64::from(e.percentage)).sum()
    }

    /// Saveable iff the percentages sum to exactly 100
    pub fn is_valid(&self) -> bool {
        self.total() == i64::from(ODDS_TOTAL)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| WheelError::invalid_input(format!("no odds entry with id {}", id)))
    }

    /// Set one entry's percentage and redistribute the opposite change over
    /// the other unlocked entries.
    ///
    /// `new_value` must already be clamped to 0..=100. Locked entries never
    /// move, and a locked target cannot be set.
    pub fn set_percentage(&mut self, target_id: &str, new_value: i32) -> Result<()> {
        if !(0..=ODDS_TOTAL).contains(&new_value) {
            return Err(WheelError::invalid_input(format!(
                "percentage {} outside 0..={}",
                new_value, ODDS_TOTAL
            )));
        }
        let target = self.position(target_id)?;
        if self.entries[target].locked {
            return Err(WheelError::invalid_state(format!(
                "odds entry {} is locked",
                target_id
            )));
        }

        let delta = i64::from(new_value) - i64::from(self.entries[target].percentage);
        self.entries[target].percentage = new_value;

        let others: Vec<usize> = (0..self.entries.len())
            .filter(|&i| i != target && !self.entries[i].locked)
            .collect();
        if delta == 0 || others.is_empty() {
            // Nothing to absorb the change; the total indicator shows the gap
            return Ok(());
        }

        let unlocked_total: i64 = others
            .iter()
            .map(|&i| i64::from(self.entries[i].percentage))
            .sum();
        if unlocked_total == 0 {
            // No shares to scale: spread what was freed evenly
            let share = ((-delta) as f64 / others.len() as f64).round().max(0.0) as i64;
            for &i in &others {
                let e = &mut self.entries[i];
                e.percentage = clamp_percentage(i64::from(e.percentage) + share);
            }
        } else {
            for &i in &others {
                let e = &mut self.entries[i];
                let adjustment =
                    (delta as f64 * e.percentage as f64 / unlocked_total as f64).round() as i64;
                e.percentage = clamp_percentage(i64::from(e.percentage) - adjustment);
            }
        }

        log::debug!(
            "Odds: {} -> {}% (delta {:+}), total now {}",
            target_id,
            new_value,
            delta,
            self.total()
        );
        Ok(())
    }

    /// Flip an entry's lock. Does not rebalance.
    pub fn toggle_lock(&mut self, id: &str) -> Result<bool> {
        let i = self.position(id)?;
        let entry = &mut self.entries[i];
        entry.locked = !entry.locked;
        Ok(entry.locked)
    }

    /// Append an empty, unlocked entry with a placeholder id. Existing
    /// entries are left alone; the user drags percentage over to it.
    pub fn add_unallocated<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &OddsEntry {
        let used: Vec<&str> = self.entries.iter().map(|e| e.color.as_str()).collect();
        let color = next_color(&used, rng);
        let entry = OddsEntry {
            id: format!("{}{}", PLACEHOLDER_PREFIX, new_id(rng)),
            label: format!("Option {}", self.entries.len() + 1),
            color,
            percentage: 0,
            locked: false,
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Translate the allocation back into segments, in allocation order.
    ///
    /// Known ids keep their segment with `weight = percentage`; placeholder
    /// entries become new segments. Fails with `InvalidState` unless valid.
    pub fn commit(&self, segments: &[Segment]) -> Result<Vec<Segment>> {
        if !self.is_valid() {
            return Err(WheelError::invalid_state(format!(
                "odds total {} is not {}",
                self.total(),
                ODDS_TOTAL
            )));
        }

        Ok(self
            .entries
            .iter()
            .map(|entry| {
                let weight = entry.percentage as f64;
                match segments.iter().find(|s| s.id == entry.id) {
                    Some(existing) => Segment {
                        weight,
                        ..existing.clone()
                    },
                    None => {
                        let id = entry
                            .id
                            .strip_prefix(PLACEHOLDER_PREFIX)
                            .unwrap_or(&entry.id);
                        Segment::new(id, entry.label.clone(), entry.color.clone(), weight)
                    }
                }
            })
            .collect())
    }
}

fn clamp_percentage(value: i64) -> i32 {
    value.clamp(0, i64::from(ODDS_TOTAL)) as i32
}

/// Lifecycle of one odds-editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Freshly seeded from the segments
    Initialized,
    /// At least one edit applied
    Editing,
    /// Saved back into segments
    Committed,
    /// Closed without saving
    Discarded,
}

/// An odds editor session: opened from the current segments, edited, then
/// either committed or discarded. Closed sessions reject further edits; a
/// new session must be opened instead.
#[derive(Debug, Clone)]
pub struct OddsSession {
    allocation: OddsAllocation,
    phase: SessionPhase,
}

impl OddsSession {
    pub fn open(segments: &[Segment]) -> Self {
        log::debug!("Odds session opened for {} segments", segments.len());
        Self {
            allocation: OddsAllocation::initialize(segments),
            phase: SessionPhase::Initialized,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn allocation(&self) -> &OddsAllocation {
        &self.allocation
    }

    pub fn is_valid(&self) -> bool {
        self.allocation.is_valid()
    }

    fn ensure_open(&self) -> Result<()> {
        match self.phase {
            SessionPhase::Initialized | SessionPhase::Editing => Ok(()),
            phase => Err(WheelError::invalid_state(format!(
                "odds session already closed ({:?})",
                phase
            ))),
        }
    }

    pub fn set_percentage(&mut self, target_id: &str, new_value: i32) -> Result<()> {
        self.ensure_open()?;
        self.allocation.set_percentage(target_id, new_value)?;
        self.phase = SessionPhase::Editing;
        Ok(())
    }

    pub fn toggle_lock(&mut self, id: &str) -> Result<bool> {
        self.ensure_open()?;
        let locked = self.allocation.toggle_lock(id)?;
        self.phase = SessionPhase::Editing;
        Ok(locked)
    }

    pub fn add_unallocated<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&OddsEntry> {
        self.ensure_open()?;
        self.phase = SessionPhase::Editing;
        Ok(self.allocation.add_unallocated(rng))
    }

    /// Save: returns the new segment list. An invalid allocation leaves the
    /// session open so the user can keep editing.
    pub fn commit(&mut self, segments: &[Segment]) -> Result<Vec<Segment>> {
        self.ensure_open()?;
        let committed = self.allocation.commit(segments)?;
        self.phase = SessionPhase::Committed;
        log::info!("Odds committed for {} segments", committed.len());
        Ok(committed)
    }

    pub fn discard(&mut self) {
        if self.ensure_open().is_ok() {
            self.phase = SessionPhase::Discarded;
            log::debug!("Odds session discarded");
        }
    }
}
