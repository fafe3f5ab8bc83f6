//! Spin history
//!
//! Newest first, capped at `MAX_HISTORY` records. Each record snapshots
//! the winning segment so later edits to the wheel do not rewrite history.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_HISTORY;
use crate::wheel::Segment;
use crate::wheel::segment::new_id;

/// A single spin outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub id: String,
    /// Winning segment as it was at spin time
    pub segment: Segment,
    /// When the wheel settled (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
    /// Name of the wheel that was spun, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_name: Option<String>,
}

/// Spin history list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinHistory {
    entries: Vec<SpinResult>,
}

impl SpinHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a spin at the front, evicting the oldest beyond the cap
    pub fn record<R: Rng + ?Sized>(
        &mut self,
        segment: Segment,
        timestamp: DateTime<Utc>,
        wheel_name: Option<String>,
        rng: &mut R,
    ) -> &SpinResult {
        let result = SpinResult {
            id: new_id(rng),
            segment,
            timestamp,
            wheel_name,
        };
        self.entries.insert(0, result);
        if self.entries.len() > MAX_HISTORY {
            let dropped = self.entries.len() - MAX_HISTORY;
            self.entries.truncate(MAX_HISTORY);
            log::debug!("History full, dropped {} oldest", dropped);
        }
        &self.entries[0]
    }

    /// Most recent spin
    pub fn latest(&self) -> Option<&SpinResult> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[SpinResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Trim a history loaded from elsewhere back under the cap
    pub(crate) fn enforce_cap(&mut self) {
        if self.entries.len() > MAX_HISTORY {
            log::warn!(
                "Loaded history has {} records, keeping newest {}",
                self.entries.len(),
                MAX_HISTORY
            );
            self.entries.truncate(MAX_HISTORY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_record_newest_first() {
        let mut history = SpinHistory::new();
        let mut rng = Pcg32::seed_from_u64(1);
        history.record(Segment::new("a", "A", "#fff", 1.0), at(10), None, &mut rng);
        history.record(Segment::new("b", "B", "#fff", 1.0), at(20), Some("Lunch".into()), &mut rng);

        assert_eq!(history.len(), 2);
        let latest = history.latest().unwrap();
        assert_eq!(latest.segment.id, "b");
        assert_eq!(latest.wheel_name.as_deref(), Some("Lunch"));
        assert_ne!(history.entries()[0].id, history.entries()[1].id);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = SpinHistory::new();
        let mut rng = Pcg32::seed_from_u64(2);
        for i in 0..(MAX_HISTORY + 5) {
            history.record(
                Segment::new(format!("s{i}"), "S", "#fff", 1.0),
                at(i as i64),
                None,
                &mut rng,
            );
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.latest().unwrap().segment.id, format!("s{}", MAX_HISTORY + 4));
        assert_eq!(history.entries().last().unwrap().segment.id, "s5");

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_timestamp_serializes_as_iso() {
        let mut history = SpinHistory::new();
        let mut rng = Pcg32::seed_from_u64(3);
        history.record(Segment::new("a", "A", "#fff", 1.0), at(0), None, &mut rng);
        let json = serde_json::to_string(&history).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("1970-01-01T00:00:00Z"));
        let back: SpinHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
