//! Save/load snapshot of the application state
//!
//! Features:
//! - Versioned JSON envelope `{ "version": n, "state": { .. } }`
//! - Only durable fields are written (no in-flight spin, no last result)
//! - Migration of older snapshots on load
//!
//! Where the snapshot lives is the caller's business.

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_WHEEL_ID, default_wheel};
use crate::error::{Result, WheelError};
use crate::state::WheelState;

/// Snapshot format version written by `encode`
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    state: &'a WheelState,
}

#[derive(Deserialize)]
struct SnapshotIn {
    /// Unversioned snapshots predate versioning
    #[serde(default)]
    version: u32,
    state: WheelState,
}

/// Serialize the durable part of `state`
pub fn encode(state: &WheelState) -> Result<String> {
    let json = serde_json::to_string(&SnapshotOut {
        version: SNAPSHOT_VERSION,
        state,
    })?;
    log::debug!("Encoded snapshot ({} bytes)", json.len());
    Ok(json)
}

/// Restore a state from a snapshot, migrating it forward if needed
pub fn decode(json: &str) -> Result<WheelState> {
    let snapshot: SnapshotIn = serde_json::from_str(json)?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(WheelError::invalid_state(format!(
            "snapshot version {} is newer than supported {}",
            snapshot.version, SNAPSHOT_VERSION
        )));
    }

    let mut state = migrate(snapshot.state, snapshot.version);
    state.history.enforce_cap();
    log::info!(
        "Loaded snapshot v{}: {} segments, {} saved wheels, {} history",
        snapshot.version,
        state.segments.len(),
        state.saved_wheels.len(),
        state.history.len()
    );
    Ok(state)
}

fn migrate(mut state: WheelState, from_version: u32) -> WheelState {
    // v0 -> v1: the built-in wheel joins the saved list
    if from_version < 1 && !state.saved_wheels.iter().any(|w| w.id == DEFAULT_WHEEL_ID) {
        log::info!("Migrating snapshot v{}: adding default wheel", from_version);
        state.saved_wheels.insert(0, default_wheel());
    }
    state
}
