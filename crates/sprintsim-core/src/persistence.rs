//! Save/Load and export of simulation state
//!
//! Two formats: a versioned bincode snapshot for compact storage, and pretty
//! JSON for handing results to other tools. Both round-trip every field of
//! [`SimulationState`]. The engine itself never writes anything.
//!
//! Only an engine snapshot ([`save_engine`]) carries the random stream, so
//! only it can resume an in-flight run and reproduce the uninterrupted trace.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::engine::SimulationEngine;
use crate::rng::SimRng;
use crate::state::SimulationState;

/// Version number for the snapshot format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Versioned snapshot envelope
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Seed the run was started from, if known
    pub seed: Option<u64>,
    /// Random stream position; present in engine snapshots
    pub rng: Option<SimRng>,
    pub state: SimulationState,
}

/// Write a binary snapshot of `state`.
pub fn save_state<W: Write>(
    writer: W,
    state: &SimulationState,
    seed: Option<u64>,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        seed,
        rng: None,
        state: state.clone(),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Write a binary snapshot of a run together with its random stream.
pub fn save_engine<W: Write>(writer: W, engine: &SimulationEngine) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        seed: engine.seed(),
        rng: Some(engine.rng().clone()),
        state: engine.state().clone(),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Rebuild an engine from a snapshot.
///
/// A run that still has sprints to execute needs the stored random stream;
/// snapshots written by [`save_state`] only restore finished runs.
pub fn load_engine<R: Read>(reader: R) -> Result<SimulationEngine, SaveError> {
    let loaded = load_state(reader)?;
    let finished = loaded.state.sprints.iter().all(|s| s.is_completed());

    let rng = match loaded.rng {
        Some(rng) => rng,
        None if finished => SimRng::new(loaded.seed.unwrap_or(1)),
        None => return Err(SaveError::MissingRng),
    };

    Ok(SimulationEngine::resume(loaded.state, rng, loaded.seed))
}

/// Read a binary snapshot written by [`save_state`].
pub fn load_state<R: Read>(reader: R) -> Result<LoadedState, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(LoadedState {
        seed: save_data.seed,
        rng: save_data.rng,
        state: save_data.state,
    })
}

/// Result of loading a snapshot
pub struct LoadedState {
    pub seed: Option<u64>,
    pub rng: Option<SimRng>,
    pub state: SimulationState,
}

/// Write `state` as pretty-printed JSON.
pub fn export_json<W: Write>(writer: W, state: &SimulationState) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, state)?;
    Ok(())
}

/// Read a state previously written by [`export_json`].
pub fn import_json<R: Read>(reader: R) -> Result<SimulationState, SaveError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
    /// The snapshot holds an unfinished run but no random stream
    MissingRng,
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::Json(e) => write!(f, "JSON error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::MissingRng => {
                write!(f, "Snapshot of an unfinished run has no random stream")
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::engine::SimulationEngine;
    use chrono::NaiveDate;

    fn finished_state() -> SimulationState {
        let start = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let mut engine =
            SimulationEngine::with_start_date(SimulationConfig::default(), Some(8), start);
        engine.run_simulation();
        engine.make_decision("dp-1", "opt-a");
        engine.into_state()
    }

    #[test]
    fn test_save_load_roundtrip() {
        let state = finished_state();

        let mut save_buffer = Vec::new();
        save_state(&mut save_buffer, &state, Some(8)).expect("Save failed");

        let loaded = load_state(&save_buffer[..]).expect("Load failed");
        assert_eq!(loaded.seed, Some(8));
        assert_eq!(loaded.state, state);
    }

    #[test]
    fn test_json_roundtrip() {
        let state = finished_state();

        let mut buffer = Vec::new();
        export_json(&mut buffer, &state).expect("Export failed");
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.contains("\"burndown_data\""));
        assert!(text.contains("\"SprintBacklog\"") || text.contains("\"Done\""));

        let imported = import_json(&buffer[..]).expect("Import failed");
        assert_eq!(imported.sprints, state.sprints);
        assert_eq!(imported.events, state.events);
        assert_eq!(imported.decisions, state.decisions);
        assert_eq!(imported.metrics.total_stories_completed, state.metrics.total_stories_completed);
    }

    #[test]
    fn test_version_mismatch() {
        let save_data = SaveData {
            version: SAVE_VERSION + 1,
            seed: None,
            rng: None,
            state: finished_state(),
        };
        let bytes = bincode::serialize(&save_data).unwrap();

        match load_state(&bytes[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            _ => panic!("expected version mismatch"),
        }
    }

    #[test]
    fn test_truncated_snapshot() {
        let mut buffer = Vec::new();
        save_state(&mut buffer, &finished_state(), None).unwrap();
        buffer.truncate(buffer.len() / 2);
        assert!(matches!(load_state(&buffer[..]), Err(SaveError::Bincode(_))));
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[test]
    fn test_engine_snapshot_resumes_mid_sprint() {
        let config = SimulationConfig::default();
        let mut uninterrupted =
            SimulationEngine::with_start_date(config.clone(), Some(31), start());
        let expected = uninterrupted.run_simulation().clone();

        let mut engine = SimulationEngine::with_start_date(config, Some(31), start());
        engine.start_sprint(0).unwrap();
        engine.execute_day(0, 0).unwrap();
        engine.execute_day(0, 1).unwrap();
        let planned = engine.state().sprints[0].stories.len();

        let mut buffer = Vec::new();
        save_engine(&mut buffer, &engine).expect("Save failed");
        let mut resumed = load_engine(&buffer[..]).expect("Load failed");
        assert_eq!(resumed.seed(), Some(31));
        assert!(!resumed.is_finalized());

        let state = resumed.run_simulation();
        assert_eq!(state.sprints[0].stories.len(), planned);
        assert_eq!(state.sprints[0].burndown_data.len(), 10);
        assert_eq!(state, &expected);
    }

    #[test]
    fn test_unfinished_state_snapshot_cannot_resume() {
        let mut engine =
            SimulationEngine::with_start_date(SimulationConfig::default(), Some(4), start());
        engine.start_sprint(0).unwrap();

        let mut buffer = Vec::new();
        save_state(&mut buffer, engine.state(), Some(4)).unwrap();
        assert!(matches!(load_engine(&buffer[..]), Err(SaveError::MissingRng)));
    }

    #[test]
    fn test_finished_state_snapshot_loads_as_engine() {
        let state = finished_state();
        let mut buffer = Vec::new();
        save_state(&mut buffer, &state, Some(8)).unwrap();

        let mut engine = load_engine(&buffer[..]).unwrap();
        assert!(engine.is_finalized());
        assert_eq!(engine.run_simulation(), &state);
    }
}
