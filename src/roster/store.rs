//! JSON persistence for team lists.
//!
//! The on-disk format is a plain array of `{ "name", "players": [...] }` records,
//! so files round-trip losslessly through [Team]'s serde derives.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::roster::Team;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "io error: {err}"),
            StoreError::Parse(err) => write!(f, "invalid team file: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err)
    }
}

pub fn save_teams(path: &Path, teams: &[Team]) -> Result<(), StoreError> {
    let payload = serde_json::to_string_pretty(teams)?;
    fs::write(path, payload)?;
    Ok(())
}

pub fn load_teams(path: &Path) -> Result<Vec<Team>, StoreError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::sim::Rng;

    fn unique_temp_path(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("quidditch-{name}-{stamp}.json"))
    }

    #[test]
    fn save_then_load_round_trips_teams() {
        let mut rng = Rng::new(21);
        let teams = vec![
            Team::random("Falcons", &mut rng),
            Team::random("Harpies", &mut rng),
        ];
        let path = unique_temp_path("store-roundtrip");
        save_teams(&path, &teams).expect("save should succeed");
        let loaded = load_teams(&path).expect("load should succeed");
        fs::remove_file(&path).ok();
        assert_eq!(teams, loaded);
    }

    #[test]
    fn load_surfaces_missing_file_as_io_error() {
        let path = unique_temp_path("store-missing");
        assert!(matches!(load_teams(&path), Err(StoreError::Io(_))));
    }

    #[test]
    fn load_surfaces_malformed_json_as_parse_error() {
        let path = unique_temp_path("store-bad");
        fs::write(&path, "{not json").expect("write temp file");
        let result = load_teams(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }
}
