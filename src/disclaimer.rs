//! Persisted "disclaimer accepted" flag

use crate::config::Config;
use crate::error::{AtsMatchError, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DISCLAIMER_NOTICE: &str = "\
This tool simulates how an applicant tracking system might score your CV \
against a job description. Scores, keywords and tips are estimates produced \
by a remote scoring service and do not reflect any real employer's screening. \
Your job description and CV are sent to the configured service for analysis.";

#[derive(Debug, Default, Serialize, Deserialize)]
struct DisclaimerState {
    accepted: bool,
    accepted_at: Option<DateTime<Utc>>,
}

pub struct DisclaimerStore {
    path: PathBuf,
}

impl DisclaimerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the config file.
    pub fn default_location() -> Self {
        Self::new(Config::app_dir().join("state.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable state file counts as not accepted.
    pub fn is_accepted(&self) -> bool {
        let state = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| toml::from_str::<DisclaimerState>(&content).ok());

        match state {
            Some(state) => state.accepted,
            None => {
                debug!("No disclaimer state at {}", self.path.display());
                false
            }
        }
    }

    pub fn accept(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let state = DisclaimerState {
            accepted: true,
            accepted_at: Some(Utc::now()),
        };
        let content = toml::to_string_pretty(&state)
            .map_err(|e| AtsMatchError::Configuration(format!("Failed to serialize state: {}", e)))?;

        std::fs::write(&self.path, content)?;
        info!("Disclaimer accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");

        let store = DisclaimerStore::new(&path);
        assert!(!store.is_accepted());

        store.accept().unwrap();
        assert!(DisclaimerStore::new(&path).is_accepted());
    }

    #[test]
    fn test_corrupt_state_reads_as_not_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "accepted = \"sure\"").unwrap();

        assert!(!DisclaimerStore::new(path).is_accepted());
    }
}
