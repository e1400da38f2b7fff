
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::models::{CandidateGroup, CandidateUser};

use super::source::{ProfileSource, SourceError};


/// On-disk layout: `{ "users": [...], "groups": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<CandidateUser>,
    #[serde(default)]
    pub groups: Vec<CandidateGroup>,
}


/// In-memory profile source backed by a JSON snapshot.
pub struct SnapshotSource {
    data: RwLock<Snapshot>,
    path: Option<PathBuf>,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
            path: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let snapshot = Self::read_snapshot(path)?;
        info!(
            "Loaded snapshot {}: {} users, {} groups",
            path.display(),
            snapshot.users.len(),
            snapshot.groups.len()
        );
        Ok(Self {
            data: RwLock::new(snapshot),
            path: Some(path.to_path_buf()),
        })
    }

    fn read_snapshot(path: &Path) -> Result<Snapshot, SourceError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| SourceError::Snapshot(format!("{}: {}", path.display(), e)))
    }

    /// Re-read the backing file. Fails for snapshots built in memory.
    pub fn reload(&self) -> Result<(), SourceError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| SourceError::Snapshot("snapshot has no backing file".to_string()))?;
        let snapshot = Self::read_snapshot(path)?;
        *self.data.write() = snapshot;
        info!("Reloaded snapshot {}", path.display());
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.data.read().users.len()
    }

    pub fn group_count(&self) -> usize {
        self.data.read().groups.len()
    }
}

#[async_trait]
impl ProfileSource for SnapshotSource {
    async fn fetch_all_profiles(&self) -> Result<Vec<CandidateUser>, SourceError> {
        Ok(self.data.read().users.clone())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<CandidateUser>, SourceError> {
        Ok(self
            .data
            .read()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn fetch_all_groups(&self) -> Result<Vec<CandidateGroup>, SourceError> {
        Ok(self.data.read().groups.clone())
    }

    fn source_name(&self) -> &str {
        "snapshot"
    }
}
