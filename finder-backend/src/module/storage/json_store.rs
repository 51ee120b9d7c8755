use async_trait::async_trait;
use finder_common::{CaptureRecord, CaptureSnapshot, Hemisphere};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{CaptureStore, ProfileStore, StorageError};

const STATE_FILE: &str = "user_state.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserRecord {
    #[serde(default)]
    hemisphere: Option<Hemisphere>,
    #[serde(default)]
    caught: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserState {
    #[serde(default)]
    users: BTreeMap<String, UserRecord>,
}

/// User state kept in memory and written through to a JSON file.
pub struct JsonFileStore {
    data_dir: PathBuf,
    state: RwLock<UserState>,
}

impl JsonFileStore {
    /// Open the store under `data_dir`. A missing state file means no users yet.
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let path = data_dir.join(STATE_FILE);

        let state = match fs::read_to_string(&path).await {
            Ok(content) => {
                let state: UserState = serde_json::from_str(&content)?;
                info!("Loaded state for {} users from {:?}", state.users.len(), path);
                state
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("State file does not exist yet: {:?}", path);
                UserState::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            data_dir,
            state: RwLock::new(state),
        })
    }

    fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    /// Write the whole state via a temp file so readers never see a partial file.
    async fn persist(&self, state: &UserState) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).await?;

        let path = self.state_path();
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(state)?;

        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!("Saved state for {} users", state.users.len());
        Ok(())
    }

    /// Apply `change` to a copy of the state and swap it in only once it is on
    /// disk. Skips the write when `change` reports nothing changed.
    async fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut UserState) -> bool + Send,
    {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        if !change(&mut next) {
            return Ok(());
        }

        self.persist(&next).await?;
        *state = next;
        Ok(())
    }
}

#[async_trait]
impl CaptureStore for JsonFileStore {
    async fn caught_snapshot(&self, user_id: &str) -> Result<CaptureSnapshot, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .get(user_id)
            .map(|user| CaptureSnapshot::from_caught_ids(user.caught.iter().cloned()))
            .unwrap_or_default())
    }

    async fn records(&self, user_id: &str) -> Result<Vec<CaptureRecord>, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .get(user_id)
            .map(|user| {
                user.caught
                    .iter()
                    .map(|fish_id| CaptureRecord {
                        user_id: user_id.to_string(),
                        fish_id: fish_id.clone(),
                        caught: true,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn mark_caught(&self, user_id: &str, fish_id: &str) -> Result<(), StorageError> {
        self.update(|state| {
            state
                .users
                .entry(user_id.to_string())
                .or_default()
                .caught
                .insert(fish_id.to_string())
        })
        .await
    }

    async fn clear_caught(&self, user_id: &str, fish_id: &str) -> Result<(), StorageError> {
        self.update(|state| {
            state
                .users
                .get_mut(user_id)
                .map(|user| user.caught.remove(fish_id))
                .unwrap_or(false)
        })
        .await
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn hemisphere(&self, user_id: &str) -> Result<Option<Hemisphere>, StorageError> {
        let state = self.state.read().await;
        Ok(state.users.get(user_id).and_then(|user| user.hemisphere))
    }

    async fn set_hemisphere(
        &self,
        user_id: &str,
        hemisphere: Hemisphere,
    ) -> Result<(), StorageError> {
        self.update(|state| {
            state.users.entry(user_id.to_string()).or_default().hemisphere = Some(hemisphere);
            true
        })
        .await
    }
}
