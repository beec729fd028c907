//! JSON-file persistence. The whole store is one document keyed by user id;
//! every mutation is a full load-modify-save cycle behind an async lock, so
//! concurrent mutations for different users cannot interleave half-written
//! records.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

use crate::models::user::{Application, UserRecord};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    users: HashMap<String, UserRecord>,
}

/// On-disk key-value store for user records. The lock covers reads too, so
/// no caller can observe a half-written document.
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Loads the full document. A missing file is the empty store; a corrupt
    /// file is logged and treated as empty rather than poisoning every
    /// request after it.
    async fn load(&self) -> Result<StoreData, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreData::default())
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&raw) {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!("store file {} is corrupt ({e}), starting empty", self.path.display());
                Ok(StoreData::default())
            }
        }
    }

    async fn save(&self, data: &StoreData) -> Result<(), StorageError> {
        let raw = serde_json::to_vec_pretty(data)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }

    pub async fn load_user(&self, user_id: &str) -> Result<Option<UserRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        Ok(data.users.remove(user_id))
    }

    /// Stored resume text for a user; empty string when absent. The matching
    /// engine tolerates an empty resume, so callers need no special case.
    pub async fn resume_text(&self, user_id: &str) -> Result<String, StorageError> {
        Ok(self
            .load_user(user_id)
            .await?
            .and_then(|u| u.resume_text)
            .unwrap_or_default())
    }

    pub async fn set_resume(&self, user_id: &str, resume_text: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        data.users.entry(user_id.to_string()).or_default().resume_text = Some(resume_text);
        self.save(&data).await
    }

    /// Appends one application event. Prior entries for the same job are
    /// kept; the record is created on first use.
    pub async fn append_application(
        &self,
        user_id: &str,
        application: Application,
    ) -> Result<Application, StorageError> {
        let _guard = self.lock.lock().await;
        let mut data = self.load().await?;
        data.users
            .entry(user_id.to_string())
            .or_default()
            .applications
            .push(application.clone());
        self.save(&data).await?;
        Ok(application)
    }

    /// Application history for a user, oldest first. Unknown users have an
    /// empty history, not an error.
    pub async fn applications(&self, user_id: &str) -> Result<Vec<Application>, StorageError> {
        Ok(self
            .load_user(user_id)
            .await?
            .map(|u| u.applications)
            .unwrap_or_default())
    }
}
