use crate::errors::AppError;
use crate::models::{default_habits, Habit, Quest};
use serde::{de::DeserializeOwned, Serialize};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const QUESTS_KEY: &str = "quests";
pub const HABITS_KEY: &str = "habits";

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// Both collections as JSON arrays under fixed keys in one directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn load_quests(&self) -> Vec<Quest> {
        self.read_collection(QUESTS_KEY).await.unwrap_or_default()
    }

    pub async fn load_habits(&self) -> Vec<Habit> {
        self.read_collection(HABITS_KEY)
            .await
            .unwrap_or_else(default_habits)
    }

    pub async fn save_quests(&self, quests: &[Quest]) {
        if let Err(err) = self.write_collection(QUESTS_KEY, quests).await {
            error!("failed to persist {QUESTS_KEY}: {}", err.message);
        }
    }

    pub async fn save_habits(&self, habits: &[Habit]) {
        if let Err(err) = self.write_collection(HABITS_KEY, habits).await {
            error!("failed to persist {HABITS_KEY}: {}", err.message);
        }
    }

    /// `None` when the collection is absent or unusable; failures other than a
    /// missing file are logged.
    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => Some(records),
                Err(err) => {
                    error!("failed to parse {key} from {}: {err}", path.display());
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read {key} from {}: {err}", path.display());
                None
            }
        }
    }

    async fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(records)?;
        fs::write(self.path_for(key), payload).await?;
        Ok(())
    }
}
