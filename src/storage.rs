use std::fs;
use std::path::{Path, PathBuf};

use actix_web::web;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ServiceError;

/// Json snapshot storage, one file per data set.
///
/// Without a directory the snapshots are discarded and the data only lives in memory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: Option<PathBuf>,
}

impl Storage {
    pub fn in_memory() -> Self {
        Storage { dir: None }
    }

    pub fn on_disk<P: Into<PathBuf>>(dir: P) -> Self {
        Storage {
            dir: Some(dir.into()),
        }
    }

    pub fn from_config(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Storage::on_disk(dir),
            None => Storage::in_memory(),
        }
    }

    /// load a snapshot, returns `None` when nothing has been stored yet
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ServiceError> {
        let path = match &self.dir {
            Some(dir) => snapshot_path(dir, name),
            None => return Ok(None),
        };

        if !path.exists() {
            debug!("no snapshot found at {}", path.display());
            return Ok(None);
        }

        let data = fs::read(&path)?;
        let value = serde_json::from_slice(&data)?;
        info!("loaded snapshot {}", path.display());

        Ok(Some(value))
    }

    /// replace the snapshot, the old one stays intact when writing fails
    pub async fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), ServiceError> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => return Ok(()),
        };

        let data = serde_json::to_vec_pretty(value)?;
        let path = snapshot_path(&dir, name);

        web::block(move || -> Result<(), ServiceError> {
            fs::create_dir_all(&dir)?;
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, data)?;
            fs::rename(&tmp, &path)?;
            Ok(())
        })
        .await?;

        Ok(())
    }
}

fn snapshot_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

/// a fresh, not yet existing directory, for tests
#[cfg(test)]
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("courtside-{}", rand::random::<u64>()))
}
