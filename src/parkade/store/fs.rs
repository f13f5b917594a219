use super::GarageStore;
use crate::error::{ParkadeError, Result};
use crate::garage::GarageSnapshot;
use std::fs;
use std::path::PathBuf;

pub const STATE_FILENAME: &str = "garage.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ParkadeError::Io)?;
        }
        Ok(())
    }
}

impl GarageStore for FileStore {
    fn load(&self) -> Result<Option<GarageSnapshot>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(ParkadeError::Io)?;
        let snapshot = serde_json::from_str(&content).map_err(ParkadeError::Serialization)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &GarageSnapshot) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(snapshot).map_err(ParkadeError::Serialization)?;

        // Write next to the target and rename over it, so readers only ever
        // see a complete file.
        let tmp = self.root.join(format!("{}.tmp", STATE_FILENAME));
        fs::write(&tmp, content).map_err(ParkadeError::Io)?;
        fs::rename(&tmp, self.state_path()).map_err(ParkadeError::Io)?;
        Ok(())
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.state_path())
    }
}
