use super::GarageStore;
use crate::error::Result;
use crate::garage::GarageSnapshot;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Option<GarageSnapshot>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: GarageSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            saves: 0,
        }
    }

    /// How many times `save` was called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl GarageStore for InMemoryStore {
    fn load(&self) -> Result<Option<GarageSnapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &GarageSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> Option<PathBuf> {
        None
    }
}
