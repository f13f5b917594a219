//! # Storage Layer
//!
//! The garage engine never touches the filesystem. Between CLI invocations its
//! state is carried by a [`GarageStore`], which loads and saves a
//! [`GarageSnapshot`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `garage.json` in the parkade root directory.
//! - [`memory::InMemoryStore`]: keeps the last snapshot in memory, for tests.
//!
//! ## Storage Format
//!
//! ```text
//! <root>/
//! ├── config.json      # NumberOfSpaces
//! ├── pricelist.json   # Hourly rates per vehicle kind
//! └── garage.json      # Parked vehicles: capacity + [{space, vehicle}]
//! ```

use crate::error::Result;
use crate::garage::GarageSnapshot;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for garage persistence.
pub trait GarageStore {
    /// Load the last saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<GarageSnapshot>>;

    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &GarageSnapshot) -> Result<()>;

    /// Where the snapshot lives, if it lives anywhere.
    fn location(&self) -> Option<PathBuf>;
}
