//! # API Facade
//!
//! [`ParkadeApi`] is the single entry point for every UI client. It owns the
//! [`Garage`], the loaded [`Settings`] and a [`GarageStore`], and:
//!
//! - **Dispatches** each call to its command in `commands/*.rs`
//! - **Persists** the garage after every successful mutation (park, retrieve,
//!   move). A failed command saves nothing.
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! ## Opening a Garage
//!
//! [`ParkadeApi::open`] restores the stored snapshot when there is one and
//! otherwise builds an empty garage from `config.json`. Rates always come from
//! the current price list. When the stored capacity and the configured one
//! disagree, the configured capacity wins as long as every parked vehicle
//! still fits; otherwise the stored capacity is kept and a warning is logged.
//!
//! ## Generic Over Store and Clock
//!
//! - Production: `ParkadeApi<FileStore, SystemClock>`
//! - Testing: `ParkadeApi<InMemoryStore, ManualClock>`

use crate::clock::Clock;
use crate::commands;
use crate::config::Settings;
use crate::error::Result;
use crate::garage::{Garage, GarageSnapshot};
use crate::model::{SpaceIndex, VehicleKind};
use crate::store::GarageStore;
use tracing::{debug, warn};

pub struct ParkadeApi<S: GarageStore, C: Clock> {
    garage: Garage<C>,
    settings: Settings,
    store: S,
    paths: ParkadePaths,
}

impl<S: GarageStore, C: Clock> ParkadeApi<S, C> {
    pub fn open(store: S, settings: Settings, paths: ParkadePaths, clock: C) -> Result<Self> {
        let configured = settings.garage.capacity()?;
        let rates = settings.pricing.rate_table();

        let garage = match store.load()? {
            Some(snapshot) => {
                let snapshot = fit_capacity(snapshot, configured);
                Garage::restore(&snapshot, rates, clock)?
            }
            None => {
                debug!(capacity = configured, "no stored garage, starting empty");
                Garage::with_clock(configured, rates, clock)?
            }
        };

        Ok(Self {
            garage,
            settings,
            store,
            paths,
        })
    }

    pub fn park(&mut self, kind: VehicleKind, registration: &str) -> Result<commands::CmdResult> {
        let result = commands::park::run(&self.garage, kind, registration)?;
        self.persist()?;
        Ok(result)
    }

    pub fn retrieve(&mut self, registration: &str) -> Result<commands::CmdResult> {
        let result =
            commands::retrieve::run(&self.garage, registration, &self.settings.pricing.currency)?;
        self.persist()?;
        Ok(result)
    }

    pub fn search(&self, registration: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.garage, registration, &self.settings.pricing.currency)
    }

    pub fn move_vehicle(
        &mut self,
        registration: &str,
        target: Option<SpaceIndex>,
    ) -> Result<commands::CmdResult> {
        let result = commands::move_vehicle::run(&self.garage, registration, target)?;
        self.persist()?;
        Ok(result)
    }

    pub fn status(&self, filter: StatusFilter) -> Result<commands::CmdResult> {
        commands::status::run(&self.garage, filter)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, &mut self.settings, &self.garage, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn garage(&self) -> &Garage<C> {
        &self.garage
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.garage.snapshot())
    }
}

/// Applies the configured capacity to a stored snapshot when every parked
/// vehicle fits.
fn fit_capacity(mut snapshot: GarageSnapshot, configured: usize) -> GarageSnapshot {
    if snapshot.capacity == configured {
        return snapshot;
    }
    if snapshot.vehicles.iter().all(|p| p.space < configured) {
        debug!(
            from = snapshot.capacity,
            to = configured,
            "resizing stored garage"
        );
        snapshot.capacity = configured;
    } else {
        warn!(
            stored = snapshot.capacity,
            configured, "parked vehicles occupy spaces beyond the configured capacity, keeping stored capacity"
        );
    }
    snapshot
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::status::StatusFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, ParkadePaths};
