//! # Configuration
//!
//! Two JSON files live in the parkade root directory:
//!
//! | File | Keys | Defaults |
//! |------|------|----------|
//! | `config.json` | `NumberOfSpaces` | 100 |
//! | `pricelist.json` | `HourlyRateCar`, `HourlyRateMC`, `HourlyRateBus`, `HourlyRateBike`, `Currency` | 20, 10, 30, 5, "SEK" |
//!
//! A missing file is created with the defaults on first load. Missing keys in
//! an existing file fall back to their defaults.
//!
//! ## CLI Keys
//!
//! `parkade config <key> [value]` addresses settings with flat keys:
//! `spaces`, `rate.car`, `rate.mc`, `rate.bus`, `rate.bike`, `currency`.

use crate::error::{ParkadeError, Result};
use crate::fees::{Rate, RateTable};
use crate::model::VehicleKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILENAME: &str = "config.json";
pub const PRICING_FILENAME: &str = "pricelist.json";

const DEFAULT_SPACES: usize = 100;
const DEFAULT_CURRENCY: &str = "SEK";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct GarageConfig {
    #[serde(default = "default_spaces")]
    pub number_of_spaces: usize,
}

fn default_spaces() -> usize {
    DEFAULT_SPACES
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            number_of_spaces: DEFAULT_SPACES,
        }
    }
}

impl GarageConfig {
    pub fn load_or_create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        load_or_create(dir.as_ref(), CONFIG_FILENAME)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        save(self, dir.as_ref(), CONFIG_FILENAME)
    }

    pub fn capacity(&self) -> Result<usize> {
        match self.number_of_spaces {
            0 => Err(ParkadeError::InvalidCapacity(0)),
            n => Ok(n),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Pricing {
    #[serde(default = "default_car")]
    pub hourly_rate_car: Rate,
    #[serde(default = "default_mc", rename = "HourlyRateMC")]
    pub hourly_rate_mc: Rate,
    #[serde(default = "default_bus")]
    pub hourly_rate_bus: Rate,
    #[serde(default = "default_bike")]
    pub hourly_rate_bike: Rate,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_car() -> Rate {
    20
}

fn default_mc() -> Rate {
    10
}

fn default_bus() -> Rate {
    30
}

fn default_bike() -> Rate {
    5
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            hourly_rate_car: default_car(),
            hourly_rate_mc: default_mc(),
            hourly_rate_bus: default_bus(),
            hourly_rate_bike: default_bike(),
            currency: default_currency(),
        }
    }
}

impl Pricing {
    pub fn load_or_create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        load_or_create(dir.as_ref(), PRICING_FILENAME)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        save(self, dir.as_ref(), PRICING_FILENAME)
    }

    pub fn rate(&self, kind: VehicleKind) -> Rate {
        match kind {
            VehicleKind::Car => self.hourly_rate_car,
            VehicleKind::Motorcycle => self.hourly_rate_mc,
            VehicleKind::Bus => self.hourly_rate_bus,
            VehicleKind::Bicycle => self.hourly_rate_bike,
        }
    }

    fn rate_mut(&mut self, kind: VehicleKind) -> &mut Rate {
        match kind {
            VehicleKind::Car => &mut self.hourly_rate_car,
            VehicleKind::Motorcycle => &mut self.hourly_rate_mc,
            VehicleKind::Bus => &mut self.hourly_rate_bus,
            VehicleKind::Bicycle => &mut self.hourly_rate_bike,
        }
    }

    pub fn rate_table(&self) -> RateTable {
        VehicleKind::ALL
            .into_iter()
            .fold(RateTable::new(), |table, kind| {
                table.with_rate(kind, self.rate(kind))
            })
    }
}

/// Both configuration files, addressed through flat CLI keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub garage: GarageConfig,
    pub pricing: Pricing,
}

impl Settings {
    pub fn load_or_create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            garage: GarageConfig::load_or_create(dir)?,
            pricing: Pricing::load_or_create(dir)?,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        self.garage.save(dir)?;
        self.pricing.save(dir)
    }

    pub fn keys() -> Vec<&'static str> {
        vec![
            "spaces",
            "rate.car",
            "rate.mc",
            "rate.bus",
            "rate.bike",
            "currency",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "spaces" => Some(self.garage.number_of_spaces.to_string()),
            "currency" => Some(self.pricing.currency.clone()),
            _ => rate_key(key).map(|kind| self.pricing.rate(kind).to_string()),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "spaces" => {
                let spaces: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid number of spaces: {}", value))?;
                if spaces == 0 {
                    return Err("Number of spaces must be at least 1".to_string());
                }
                self.garage.number_of_spaces = spaces;
            }
            "currency" => {
                if value.is_empty() {
                    return Err("Currency cannot be empty".to_string());
                }
                self.pricing.currency = value.to_string();
            }
            _ => {
                let kind = rate_key(key).ok_or_else(|| format!("Unknown config key: {}", key))?;
                let rate: Rate = value
                    .parse()
                    .map_err(|_| format!("Invalid rate for {}: {}", kind, value))?;
                *self.pricing.rate_mut(kind) = rate;
            }
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        Self::keys()
            .into_iter()
            .filter_map(|k| self.get(k).map(|v| (k, v)))
            .collect()
    }
}

fn rate_key(key: &str) -> Option<VehicleKind> {
    key.strip_prefix("rate.")
        .and_then(|kind| kind.parse::<VehicleKind>().ok())
}

fn load_or_create<T>(dir: &Path, filename: &str) -> Result<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    let path = dir.join(filename);
    debug!(path = %path.display(), "looking for config file");

    if !path.exists() {
        let defaults = T::default();
        save(&defaults, dir, filename)?;
        warn!(path = %path.display(), "config file was missing, created it with defaults");
        return Ok(defaults);
    }

    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

fn save<T: Serialize>(value: &T, dir: &Path, filename: &str) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(dir.join(filename), content)?;
    Ok(())
}
