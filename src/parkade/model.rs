use crate::error::{ParkadeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identity of a space, `0..capacity`.
pub type SpaceIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Car,
    Motorcycle,
    Bus,
    Bicycle,
}

/// How much room a vehicle kind needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Footprint {
    Small,
    Standard,
    Large,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::Car,
        VehicleKind::Motorcycle,
        VehicleKind::Bus,
        VehicleKind::Bicycle,
    ];

    pub fn footprint(&self) -> Footprint {
        match self {
            VehicleKind::Bicycle | VehicleKind::Motorcycle => Footprint::Small,
            VehicleKind::Car => Footprint::Standard,
            VehicleKind::Bus => Footprint::Large,
        }
    }

    /// Short code used on the command line and in the price list.
    pub fn code(&self) -> &'static str {
        match self {
            VehicleKind::Car => "CAR",
            VehicleKind::Motorcycle => "MC",
            VehicleKind::Bus => "BUS",
            VehicleKind::Bicycle => "BIKE",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VehicleKind {
    type Err = ParkadeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleKind::Car),
            "MC" | "MOTORCYCLE" => Ok(VehicleKind::Motorcycle),
            "BUS" => Ok(VehicleKind::Bus),
            "BIKE" | "BICYCLE" => Ok(VehicleKind::Bicycle),
            _ => Err(ParkadeError::UnknownVehicleKind(s.to_string())),
        }
    }
}

/// A registration number, trimmed and upper-cased so that comparisons are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Registration(String);

impl Registration {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ParkadeError::InvalidRegistration(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Registration {
    type Error = ParkadeError;

    fn try_from(value: String) -> Result<Self> {
        Registration::parse(&value)
    }
}

impl From<Registration> for String {
    fn from(value: Registration) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub registration: Registration,
    pub kind: VehicleKind,
    pub arrived_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(registration: Registration, kind: VehicleKind, arrived_at: DateTime<Utc>) -> Self {
        Self {
            registration,
            kind,
            arrived_at,
        }
    }
}

/// A parked vehicle together with the space it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkedVehicle {
    pub space: SpaceIndex,
    pub vehicle: Vehicle,
}

/// One row of the garage status listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceStatus {
    pub index: SpaceIndex,
    pub occupant: Option<Vehicle>,
}

impl SpaceStatus {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub capacity: usize,
    pub occupied: usize,
}

impl Occupancy {
    pub fn free(&self) -> usize {
        self.capacity - self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }
}
