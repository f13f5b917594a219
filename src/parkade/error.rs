use crate::model::SpaceIndex;
use std::fmt;
use thiserror::Error;

/// Why a requested move target was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRejection {
    OutOfRange { capacity: usize },
    Occupied,
    SameSpace,
}

impl fmt::Display for TargetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRejection::OutOfRange { capacity } => {
                write!(f, "out of range (garage has {} spaces)", capacity)
            }
            TargetRejection::Occupied => write!(f, "already occupied"),
            TargetRejection::SameSpace => write!(f, "vehicle is already parked there"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParkadeError {
    #[error("Vehicle {0} is already parked")]
    DuplicateVehicle(String),

    #[error("Garage is full")]
    GarageFull,

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Invalid target space {index}: {reason}")]
    InvalidTarget {
        index: SpaceIndex,
        reason: TargetRejection,
    },

    #[error("Space {0} is already occupied")]
    SpaceAlreadyOccupied(SpaceIndex),

    #[error("Space {0} is already free")]
    SpaceAlreadyFree(SpaceIndex),

    #[error("Unknown vehicle kind: {0}")]
    UnknownVehicleKind(String),

    #[error("Invalid registration: {0:?}")]
    InvalidRegistration(String),

    #[error("Invalid capacity: {0} (a garage needs at least one space)")]
    InvalidCapacity(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ParkadeError>;
