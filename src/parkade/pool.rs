//! # Space Pool
//!
//! Bookkeeping for the fixed row of spaces. The pool knows nothing about
//! registrations being unique or about fees; it only guarantees that a space
//! holds at most one vehicle and that occupy/release are never applied to a
//! space in the wrong state. The garage checks these conditions before calling
//! in, so the pool errors here signal a bug (or a corrupt snapshot) rather
//! than user input.

use crate::error::{ParkadeError, Result, TargetRejection};
use crate::model::{Registration, SpaceIndex, SpaceStatus, Vehicle};

#[derive(Debug, Clone)]
pub struct Space {
    index: SpaceIndex,
    occupant: Option<Vehicle>,
}

impl Space {
    pub fn index(&self) -> SpaceIndex {
        self.index
    }

    pub fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    fn status(&self) -> SpaceStatus {
        SpaceStatus {
            index: self.index,
            occupant: self.occupant.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpacePool {
    spaces: Vec<Space>,
}

impl SpacePool {
    pub fn new(capacity: usize) -> Self {
        let spaces = (0..capacity)
            .map(|index| Space {
                index,
                occupant: None,
            })
            .collect();
        Self { spaces }
    }

    pub fn capacity(&self) -> usize {
        self.spaces.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.spaces.iter().filter(|s| !s.is_free()).count()
    }

    /// Lowest-indexed free space.
    pub fn find_free_space(&self) -> Option<SpaceIndex> {
        self.spaces.iter().find(|s| s.is_free()).map(Space::index)
    }

    /// Lowest-indexed free space other than `excluded`.
    pub fn find_free_space_except(&self, excluded: SpaceIndex) -> Option<SpaceIndex> {
        self.spaces
            .iter()
            .find(|s| s.is_free() && s.index != excluded)
            .map(Space::index)
    }

    pub fn get(&self, index: SpaceIndex) -> Result<&Space> {
        self.spaces.get(index).ok_or(ParkadeError::InvalidTarget {
            index,
            reason: TargetRejection::OutOfRange {
                capacity: self.capacity(),
            },
        })
    }

    pub fn position_of(&self, registration: &Registration) -> Option<SpaceIndex> {
        self.spaces
            .iter()
            .find(|s| {
                s.occupant
                    .as_ref()
                    .is_some_and(|v| &v.registration == registration)
            })
            .map(Space::index)
    }

    pub fn occupy(&mut self, index: SpaceIndex, vehicle: Vehicle) -> Result<()> {
        let capacity = self.capacity();
        let space = self
            .spaces
            .get_mut(index)
            .ok_or(ParkadeError::InvalidTarget {
                index,
                reason: TargetRejection::OutOfRange { capacity },
            })?;
        if space.occupant.is_some() {
            return Err(ParkadeError::SpaceAlreadyOccupied(index));
        }
        space.occupant = Some(vehicle);
        Ok(())
    }

    pub fn release(&mut self, index: SpaceIndex) -> Result<Vehicle> {
        let capacity = self.capacity();
        let space = self
            .spaces
            .get_mut(index)
            .ok_or(ParkadeError::InvalidTarget {
                index,
                reason: TargetRejection::OutOfRange { capacity },
            })?;
        space
            .occupant
            .take()
            .ok_or(ParkadeError::SpaceAlreadyFree(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    pub fn statuses(&self) -> Vec<SpaceStatus> {
        self.spaces.iter().map(Space::status).collect()
    }
}
