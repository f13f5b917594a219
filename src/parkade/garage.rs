//! # Garage Allocator
//!
//! [`Garage`] is the engine: it owns the [`SpacePool`] and the [`RateTable`]
//! and exposes the five operations callers build on (park, retrieve, search,
//! move, status).
//!
//! ## Allocation Policy
//!
//! First-fit by index: a new arrival (or a move without an explicit target)
//! gets the lowest-indexed free space. Footprint is not considered; every
//! space fits every kind.
//!
//! ## Consistency
//!
//! All state sits behind a single `RwLock`. Mutations (park, retrieve, move)
//! hold the write lock from validation to commit, so two concurrent parks can
//! never pick the same space and readers never see a half-applied move.
//! Reads (search, locate, quote, status, summary) share the read lock.
//!
//! Every operation validates first and mutates last: a failed call leaves the
//! garage exactly as it was.

use crate::clock::{Clock, SystemClock};
use crate::error::{ParkadeError, Result, TargetRejection};
use crate::fees::{compute_fee, Fee, RateTable};
use crate::model::{
    Occupancy, ParkedVehicle, Registration, SpaceIndex, SpaceStatus, Vehicle, VehicleKind,
};
use crate::pool::SpacePool;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of a successful retrieval. The vehicle is no longer in the garage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrieval {
    pub vehicle: Vehicle,
    pub space: SpaceIndex,
    pub departed_at: DateTime<Utc>,
    pub fee: Fee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub registration: Registration,
    pub from: SpaceIndex,
    pub to: SpaceIndex,
}

/// Serializable picture of every parked vehicle, used for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarageSnapshot {
    pub capacity: usize,
    pub vehicles: Vec<ParkedVehicle>,
}

#[derive(Debug)]
struct GarageState {
    pool: SpacePool,
    rates: RateTable,
}

impl GarageState {
    fn find(&self, registration: &Registration) -> Result<SpaceIndex> {
        self.pool
            .position_of(registration)
            .ok_or_else(|| ParkadeError::VehicleNotFound(registration.to_string()))
    }

    fn occupant(&self, index: SpaceIndex) -> Result<&Vehicle> {
        self.pool
            .get(index)?
            .occupant()
            .ok_or(ParkadeError::SpaceAlreadyFree(index))
    }
}

pub struct Garage<C: Clock = SystemClock> {
    state: RwLock<GarageState>,
    clock: C,
}

impl Garage<SystemClock> {
    pub fn new(capacity: usize, rates: RateTable) -> Result<Self> {
        Self::with_clock(capacity, rates, SystemClock)
    }
}

impl<C: Clock> Garage<C> {
    pub fn with_clock(capacity: usize, rates: RateTable, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(ParkadeError::InvalidCapacity(capacity));
        }
        rates.ensure_complete()?;
        Ok(Self {
            state: RwLock::new(GarageState {
                pool: SpacePool::new(capacity),
                rates,
            }),
            clock,
        })
    }

    /// Rebuilds a garage from a snapshot, re-checking every placement.
    pub fn restore(snapshot: &GarageSnapshot, rates: RateTable, clock: C) -> Result<Self> {
        let garage = Self::with_clock(snapshot.capacity, rates, clock)?;
        {
            let mut state = garage.state.write();
            for parked in &snapshot.vehicles {
                if state.pool.position_of(&parked.vehicle.registration).is_some() {
                    return Err(ParkadeError::DuplicateVehicle(
                        parked.vehicle.registration.to_string(),
                    ));
                }
                state.pool.occupy(parked.space, parked.vehicle.clone())?;
            }
        }
        debug!(
            capacity = snapshot.capacity,
            parked = snapshot.vehicles.len(),
            "garage restored"
        );
        Ok(garage)
    }

    pub fn snapshot(&self) -> GarageSnapshot {
        let state = self.state.read();
        let vehicles = state
            .pool
            .iter()
            .filter_map(|space| {
                space.occupant().map(|vehicle| ParkedVehicle {
                    space: space.index(),
                    vehicle: vehicle.clone(),
                })
            })
            .collect();
        GarageSnapshot {
            capacity: state.pool.capacity(),
            vehicles,
        }
    }

    pub fn capacity(&self) -> usize {
        self.state.read().pool.capacity()
    }

    /// Replaces the rate table. Fees of vehicles already parked are computed
    /// with the new rates on retrieval.
    pub fn set_rates(&self, rates: RateTable) -> Result<()> {
        rates.ensure_complete()?;
        self.state.write().rates = rates;
        Ok(())
    }

    pub fn park(&self, kind: VehicleKind, registration: &str) -> Result<SpaceIndex> {
        self.admit(kind, registration).map(|parked| parked.space)
    }

    /// Parks like [`Garage::park`] and returns the placement as committed,
    /// read under the same write lock.
    pub fn admit(&self, kind: VehicleKind, registration: &str) -> Result<ParkedVehicle> {
        let registration = Registration::parse(registration)?;
        let mut state = self.state.write();

        if state.pool.position_of(&registration).is_some() {
            return Err(ParkadeError::DuplicateVehicle(registration.to_string()));
        }
        let space = state.pool.find_free_space().ok_or(ParkadeError::GarageFull)?;

        let vehicle = Vehicle::new(registration, kind, self.clock.now());
        info!(registration = %vehicle.registration, %kind, space, "vehicle parked");
        state.pool.occupy(space, vehicle.clone())?;
        Ok(ParkedVehicle { space, vehicle })
    }

    pub fn retrieve(&self, registration: &str) -> Result<Retrieval> {
        let registration = Registration::parse(registration)?;
        let mut state = self.state.write();

        let space = state.find(&registration)?;
        let departed_at = self.clock.now();
        let fee = {
            let vehicle = state.occupant(space)?;
            compute_fee(vehicle.kind, departed_at - vehicle.arrived_at, &state.rates)?
        };
        let vehicle = state.pool.release(space)?;

        info!(
            registration = %vehicle.registration,
            kind = %vehicle.kind,
            space,
            fee = fee.amount,
            units = fee.units,
            "vehicle retrieved"
        );
        Ok(Retrieval {
            vehicle,
            space,
            departed_at,
            fee,
        })
    }

    pub fn search(&self, registration: &str) -> Result<SpaceIndex> {
        self.locate(registration).map(|parked| parked.space)
    }

    pub fn locate(&self, registration: &str) -> Result<ParkedVehicle> {
        let registration = Registration::parse(registration)?;
        let state = self.state.read();
        let space = state.find(&registration)?;
        debug!(%registration, space, "vehicle located");
        Ok(ParkedVehicle {
            space,
            vehicle: state.occupant(space)?.clone(),
        })
    }

    /// What the vehicle would pay if retrieved now.
    pub fn quote(&self, registration: &str) -> Result<Fee> {
        let registration = Registration::parse(registration)?;
        let state = self.state.read();
        let vehicle = state.occupant(state.find(&registration)?)?;
        compute_fee(
            vehicle.kind,
            self.clock.now() - vehicle.arrived_at,
            &state.rates,
        )
    }

    pub fn move_vehicle(
        &self,
        registration: &str,
        target: Option<SpaceIndex>,
    ) -> Result<Relocation> {
        let registration = Registration::parse(registration)?;
        let mut state = self.state.write();

        let from = state.find(&registration)?;
        let to = match target {
            Some(index) => {
                let space = state.pool.get(index)?;
                if index == from {
                    return Err(ParkadeError::InvalidTarget {
                        index,
                        reason: TargetRejection::SameSpace,
                    });
                }
                if !space.is_free() {
                    return Err(ParkadeError::InvalidTarget {
                        index,
                        reason: TargetRejection::Occupied,
                    });
                }
                index
            }
            None => state
                .pool
                .find_free_space_except(from)
                .ok_or(ParkadeError::GarageFull)?,
        };

        let vehicle = state.pool.release(from)?;
        state.pool.occupy(to, vehicle)?;

        info!(%registration, from, to, "vehicle moved");
        Ok(Relocation {
            registration,
            from,
            to,
        })
    }

    pub fn status(&self) -> Vec<SpaceStatus> {
        self.state.read().pool.statuses()
    }

    pub fn summary(&self) -> Occupancy {
        let state = self.state.read();
        Occupancy {
            capacity: state.pool.capacity(),
            occupied: state.pool.occupied_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeDelta;
    use std::sync::Arc;
    use std::thread;

    fn rates() -> RateTable {
        RateTable::new()
            .with_rate(VehicleKind::Car, 20)
            .with_rate(VehicleKind::Motorcycle, 10)
            .with_rate(VehicleKind::Bus, 30)
            .with_rate(VehicleKind::Bicycle, 5)
    }

    fn garage(capacity: usize) -> (Garage<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        let garage = Garage::with_clock(capacity, rates(), clock.clone()).unwrap();
        (garage, clock)
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Garage::new(0, rates()).err().unwrap();
        assert!(matches!(err, ParkadeError::InvalidCapacity(0)));
    }

    #[test]
    fn rejects_incomplete_rate_table() {
        let partial = RateTable::new().with_rate(VehicleKind::Car, 20);
        let err = Garage::new(3, partial).err().unwrap();
        assert!(matches!(err, ParkadeError::UnknownVehicleKind(_)));
    }

    #[test]
    fn parks_into_successive_spaces() {
        let (garage, _) = garage(5);
        for expected in 0..5 {
            let reg = format!("CAR{}", expected);
            assert_eq!(garage.park(VehicleKind::Car, &reg).unwrap(), expected);
        }
    }

    #[test]
    fn admit_returns_the_committed_placement() {
        let (garage, clock) = garage(3);
        garage.park(VehicleKind::Car, "A").unwrap();

        let parked = garage.admit(VehicleKind::Motorcycle, " mc9 ").unwrap();
        assert_eq!(parked.space, 1);
        assert_eq!(parked.vehicle.registration.as_str(), "MC9");
        assert_eq!(parked.vehicle.kind, VehicleKind::Motorcycle);
        assert_eq!(parked.vehicle.arrived_at, clock.now());
        assert_eq!(garage.locate("MC9").unwrap(), parked);
    }

    #[test]
    fn parks_into_lowest_freed_space() {
        let (garage, _) = garage(3);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.park(VehicleKind::Car, "B").unwrap();
        garage.park(VehicleKind::Car, "C").unwrap();
        garage.retrieve("B").unwrap();
        assert_eq!(garage.park(VehicleKind::Bus, "D").unwrap(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected_case_insensitively() {
        let (garage, _) = garage(3);
        garage.park(VehicleKind::Car, "abc123").unwrap();
        let err = garage.park(VehicleKind::Motorcycle, "ABC123").unwrap_err();
        assert!(matches!(err, ParkadeError::DuplicateVehicle(ref r) if r == "ABC123"));
        assert_eq!(garage.summary().occupied, 1);
    }

    #[test]
    fn full_garage_rejects_park() {
        let (garage, _) = garage(1);
        garage.park(VehicleKind::Car, "ONE").unwrap();
        let err = garage.park(VehicleKind::Car, "TWO").unwrap_err();
        assert!(matches!(err, ParkadeError::GarageFull));
        assert!(garage.summary().is_full());
    }

    #[test]
    fn blank_registration_is_rejected() {
        let (garage, _) = garage(1);
        let err = garage.park(VehicleKind::Car, "  ").unwrap_err();
        assert!(matches!(err, ParkadeError::InvalidRegistration(_)));
        assert_eq!(garage.summary().occupied, 0);
    }

    #[test]
    fn immediate_retrieve_charges_one_unit_and_frees_space() {
        let (garage, _) = garage(2);
        let space = garage.park(VehicleKind::Car, "ABC123").unwrap();

        let retrieval = garage.retrieve("abc123").unwrap();
        assert_eq!(retrieval.space, space);
        assert_eq!(retrieval.fee.amount, 20);
        assert_eq!(retrieval.fee.units, 1);
        assert_eq!(retrieval.vehicle.registration.as_str(), "ABC123");
        assert!(!garage.status()[space].is_occupied());
    }

    #[test]
    fn retrieve_bills_started_hours() {
        let (garage, clock) = garage(2);
        garage.park(VehicleKind::Motorcycle, "MC1").unwrap();
        clock.advance(TimeDelta::minutes(125));

        let retrieval = garage.retrieve("mc1").unwrap();
        assert_eq!(retrieval.fee.units, 3);
        assert_eq!(retrieval.fee.amount, 30);
        assert_eq!(
            retrieval.departed_at - retrieval.vehicle.arrived_at,
            TimeDelta::minutes(125)
        );
    }

    #[test]
    fn move_preserves_arrival_time() {
        let (garage, clock) = garage(3);
        garage.park(VehicleKind::Car, "KEEP").unwrap();
        let arrived = garage.locate("KEEP").unwrap().vehicle.arrived_at;

        clock.advance(TimeDelta::minutes(90));
        let moved = garage.move_vehicle("keep", Some(2)).unwrap();
        assert_eq!((moved.from, moved.to), (0, 2));
        assert_eq!(garage.locate("KEEP").unwrap().vehicle.arrived_at, arrived);

        clock.advance(TimeDelta::minutes(45));
        let retrieval = garage.retrieve("KEEP").unwrap();
        assert_eq!(retrieval.space, 2);
        assert_eq!(retrieval.fee.units, 3);
        assert_eq!(retrieval.fee.amount, 60);
    }

    #[test]
    fn move_without_target_picks_lowest_other_free_space() {
        let (garage, _) = garage(4);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.park(VehicleKind::Car, "B").unwrap();
        garage.retrieve("A").unwrap();

        let moved = garage.move_vehicle("B", None).unwrap();
        assert_eq!((moved.from, moved.to), (1, 0));

        let moved = garage.move_vehicle("B", None).unwrap();
        assert_eq!((moved.from, moved.to), (0, 1));
    }

    #[test]
    fn move_without_target_in_full_garage_fails() {
        let (garage, _) = garage(2);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.park(VehicleKind::Car, "B").unwrap();
        let err = garage.move_vehicle("A", None).unwrap_err();
        assert!(matches!(err, ParkadeError::GarageFull));
    }

    #[test]
    fn move_rejects_invalid_targets() {
        let (garage, _) = garage(3);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.park(VehicleKind::Car, "B").unwrap();
        let before = garage.status();

        let err = garage.move_vehicle("A", Some(0)).unwrap_err();
        assert!(matches!(
            err,
            ParkadeError::InvalidTarget {
                index: 0,
                reason: TargetRejection::SameSpace
            }
        ));

        let err = garage.move_vehicle("A", Some(1)).unwrap_err();
        assert!(matches!(
            err,
            ParkadeError::InvalidTarget {
                index: 1,
                reason: TargetRejection::Occupied
            }
        ));

        let err = garage.move_vehicle("A", Some(3)).unwrap_err();
        assert!(matches!(
            err,
            ParkadeError::InvalidTarget {
                index: 3,
                reason: TargetRejection::OutOfRange { capacity: 3 }
            }
        ));

        assert_eq!(garage.status(), before);
    }

    #[test]
    fn unknown_vehicle_operations_fail_without_side_effects() {
        let (garage, _) = garage(2);
        garage.park(VehicleKind::Car, "HERE").unwrap();
        let before = garage.status();

        assert!(matches!(
            garage.retrieve("GHOST"),
            Err(ParkadeError::VehicleNotFound(_))
        ));
        assert!(matches!(
            garage.search("GHOST"),
            Err(ParkadeError::VehicleNotFound(_))
        ));
        assert!(matches!(
            garage.move_vehicle("GHOST", Some(1)),
            Err(ParkadeError::VehicleNotFound(_))
        ));
        assert!(matches!(
            garage.quote("GHOST"),
            Err(ParkadeError::VehicleNotFound(_))
        ));

        assert_eq!(garage.status(), before);
    }

    #[test]
    fn search_is_non_destructive() {
        let (garage, clock) = garage(3);
        garage.park(VehicleKind::Bus, "BUS1").unwrap();
        garage.park(VehicleKind::Bicycle, "BIKE1").unwrap();
        let before = garage.status();

        for _ in 0..10 {
            assert_eq!(garage.search("bike1").unwrap(), 1);
        }
        assert_eq!(garage.status(), before);

        clock.advance(TimeDelta::minutes(30));
        let retrieval = garage.retrieve("BIKE1").unwrap();
        assert_eq!(retrieval.fee.amount, 5);
    }

    #[test]
    fn quote_matches_retrieval_fee() {
        let (garage, clock) = garage(1);
        garage.park(VehicleKind::Bus, "Q").unwrap();
        clock.advance(TimeDelta::hours(4));
        let quote = garage.quote("q").unwrap();
        assert_eq!(quote.amount, 120);
        assert_eq!(garage.retrieve("q").unwrap().fee, quote);
    }

    #[test]
    fn status_lists_every_space_in_order() {
        let (garage, _) = garage(3);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.move_vehicle("A", Some(2)).unwrap();

        let status = garage.status();
        assert_eq!(status.len(), 3);
        assert_eq!(
            status.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(!status[0].is_occupied());
        let occupant = status[2].occupant.as_ref().unwrap();
        assert_eq!(occupant.registration.as_str(), "A");
        assert_eq!(occupant.kind, VehicleKind::Car);
    }

    #[test]
    fn snapshot_round_trips_through_restore() {
        let (garage, clock) = garage(4);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.park(VehicleKind::Bus, "B").unwrap();
        garage.move_vehicle("A", Some(3)).unwrap();

        let restored = Garage::restore(&garage.snapshot(), rates(), clock).unwrap();
        assert_eq!(restored.status(), garage.status());
        assert_eq!(restored.capacity(), 4);
    }

    #[test]
    fn restore_rejects_corrupt_snapshots() {
        let (garage, clock) = garage(2);
        garage.park(VehicleKind::Car, "A").unwrap();
        let good = garage.snapshot();
        let parked = good.vehicles[0].clone();

        let mut same_space = good.clone();
        let mut other = parked.clone();
        other.vehicle.registration = Registration::parse("B").unwrap();
        same_space.vehicles.push(other);
        assert!(matches!(
            Garage::restore(&same_space, rates(), clock.clone()),
            Err(ParkadeError::SpaceAlreadyOccupied(0))
        ));

        let mut duplicate = good.clone();
        let mut twin = parked.clone();
        twin.space = 1;
        duplicate.vehicles.push(twin);
        assert!(matches!(
            Garage::restore(&duplicate, rates(), clock.clone()),
            Err(ParkadeError::DuplicateVehicle(_))
        ));

        let mut out_of_range = good;
        out_of_range.vehicles[0].space = 7;
        assert!(matches!(
            Garage::restore(&out_of_range, rates(), clock),
            Err(ParkadeError::InvalidTarget { index: 7, .. })
        ));
    }

    #[test]
    fn set_rates_applies_to_parked_vehicles() {
        let (garage, _) = garage(1);
        garage.park(VehicleKind::Car, "A").unwrap();
        garage
            .set_rates(rates().with_rate(VehicleKind::Car, 50))
            .unwrap();
        assert_eq!(garage.retrieve("A").unwrap().fee.amount, 50);
        assert!(garage.set_rates(RateTable::new()).is_err());
    }

    #[test]
    fn concurrent_parks_never_share_a_space() {
        let capacity = 64;
        let garage = Arc::new(Garage::new(capacity, rates()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let garage = Arc::clone(&garage);
                thread::spawn(move || {
                    (0..10)
                        .filter_map(|i| garage.park(VehicleKind::Car, &format!("T{}-{}", t, i)).ok())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut spaces: Vec<SpaceIndex> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        spaces.sort_unstable();
        spaces.dedup();

        assert_eq!(spaces.len(), capacity);
        assert_eq!(garage.summary().occupied, capacity);
        assert!(garage.summary().is_full());
    }

    #[test]
    fn occupancy_never_exceeds_capacity() {
        let (garage, _) = garage(3);
        for i in 0..10 {
            let reg = format!("V{}", i);
            let _ = garage.park(VehicleKind::Car, &reg);
            if i % 3 == 0 {
                let _ = garage.retrieve(&format!("V{}", i / 2));
            }
            let _ = garage.move_vehicle(&reg, None);
            let summary = garage.summary();
            assert!(summary.occupied <= summary.capacity);
            assert_eq!(
                garage.status().iter().filter(|s| s.is_occupied()).count(),
                summary.occupied
            );
        }
    }
}
