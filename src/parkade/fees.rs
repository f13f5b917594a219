//! # Fee Calculation
//!
//! Parking is billed per started billing unit (one hour). A stay of one second
//! and a stay of exactly one hour both cost one unit; a stay of one hour and
//! one second costs two. Zero or negative durations (clock skew, restored
//! snapshots from the future) are billed as one unit, so a quick exit is never
//! free.
//!
//! Rates live in a [`RateTable`] keyed by [`VehicleKind`].

use crate::error::{ParkadeError, Result};
use crate::model::VehicleKind;
use chrono::TimeDelta;
use std::collections::BTreeMap;

/// Hourly rate, in whole currency units.
pub type Rate = u64;

/// The billing granularity.
pub const BILLING_UNIT: TimeDelta = TimeDelta::hours(1);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<VehicleKind, Rate>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, kind: VehicleKind, rate: Rate) -> Self {
        self.rates.insert(kind, rate);
        self
    }

    pub fn rate(&self, kind: VehicleKind) -> Result<Rate> {
        self.rates
            .get(&kind)
            .copied()
            .ok_or_else(|| ParkadeError::UnknownVehicleKind(kind.to_string()))
    }

    /// Fails with the first kind that has no rate.
    pub fn ensure_complete(&self) -> Result<()> {
        for kind in VehicleKind::ALL {
            self.rate(kind)?;
        }
        Ok(())
    }
}

/// Amount due for one stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fee {
    pub amount: u64,
    pub units: u64,
    pub hourly_rate: Rate,
}

/// Number of started billing units in `elapsed`, never less than one.
pub fn billable_units(elapsed: TimeDelta) -> u64 {
    if elapsed <= TimeDelta::zero() {
        return 1;
    }
    let unit = BILLING_UNIT.num_seconds();
    let whole = elapsed.num_seconds() / unit;
    // Compare at full precision so sub-second overruns still start a unit.
    if elapsed > TimeDelta::seconds(whole * unit) {
        whole as u64 + 1
    } else {
        whole as u64
    }
}

pub fn compute_fee(kind: VehicleKind, elapsed: TimeDelta, rates: &RateTable) -> Result<Fee> {
    let hourly_rate = rates.rate(kind)?;
    let units = billable_units(elapsed);
    Ok(Fee {
        amount: hourly_rate.saturating_mul(units),
        units,
        hourly_rate,
    })
}
