use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::garage::Garage;
use crate::model::VehicleKind;

pub fn run<C: Clock>(garage: &Garage<C>, kind: VehicleKind, registration: &str) -> Result<CmdResult> {
    let parked = garage.admit(kind, registration)?;
    let occupancy = garage.summary();

    let mut result = CmdResult::default().with_occupancy(occupancy);
    result.add_message(CmdMessage::success(format!(
        "Parked {} {} in space {}",
        kind, parked.vehicle.registration, parked.space
    )));
    if occupancy.is_full() {
        result.add_message(CmdMessage::warning("The garage is now full"));
    }
    Ok(result.with_located(parked))
}
