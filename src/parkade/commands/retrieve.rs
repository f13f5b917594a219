use crate::clock::Clock;
use crate::commands::{format_amount, CmdMessage, CmdResult};
use crate::error::Result;
use crate::garage::Garage;

pub fn run<C: Clock>(garage: &Garage<C>, registration: &str, currency: &str) -> Result<CmdResult> {
    let receipt = garage.retrieve(registration)?;

    let mut result = CmdResult::default().with_occupancy(garage.summary());
    result.add_message(CmdMessage::success(format!(
        "Retrieved {} {} from space {}",
        receipt.vehicle.kind, receipt.vehicle.registration, receipt.space
    )));
    let hours = if receipt.fee.units == 1 { "hour" } else { "hours" };
    result.add_message(CmdMessage::info(format!(
        "Parking fee: {} ({} {} at {}/h)",
        format_amount(receipt.fee.amount, currency),
        receipt.fee.units,
        hours,
        receipt.fee.hourly_rate
    )));
    Ok(result.with_receipt(receipt))
}
