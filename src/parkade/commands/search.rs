use crate::clock::Clock;
use crate::commands::{format_amount, CmdMessage, CmdResult};
use crate::error::Result;
use crate::garage::Garage;

pub fn run<C: Clock>(garage: &Garage<C>, registration: &str, currency: &str) -> Result<CmdResult> {
    let parked = garage.locate(registration)?;
    let quote = garage.quote(registration)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} is parked in space {}",
        parked.vehicle.kind, parked.vehicle.registration, parked.space
    )));
    result.add_message(CmdMessage::info(format!(
        "Arrived {}",
        parked.vehicle.arrived_at.format("%Y-%m-%d %H:%M UTC")
    )));
    result.add_message(CmdMessage::info(format!(
        "Fee if retrieved now: {}",
        format_amount(quote.amount, currency)
    )));
    Ok(result.with_located(parked).with_quote(quote))
}
