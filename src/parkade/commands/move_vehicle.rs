use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::garage::Garage;
use crate::model::SpaceIndex;

pub fn run<C: Clock>(
    garage: &Garage<C>,
    registration: &str,
    target: Option<SpaceIndex>,
) -> Result<CmdResult> {
    let relocation = garage.move_vehicle(registration, target)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved {} from space {} to space {}",
        relocation.registration, relocation.from, relocation.to
    )));
    Ok(result.with_relocation(relocation))
}
