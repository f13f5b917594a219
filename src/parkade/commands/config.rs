use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult, ParkadePaths};
use crate::config::Settings;
use crate::error::Result;
use crate::garage::Garage;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<C: Clock>(
    paths: &ParkadePaths,
    settings: &mut Settings,
    garage: &Garage<C>,
    action: ConfigAction,
) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_settings(settings.clone())),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match settings.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut updated = settings.clone();
            if let Err(e) = updated.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            updated.save(&paths.root)?;
            garage.set_rates(updated.pricing.rate_table())?;
            *settings = updated;

            let display_val = settings.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_settings(settings.clone());
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            if key == "spaces" && settings.garage.number_of_spaces != garage.capacity() {
                result.add_message(CmdMessage::info(
                    "New capacity applies once every parked vehicle fits within it",
                ));
            }
            Ok(result)
        }
    }
}
