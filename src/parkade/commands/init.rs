use crate::commands::{CmdMessage, CmdResult, ParkadePaths};
use crate::config::Settings;
use crate::error::Result;
use std::fs;

pub fn run(paths: &ParkadePaths) -> Result<CmdResult> {
    fs::create_dir_all(&paths.root)?;
    let settings = Settings::load_or_create(&paths.root)?;

    let mut result = CmdResult::default().with_settings(settings);
    result.add_message(CmdMessage::success(format!(
        "Initialized parkade at {}",
        paths.root.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Configuration: {}",
        paths.config_file().display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Price list: {}",
        paths.pricing_file().display()
    )));
    Ok(result)
}
