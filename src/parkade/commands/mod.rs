use crate::config::{Settings, CONFIG_FILENAME, PRICING_FILENAME};
use crate::error::{ParkadeError, Result};
use crate::fees::Fee;
use crate::garage::{Relocation, Retrieval};
use crate::model::{Occupancy, ParkedVehicle, SpaceStatus};
use crate::store::fs::STATE_FILENAME;
use directories::ProjectDirs;
use std::path::PathBuf;

pub mod config;
pub mod init;
pub mod move_vehicle;
pub mod park;
pub mod retrieve;
pub mod search;
pub mod status;

/// Overrides the data directory (used by tests and by anyone running several
/// garages side by side).
pub const HOME_ENV: &str = "PARKADE_HOME";

#[derive(Debug, Clone)]
pub struct ParkadePaths {
    pub root: PathBuf,
}

impl ParkadePaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `$PARKADE_HOME` if set, otherwise the platform data directory.
    pub fn resolve() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(home)));
        }
        let dirs = ProjectDirs::from("com", "parkade", "parkade").ok_or_else(|| {
            ParkadeError::Config("Could not determine a data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    pub fn pricing_file(&self) -> PathBuf {
        self.root.join(PRICING_FILENAME)
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join(STATE_FILENAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub spaces: Vec<SpaceStatus>,
    pub located: Option<ParkedVehicle>,
    pub quote: Option<Fee>,
    pub receipt: Option<Retrieval>,
    pub relocation: Option<Relocation>,
    pub occupancy: Option<Occupancy>,
    pub settings: Option<Settings>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_spaces(mut self, spaces: Vec<SpaceStatus>) -> Self {
        self.spaces = spaces;
        self
    }

    pub fn with_located(mut self, parked: ParkedVehicle) -> Self {
        self.located = Some(parked);
        self
    }

    pub fn with_quote(mut self, fee: Fee) -> Self {
        self.quote = Some(fee);
        self
    }

    pub fn with_receipt(mut self, receipt: Retrieval) -> Self {
        self.receipt = Some(receipt);
        self
    }

    pub fn with_relocation(mut self, relocation: Relocation) -> Self {
        self.relocation = Some(relocation);
        self
    }

    pub fn with_occupancy(mut self, occupancy: Occupancy) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Formats an amount with the configured currency, e.g. "40 SEK".
pub fn format_amount(amount: u64, currency: &str) -> String {
    format!("{} {}", amount, currency)
}
