use clap::{Parser, Subcommand};

/// "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "parkade", bin_name = "parkade", version = get_version())]
#[command(about = "Park, find, move and retrieve vehicles in a fixed-size garage", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Park a vehicle in the first free space
    #[command(alias = "p", display_order = 1)]
    Park {
        /// Vehicle kind: CAR, MC, BUS or BIKE
        kind: String,

        /// Registration number (case-insensitive)
        registration: String,
    },

    /// Retrieve a vehicle and pay the parking fee
    #[command(aliases = ["r", "checkout"], display_order = 2)]
    Retrieve {
        /// Registration number (case-insensitive)
        registration: String,
    },

    /// Find where a vehicle is parked
    #[command(aliases = ["s", "find"], display_order = 3)]
    Search {
        /// Registration number (case-insensitive)
        registration: String,
    },

    /// Move a vehicle to another space
    #[command(alias = "mv", display_order = 4)]
    Move {
        /// Registration number (case-insensitive)
        registration: String,

        /// Target space (defaults to the first other free space)
        #[arg(short, long, value_name = "SPACE")]
        to: Option<usize>,
    },

    /// Show every space and who occupies it
    #[command(alias = "ls", display_order = 5)]
    Status {
        /// Only show occupied spaces
        #[arg(long, conflicts_with = "free")]
        occupied: bool,

        /// Only show free spaces
        #[arg(long)]
        free: bool,
    },

    /// Get or set configuration
    #[command(display_order = 10)]
    Config {
        /// Configuration key (spaces, rate.car, rate.mc, rate.bus, rate.bike, currency)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the data directory and default configuration
    #[command(display_order = 11)]
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_park() {
        let cli = Cli::try_parse_from(["parkade", "park", "mc", "abc123"]).unwrap();
        match cli.command {
            Some(Commands::Park { kind, registration }) => {
                assert_eq!(kind, "mc");
                assert_eq!(registration, "abc123");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_move_with_target_and_alias() {
        let cli = Cli::try_parse_from(["parkade", "mv", "ABC", "--to", "4"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Move { to: Some(4), .. })
        ));
    }

    #[test]
    fn status_filters_conflict() {
        assert!(Cli::try_parse_from(["parkade", "status", "--occupied", "--free"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["parkade", "status", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["parkade"]).unwrap();
        assert!(cli.command.is_none());
    }
}
