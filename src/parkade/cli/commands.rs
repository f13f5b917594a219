use super::logging;
use super::render::{print_messages, print_settings, print_status};
use super::setup::{Cli, Commands};
use clap::Parser;
use parkade::api::{ConfigAction, ParkadeApi, ParkadePaths, StatusFilter};
use parkade::clock::SystemClock;
use parkade::config::Settings;
use parkade::error::Result;
use parkade::model::VehicleKind;
use parkade::store::fs::FileStore;
use tracing::debug;

struct AppContext {
    api: ParkadeApi<FileStore, SystemClock>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Park { kind, registration }) => handle_park(&mut ctx, &kind, &registration),
        Some(Commands::Retrieve { registration }) => handle_retrieve(&mut ctx, &registration),
        Some(Commands::Search { registration }) => handle_search(&ctx, &registration),
        Some(Commands::Move { registration, to }) => handle_move(&mut ctx, &registration, to),
        Some(Commands::Status { occupied, free }) => {
            let filter = if occupied {
                StatusFilter::Occupied
            } else if free {
                StatusFilter::Free
            } else {
                StatusFilter::All
            };
            handle_status(&ctx, filter)
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        None => handle_status(&ctx, StatusFilter::All),
    }
}

fn init_context() -> Result<AppContext> {
    let paths = ParkadePaths::resolve()?;
    debug!(root = %paths.root.display(), "using data directory");

    let settings = Settings::load_or_create(&paths.root)?;
    let store = FileStore::new(paths.root.clone());
    let api = ParkadeApi::open(store, settings, paths, SystemClock)?;
    Ok(AppContext { api })
}

fn handle_park(ctx: &mut AppContext, kind: &str, registration: &str) -> Result<()> {
    let kind: VehicleKind = kind.parse()?;
    let result = ctx.api.park(kind, registration)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_retrieve(ctx: &mut AppContext, registration: &str) -> Result<()> {
    let result = ctx.api.retrieve(registration)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, registration: &str) -> Result<()> {
    let result = ctx.api.search(registration)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, registration: &str, to: Option<usize>) -> Result<()> {
    let result = ctx.api.move_vehicle(registration, to)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext, filter: StatusFilter) -> Result<()> {
    let result = ctx.api.status(filter)?;
    print_status(&result.spaces, result.occupancy);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(settings) = &result.settings {
            print_settings(&settings.list_all());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
