//! # Parkade Architecture
//!
//! Parkade is a **UI-agnostic parking garage engine**. The command-line tool
//! shipped with it is one client of the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, installs logging       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Opens the garage from store + config                     │
//! │  - Dispatches to commands, persists after mutations         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Wraps one garage operation, adds user-facing messages    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (garage.rs, pool.rs, fees.rs, model.rs)             │
//! │  - First-fit allocation, hourly billing, invariants         │
//! │  - One RwLock around all state; no I/O at all               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage (`store/`) sits beside the API layer: the engine produces and
//! accepts snapshots, the store reads and writes them.
//!
//! ## Using the Engine Directly
//!
//! ```rust
//! use parkade::fees::RateTable;
//! use parkade::garage::Garage;
//! use parkade::model::VehicleKind;
//!
//! let rates = VehicleKind::ALL
//!     .into_iter()
//!     .fold(RateTable::new(), |t, kind| t.with_rate(kind, 20));
//! let garage = Garage::new(10, rates).unwrap();
//!
//! assert_eq!(garage.park(VehicleKind::Car, "abc123").unwrap(), 0);
//! assert_eq!(garage.search("ABC123").unwrap(), 0);
//!
//! let retrieval = garage.retrieve("Abc123").unwrap();
//! assert_eq!(retrieval.fee.amount, 20);
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for UI clients
//! - [`commands`]: One module per user-facing operation
//! - [`garage`]: The allocator: park, retrieve, search, move, status
//! - [`pool`]: Space bookkeeping
//! - [`fees`]: Rate table and fee computation
//! - [`model`]: Vehicles, registrations, space status
//! - [`clock`]: Time source (system or manual)
//! - [`config`]: `config.json` and `pricelist.json`
//! - [`store`]: Snapshot persistence
//! - [`error`]: Error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod fees;
pub mod garage;
pub mod model;
pub mod pool;
pub mod store;
