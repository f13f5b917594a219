//! # CLI Behavior
//!
//! This is **one possible UI client** for parkade. The CLI is the only place
//! that knows about terminal I/O, exit codes, logging setup and output
//! formatting. For the overall architecture, see the crate-level docs.
//!
//! ## One Invocation, One Operation
//!
//! Every invocation opens the garage from `garage.json`, runs a single
//! operation and exits. Mutations are saved before the process ends, so
//! `parkade park car ABC123` followed by `parkade retrieve abc123` bills the
//! time between the two calls.
//!
//! Running `parkade` with no arguments shows the garage status.
//!
//! ## Data Directory
//!
//! Configuration, price list and garage state live in `$PARKADE_HOME` when
//! set, otherwise in the platform data directory.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `PARKADE_LOG` takes an
//! `EnvFilter` directive; without it, `--verbose` enables debug output and the
//! default shows warnings only.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print output
//! - `render`: Output formatting (status table, messages, settings)
//! - `setup`: Argument parsing via clap
//! - `logging`: tracing subscriber setup

mod commands;
mod logging;
mod render;
mod setup;

pub use commands::run;
