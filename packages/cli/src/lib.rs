//! # gopherkv-cli
//!
//! The `gopher2kv` command: compile a directory tree into the keys Redis
//! needs to serve it in Gopher mode.
//!
//! ## Usage
//!
//! ```bash
//! # See what would be written
//! gopher2kv --host 127.0.0.1 --port 6379 --root ~/phlog --dry-run
//!
//! # Write, advertising the public host in menus
//! gopher2kv --host 127.0.0.1 --port 6379 --root ~/phlog \
//!     --local-host gopher.example.net --write
//! ```
//!
//! Without `--write` the tool asks before touching Redis. The whole tree is
//! compiled into memory first, so a read error never leaves a half-written
//! store behind.

pub mod config;
pub mod run;

pub use config::{Args, Config, Mode};
pub use run::{exit_code, run, run_with, CliError, Outcome};
