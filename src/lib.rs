#![cfg_attr(not(test), deny(clippy::unwrap_used))]
//! `pgql` command-line front end: routes `version`, `init` and `generate`
//! and works out which config file each of them should use.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod process;
pub mod router;

pub use router::{run, run_with};
