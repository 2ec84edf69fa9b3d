//! sandbox-launcher: normalize launcher CLI arguments into an execution config
//!
//! This crate turns the raw, optionally-absent command-line values of a
//! process-execution sandbox launcher into one immutable [`config::Config`]
//! record: resource ceilings with an explicit [`config::Limit::Unlimited`]
//! sentinel, default path substitution, quote stripping, argv/envp assembly,
//! and unprivileged-account identity resolution. Enforcement of the resulting
//! config is the isolation engine's job, not this crate's.

pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod report;
pub mod utils;
