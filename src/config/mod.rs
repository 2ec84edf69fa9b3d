//! Execution configuration for the isolation engine
//!
//! Normalizes the parsed launcher invocation into one immutable [`Config`]
//! record with correct default substitution and sentinel handling.

pub mod builder;
pub mod limit;

pub use builder::{build, build_with_identity};
pub use limit::Limit;

use serde::Serialize;

/// Default stack ceiling when the caller supplies none (or zero): 16 MiB.
/// The stack is the one limit that never falls back to `Unlimited`.
pub const DEFAULT_MAX_STACK: u64 = 16 * 1024 * 1024;

pub const DEFAULT_INPUT_PATH: &str = "/dev/stdin";
pub const DEFAULT_OUTPUT_PATH: &str = "/dev/stdout";
pub const DEFAULT_LOG_PATH: &str = "sandbox.log";

/// Maximum entries accepted in each of the argument and environment lists,
/// and the cap applied when inheriting the launcher's own environment.
pub const MAX_LIST_ENTRIES: usize = 255;

/// The launcher invocation as the argument parser delivered it: every field
/// optional except the executable path, unsupplied values distinguishable
/// from supplied-but-zero/empty ones. One immutable value threaded into the
/// builder; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    pub max_cpu_time: Option<u64>,
    pub max_real_time: Option<u64>,
    pub max_memory: Option<u64>,
    pub max_stack: Option<u64>,
    pub max_process_number: Option<u64>,
    pub max_output_size: Option<u64>,
    pub exe_path: String,
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub log_path: Option<String>,
    pub exe_args: Vec<String>,
    pub exe_envs: Vec<String>,
    pub seccomp_rules: Option<String>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub print_args: Option<u32>,
}

/// The fully-normalized execution config handed to the isolation engine.
///
/// Built exactly once per invocation and never mutated afterward. Serializes
/// to a structured encoding in which [`Limit::Unlimited`] and an absent
/// seccomp profile are both `null`, distinct from any finite number and from
/// an empty string respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Max CPU time of the child, in milliseconds.
    pub max_cpu_time: Limit,
    /// Max wall-clock time of the child, in milliseconds.
    pub max_real_time: Limit,
    /// Max address space, in bytes.
    pub max_memory: Limit,
    /// Max stack size, in bytes. Always finite.
    pub max_stack: Limit,
    /// Max number of processes the child may create.
    pub max_process_number: Limit,
    /// Max bytes the child may write, in bytes.
    pub max_output_size: Limit,

    /// Executable to confine. Never empty.
    pub exe_path: String,
    pub input_path: String,
    pub output_path: String,
    pub log_path: String,

    /// argv for the child: `exe_path` at position 0, then the user-supplied
    /// arguments in invocation order.
    pub exe_args: Vec<String>,
    /// envp for the child as `KEY=VALUE` entries: the explicitly supplied
    /// ones, or a capped snapshot of the launcher's environment.
    pub exe_envs: Vec<String>,

    /// Seccomp profile name. `None` means no filtering was requested.
    pub seccomp_rules: Option<String>,

    pub uid: u32,
    pub gid: u32,

    /// Render the built config on stdout before handing off.
    pub print_args: bool,
}
