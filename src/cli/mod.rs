//! Command-line interface for the sandbox launcher
//!
//! Parses the invocation (snake_case long options, matching the launcher's
//! historical flag spelling), normalizes it into the execution config, and
//! optionally prints the result.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{self, ParsedArgs};
use crate::report;

/// Run an executable under resource and syscall confinement
#[derive(Parser)]
#[command(name = "sandbox-launcher")]
#[command(author, version, about, long_about = None)]
#[command(rename_all = "snake_case")]
pub struct Cli {
    /// Max cpu running time (ms, 0 for no limit)
    #[arg(long, value_name = "MS")]
    pub max_cpu_time: Option<u64>,

    /// Max real running time (ms, 0 for no limit)
    #[arg(long, value_name = "MS")]
    pub max_real_time: Option<u64>,

    /// Max memory (byte, 0 for no limit)
    #[arg(long, value_name = "BYTES")]
    pub max_memory: Option<u64>,

    /// Max stack size (byte, default 16384K)
    #[arg(long, value_name = "BYTES")]
    pub max_stack: Option<u64>,

    /// Max number of processes (0 for no limit)
    #[arg(long, value_name = "N")]
    pub max_process_number: Option<u64>,

    /// Max output size (byte, 0 for no limit)
    #[arg(long, value_name = "BYTES")]
    pub max_output_size: Option<u64>,

    /// Executable file path
    #[arg(long, value_name = "PATH")]
    pub exe_path: String,

    /// Input file path (default /dev/stdin)
    #[arg(long, value_name = "PATH")]
    pub input_path: Option<String>,

    /// Output file path (default /dev/stdout)
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<String>,

    /// Log file path (default sandbox.log)
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<String>,

    /// Argument for the executable (repeatable, in order)
    #[arg(long, value_name = "ARG")]
    pub exe_args: Vec<String>,

    /// KEY=VALUE environment entry for the executable (repeatable; none
    /// supplied means the launcher's environment is inherited)
    #[arg(long, value_name = "ENV")]
    pub exe_envs: Vec<String>,

    /// Seccomp rules profile name
    #[arg(long, value_name = "NAME")]
    pub seccomp_rules: Option<String>,

    /// Print the built config on stdout (nonzero enables)
    #[arg(long, value_name = "0|1")]
    pub print_args: Option<u32>,

    /// UID for the executable (default `nobody`)
    #[arg(long, value_name = "UID")]
    pub uid: Option<u32>,

    /// GID for the executable (default `nobody`)
    #[arg(long, value_name = "GID")]
    pub gid: Option<u32>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn into_parsed_args(self) -> ParsedArgs {
        ParsedArgs {
            max_cpu_time: self.max_cpu_time,
            max_real_time: self.max_real_time,
            max_memory: self.max_memory,
            max_stack: self.max_stack,
            max_process_number: self.max_process_number,
            max_output_size: self.max_output_size,
            exe_path: self.exe_path,
            input_path: self.input_path,
            output_path: self.output_path,
            log_path: self.log_path,
            exe_args: self.exe_args,
            exe_envs: self.exe_envs,
            seccomp_rules: self.seccomp_rules,
            uid: self.uid,
            gid: self.gid,
            print_args: self.print_args,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = config::build(&cli.into_parsed_args())?;
    tracing::debug!(exe_path = %config.exe_path, "invocation normalized");

    if config.print_args {
        report::print(&config);
    }

    Ok(())
}
