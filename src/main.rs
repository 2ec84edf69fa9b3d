//! sandbox-launcher: CLI front-end for the process-isolation engine
//!
//! Parses the launcher invocation and normalizes it into the execution
//! config the isolation engine consumes.

use anyhow::Result;

fn main() -> Result<()> {
    sandbox_launcher::cli::run()
}
