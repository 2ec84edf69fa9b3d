//! Diagnostic rendering of a built config
//!
//! A pure read-only projection: one `name: value` line per scalar field, one
//! indexed line per list element. Requested with `--print_args`, written to
//! stdout, and without any effect on the config itself.

use std::fmt::Write;

use crate::config::Config;

/// Render every field of `config` in the launcher's line-oriented format.
/// Absent string fields render as the literal `(null)`, unlimited ceilings
/// as `unlimited`.
pub fn render(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "max_cpu_time: {}", config.max_cpu_time);
    let _ = writeln!(out, "max_real_time: {}", config.max_real_time);
    let _ = writeln!(out, "max_memory: {}", config.max_memory);
    let _ = writeln!(out, "max_stack: {}", config.max_stack);
    let _ = writeln!(out, "max_process_number: {}", config.max_process_number);
    let _ = writeln!(out, "max_output_size: {}", config.max_output_size);
    let _ = writeln!(out, "exe_path: {}", config.exe_path);
    let _ = writeln!(out, "input_path: {}", config.input_path);
    let _ = writeln!(out, "output_path: {}", config.output_path);
    let _ = writeln!(out, "log_path: {}", config.log_path);
    for (i, arg) in config.exe_args.iter().enumerate() {
        let _ = writeln!(out, "exe_args[{}]: {}", i, arg);
    }
    for (i, env) in config.exe_envs.iter().enumerate() {
        let _ = writeln!(out, "exe_envs[{}]: {}", i, env);
    }
    let _ = writeln!(out, "seccomp_rules: {}", config.seccomp_rules.as_deref().unwrap_or("(null)"));
    let _ = writeln!(out, "uid: {}", config.uid);
    let _ = writeln!(out, "gid: {}", config.gid);
    let _ = writeln!(out, "print_args: {}", u8::from(config.print_args));
    out
}

pub fn print(config: &Config) {
    print!("{}", render(config));
}
