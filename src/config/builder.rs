//! Invocation-to-config normalization
//!
//! Translates a [`ParsedArgs`] value into a fully-populated [`Config`]:
//! limit sentinel handling, default path substitution, quote stripping,
//! argv/envp assembly, and unprivileged-identity fallback. The only hard
//! failures are an over-long explicit list and a failed account lookup;
//! every other absent or zero input resolves to a defined default.

use crate::config::{
    Config, Limit, ParsedArgs, DEFAULT_INPUT_PATH, DEFAULT_LOG_PATH, DEFAULT_MAX_STACK,
    DEFAULT_OUTPUT_PATH, MAX_LIST_ENTRIES,
};
use crate::error::ConfigError;
use crate::identity::{self, IdentityError};
use crate::utils::strip_quotes;

/// Build the execution config, resolving a missing uid/gid through the
/// system's unprivileged account.
pub fn build(args: &ParsedArgs) -> Result<Config, ConfigError> {
    build_with_identity(args, identity::unprivileged_ids)
}

/// Build the execution config with an injected unprivileged-identity lookup.
///
/// The lookup runs at most once, and only when uid or gid was not supplied
/// explicitly.
pub fn build_with_identity<F>(args: &ParsedArgs, unprivileged: F) -> Result<Config, ConfigError>
where
    F: FnOnce() -> Result<(u32, u32), IdentityError>,
{
    check_list_cap("exe_args", args.exe_args.len())?;
    check_list_cap("exe_envs", args.exe_envs.len())?;

    let exe_path = strip_quotes(&args.exe_path).to_string();

    // argv: the executable itself, then the caller's arguments in order.
    let mut exe_args = Vec::with_capacity(args.exe_args.len() + 1);
    exe_args.push(exe_path.clone());
    exe_args.extend(args.exe_args.iter().map(|a| strip_quotes(a).to_string()));

    // Explicit environment entries suppress inheritance entirely.
    let exe_envs = if args.exe_envs.is_empty() {
        inherited_environment()
    } else {
        args.exe_envs.iter().map(|e| strip_quotes(e).to_string()).collect()
    };

    let (uid, gid) = resolve_identity(args.uid, args.gid, unprivileged)?;

    Ok(Config {
        max_cpu_time: Limit::from_raw(args.max_cpu_time),
        max_real_time: Limit::from_raw(args.max_real_time),
        max_memory: Limit::from_raw(args.max_memory),
        max_stack: Limit::from_raw_or_default(args.max_stack, DEFAULT_MAX_STACK),
        max_process_number: Limit::from_raw(args.max_process_number),
        max_output_size: Limit::from_raw(args.max_output_size),
        exe_path,
        input_path: path_or_default(args.input_path.as_deref(), DEFAULT_INPUT_PATH),
        output_path: path_or_default(args.output_path.as_deref(), DEFAULT_OUTPUT_PATH),
        log_path: path_or_default(args.log_path.as_deref(), DEFAULT_LOG_PATH),
        exe_args,
        exe_envs,
        seccomp_rules: args.seccomp_rules.as_deref().map(|s| strip_quotes(s).to_string()),
        uid,
        gid,
        print_args: args.print_args.is_some_and(|v| v != 0),
    })
}

fn check_list_cap(list: &'static str, count: usize) -> Result<(), ConfigError> {
    if count > MAX_LIST_ENTRIES {
        return Err(ConfigError::TooManyEntries { list, count, max: MAX_LIST_ENTRIES });
    }
    Ok(())
}

fn path_or_default(raw: Option<&str>, default: &str) -> String {
    match raw {
        Some(p) => strip_quotes(p).to_string(),
        None => default.to_string(),
    }
}

/// Snapshot the launcher's own environment as `KEY=VALUE` entries, in native
/// enumeration order, truncated at [`MAX_LIST_ENTRIES`].
fn inherited_environment() -> Vec<String> {
    let mut entries = Vec::new();
    for (key, value) in std::env::vars() {
        if entries.len() == MAX_LIST_ENTRIES {
            tracing::warn!(
                cap = MAX_LIST_ENTRIES,
                "inherited environment exceeds the entry cap, dropping the rest"
            );
            break;
        }
        entries.push(format!("{}={}", key, value));
    }
    entries
}

/// Explicit ids are used verbatim (range checks are the engine's problem);
/// an absent one falls back to the unprivileged account, resolved lazily so
/// a fully-explicit invocation never touches the passwd database.
fn resolve_identity<F>(
    uid: Option<u32>,
    gid: Option<u32>,
    unprivileged: F,
) -> Result<(u32, u32), ConfigError>
where
    F: FnOnce() -> Result<(u32, u32), IdentityError>,
{
    match (uid, gid) {
        (Some(uid), Some(gid)) => Ok((uid, gid)),
        (uid, gid) => {
            let (fallback_uid, fallback_gid) = unprivileged()?;
            Ok((uid.unwrap_or(fallback_uid), gid.unwrap_or(fallback_gid)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOBODY: (u32, u32) = (65534, 65534);

    fn minimal_args() -> ParsedArgs {
        ParsedArgs { exe_path: "/bin/echo".to_string(), ..ParsedArgs::default() }
    }

    fn stub_nobody() -> Result<(u32, u32), IdentityError> {
        Ok(NOBODY)
    }

    #[test]
    fn test_absent_limits_default_to_unlimited_except_stack() {
        let config = build_with_identity(&minimal_args(), stub_nobody).expect("config");
        assert_eq!(config.max_cpu_time, Limit::Unlimited);
        assert_eq!(config.max_real_time, Limit::Unlimited);
        assert_eq!(config.max_memory, Limit::Unlimited);
        assert_eq!(config.max_process_number, Limit::Unlimited);
        assert_eq!(config.max_output_size, Limit::Unlimited);
        assert_eq!(config.max_stack, Limit::Limited(16 * 1024 * 1024));
    }

    #[test]
    fn test_zero_limits_resolve_like_absent_ones() {
        let args = ParsedArgs {
            max_cpu_time: Some(0),
            max_real_time: Some(0),
            max_memory: Some(0),
            max_stack: Some(0),
            max_process_number: Some(0),
            max_output_size: Some(0),
            ..minimal_args()
        };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.max_cpu_time, Limit::Unlimited);
        assert_eq!(config.max_real_time, Limit::Unlimited);
        assert_eq!(config.max_memory, Limit::Unlimited);
        assert_eq!(config.max_process_number, Limit::Unlimited);
        assert_eq!(config.max_output_size, Limit::Unlimited);
        assert_eq!(config.max_stack, Limit::Limited(16 * 1024 * 1024));
    }

    #[test]
    fn test_positive_limits_preserved_with_units() {
        let args = ParsedArgs {
            max_cpu_time: Some(1000),
            max_real_time: Some(2000),
            max_memory: Some(128 * 1024 * 1024),
            max_stack: Some(32 * 1024 * 1024),
            max_process_number: Some(4),
            max_output_size: Some(1024),
            ..minimal_args()
        };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.max_cpu_time, Limit::Limited(1000));
        assert_eq!(config.max_real_time, Limit::Limited(2000));
        assert_eq!(config.max_memory, Limit::Limited(128 * 1024 * 1024));
        assert_eq!(config.max_stack, Limit::Limited(32 * 1024 * 1024));
        assert_eq!(config.max_process_number, Limit::Limited(4));
        assert_eq!(config.max_output_size, Limit::Limited(1024));
    }

    #[test]
    fn test_paths_default_when_absent() {
        let config = build_with_identity(&minimal_args(), stub_nobody).expect("config");
        assert_eq!(config.exe_path, "/bin/echo");
        assert_eq!(config.input_path, "/dev/stdin");
        assert_eq!(config.output_path, "/dev/stdout");
        assert_eq!(config.log_path, "sandbox.log");
    }

    #[test]
    fn test_quoted_paths_are_stripped_once() {
        let args = ParsedArgs {
            exe_path: "\"/bin/ls\"".to_string(),
            input_path: Some("\"/tmp/in\"".to_string()),
            output_path: Some("/tmp/out".to_string()),
            log_path: Some("\"run.log\"".to_string()),
            ..ParsedArgs::default()
        };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.exe_path, "/bin/ls");
        assert_eq!(config.input_path, "/tmp/in");
        assert_eq!(config.output_path, "/tmp/out");
        assert_eq!(config.log_path, "run.log");
    }

    #[test]
    fn test_argv_starts_with_exe_path_and_preserves_order() {
        let args = ParsedArgs {
            exe_path: "/bin/x".to_string(),
            exe_args: vec!["a".to_string(), "b".to_string()],
            ..ParsedArgs::default()
        };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.exe_args, vec!["/bin/x", "a", "b"]);
    }

    #[test]
    fn test_argv_user_entries_are_quote_stripped() {
        let args = ParsedArgs {
            exe_args: vec!["\"-l\"".to_string(), "\"".to_string()],
            ..minimal_args()
        };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.exe_args, vec!["/bin/echo", "-l", "\""]);
    }

    #[test]
    fn test_explicit_envs_suppress_inheritance() {
        let args = ParsedArgs {
            exe_envs: vec!["\"A=1\"".to_string(), "B=2".to_string()],
            ..minimal_args()
        };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.exe_envs, vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_empty_envs_inherit_the_process_environment() {
        let snapshot: Vec<String> = std::env::vars()
            .take(MAX_LIST_ENTRIES)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        let config = build_with_identity(&minimal_args(), stub_nobody).expect("config");
        assert_eq!(config.exe_envs, snapshot);
    }

    #[test]
    fn test_seccomp_absent_is_distinct_from_empty() {
        let config = build_with_identity(&minimal_args(), stub_nobody).expect("config");
        assert_eq!(config.seccomp_rules, None);

        let args =
            ParsedArgs { seccomp_rules: Some("\"general\"".to_string()), ..minimal_args() };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.seccomp_rules.as_deref(), Some("general"));

        let args = ParsedArgs { seccomp_rules: Some(String::new()), ..minimal_args() };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!(config.seccomp_rules.as_deref(), Some(""));
    }

    #[test]
    fn test_omitted_identity_resolves_to_unprivileged_account() {
        let config = build_with_identity(&minimal_args(), stub_nobody).expect("config");
        assert_eq!((config.uid, config.gid), NOBODY);
    }

    #[test]
    fn test_explicit_identity_skips_the_lookup() {
        let args = ParsedArgs { uid: Some(1000), gid: Some(100), ..minimal_args() };
        let config = build_with_identity(&args, || {
            panic!("lookup must not run when both ids are explicit")
        })
        .expect("config");
        assert_eq!((config.uid, config.gid), (1000, 100));
    }

    #[test]
    fn test_partial_identity_overrides_only_one_field() {
        let args = ParsedArgs { uid: Some(1000), ..minimal_args() };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!((config.uid, config.gid), (1000, NOBODY.1));

        let args = ParsedArgs { gid: Some(100), ..minimal_args() };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        assert_eq!((config.uid, config.gid), (NOBODY.0, 100));
    }

    #[test]
    fn test_identity_lookup_failure_is_fatal() {
        let result = build_with_identity(&minimal_args(), || {
            Err(IdentityError::Missing { name: "nobody" })
        });
        assert!(matches!(result, Err(ConfigError::Identity(_))));
    }

    #[test]
    fn test_print_args_true_for_any_nonzero_value() {
        let config = build_with_identity(&minimal_args(), stub_nobody).expect("config");
        assert!(!config.print_args);

        let args = ParsedArgs { print_args: Some(0), ..minimal_args() };
        assert!(!build_with_identity(&args, stub_nobody).expect("config").print_args);

        let args = ParsedArgs { print_args: Some(1), ..minimal_args() };
        assert!(build_with_identity(&args, stub_nobody).expect("config").print_args);

        let args = ParsedArgs { print_args: Some(7), ..minimal_args() };
        assert!(build_with_identity(&args, stub_nobody).expect("config").print_args);
    }

    #[test]
    fn test_over_long_explicit_lists_fail_construction() {
        let args = ParsedArgs {
            exe_args: vec!["a".to_string(); MAX_LIST_ENTRIES + 1],
            ..minimal_args()
        };
        let result = build_with_identity(&args, stub_nobody);
        assert!(matches!(
            result,
            Err(ConfigError::TooManyEntries { list: "exe_args", count: 256, max: 255 })
        ));

        let args = ParsedArgs {
            exe_envs: vec!["A=1".to_string(); MAX_LIST_ENTRIES + 1],
            ..minimal_args()
        };
        let result = build_with_identity(&args, stub_nobody);
        assert!(matches!(result, Err(ConfigError::TooManyEntries { list: "exe_envs", .. })));
    }

    #[test]
    fn test_config_serializes_sentinels_distinctly() {
        let args = ParsedArgs { max_cpu_time: Some(1000), ..minimal_args() };
        let config = build_with_identity(&args, stub_nobody).expect("config");
        let value = serde_json::to_value(&config).expect("json");
        assert_eq!(value["max_cpu_time"], serde_json::json!(1000));
        assert_eq!(value["max_real_time"], serde_json::Value::Null);
        assert_eq!(value["max_stack"], serde_json::json!(16 * 1024 * 1024));
        assert_eq!(value["seccomp_rules"], serde_json::Value::Null);
        assert_eq!(value["exe_path"], serde_json::json!("/bin/echo"));
    }
}
