//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_crumbtrail_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("crumbtrail") && path_str.ends_with("config.toml"),
        "Path should contain 'crumbtrail' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_crumbtrail_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("crumbtrail.log"),
        "Default log path should end with 'crumbtrail.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("crumbtrail_test_config.toml");

    let toml_content = r#"
overscan = 8
default_row_height = 2
max_list_height = 40
probe_sample_rows = 3
relative_time = true
log_file_path = "/tmp/crumbtrail-test.log"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.overscan, Some(8));
    assert_eq!(config.default_row_height, Some(2));
    assert_eq!(config.max_list_height, Some(40));
    assert_eq!(config.probe_sample_rows, Some(3));
    assert_eq!(config.relative_time, Some(true));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/crumbtrail-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("crumbtrail_test_invalid.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    let result = load_config_file(&config_path);
    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("overscan = 2\ntheme = \"dark\"\n");
    assert!(result.is_err(), "Unknown key 'theme' should be rejected");
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let config_file = ConfigFile {
        overscan: Some(10),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.overscan, 10);
    assert_eq!(resolved.default_row_height, defaults.default_row_height);
    assert_eq!(resolved.max_list_height, defaults.max_list_height);
    assert_eq!(resolved.relative_time, defaults.relative_time);
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.overscan, 3);
    assert_eq!(config.default_row_height, 1);
    assert_eq!(config.max_list_height, 500);
    assert_eq!(config.probe_sample_rows, 5);
    assert!(!config.relative_time);
}

#[test]
fn list_options_floor_degenerate_values() {
    let config = ResolvedConfig {
        default_row_height: 0,
        probe_sample_rows: 0,
        ..ResolvedConfig::default()
    };
    let options = config.list_options();
    assert_eq!(options.default_row_height, 1);
    assert_eq!(options.probe_sample_rows, 1);
    assert_eq!(options.overscan, 3);
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(crumbtrail_env)]
fn apply_env_overrides_respects_overscan() {
    let _guard = EnvGuard::new(OVERSCAN_ENV);
    env::set_var(OVERSCAN_ENV, "12");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.overscan, 12, "CRUMBTRAIL_OVERSCAN should override overscan");
}

#[test]
#[serial(crumbtrail_env)]
fn apply_env_overrides_ignores_invalid_overscan() {
    let _guard = EnvGuard::new(OVERSCAN_ENV);
    env::set_var(OVERSCAN_ENV, "lots");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.overscan, ResolvedConfig::default().overscan);
}

#[test]
#[serial(crumbtrail_env)]
fn apply_env_overrides_respects_relative_time() {
    let _guard = EnvGuard::new(RELATIVE_TIME_ENV);
    env::set_var(RELATIVE_TIME_ENV, "Yes");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert!(result.relative_time);
}

#[test]
#[serial(crumbtrail_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _overscan = EnvGuard::new(OVERSCAN_ENV);
    let _relative = EnvGuard::new(RELATIVE_TIME_ENV);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(crumbtrail_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let temp_dir = env::temp_dir();

    let explicit_path = temp_dir.join("crumbtrail_explicit.toml");
    fs::write(&explicit_path, "overscan = 1\n").expect("Failed to write explicit config");

    let env_path = temp_dir.join("crumbtrail_env.toml");
    fs::write(&env_path, "overscan = 2\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(
        config.overscan,
        Some(1),
        "Should use explicit path, not CRUMBTRAIL_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(crumbtrail_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let env_path = env::temp_dir().join("crumbtrail_env_only.toml");
    fs::write(&env_path, "relative_time = true\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.relative_time, Some(true));

    fs::remove_file(env_path).ok();
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig::default();

    let unchanged = apply_cli_overrides(base.clone(), None, None);
    assert_eq!(unchanged, base);

    let changed = apply_cli_overrides(base.clone(), Some(0), Some(true));
    assert_eq!(changed.overscan, 0);
    assert!(changed.relative_time);
    assert_eq!(changed.max_list_height, base.max_list_height);
}

#[test]
#[serial(crumbtrail_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _guard = EnvGuard::new(OVERSCAN_ENV);

    let file = ConfigFile {
        overscan: Some(4),
        relative_time: Some(true),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(file));
    assert_eq!(merged.overscan, 4);

    env::set_var(OVERSCAN_ENV, "6");
    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.overscan, 6);
    assert!(with_env.relative_time);

    let with_cli = apply_cli_overrides(with_env, Some(9), Some(false));
    assert_eq!(with_cli.overscan, 9);
    assert!(!with_cli.relative_time);
}
