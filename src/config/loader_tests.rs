//! Tests for configuration file loading.

use super::*;
use crate::config::theme::ColorMode;
use ratatui::style::Color;
use serial_test::serial;
use std::env;
use std::fs;

/// Write `contents` to a uniquely named file in the temp dir.
fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("linesel_test_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_linesel_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("linesel") && path_str.ends_with("config.toml"),
        "Path should contain 'linesel' and end with 'config.toml', got: {}",
        path_str
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
fn load_config_file_parses_full_config() {
    let config_path = write_temp_config(
        "full",
        r#"
encoding = "latin-1"
strip_ansi = true
extended_status = true
tab_exits = true
backend = "inline"
inline_height = 8
log_file_path = "/tmp/linesel-test.log"

[theme]
highlight_fg = "orange"
highlight_bg = "BLACK"
selection_fg = "BLACK"
selection_bg = "YELLOW"
color_mode = "rgb"

[rgb]
ORANGE = [203, 75, 22]
BLACK = "0, 0, 0"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.encoding.as_deref(), Some("latin-1"));
    assert_eq!(config.backend.as_deref(), Some("inline"));
    assert_eq!(config.inline_height, Some(8));
    assert_eq!(
        config.rgb.as_ref().and_then(|rgb| rgb.get("ORANGE")),
        Some(&RgbValue::List(vec![203, 75, 22]))
    );

    let resolved = merge_config(Some(config)).expect("Full config should resolve");
    assert_eq!(resolved.encoding, TextEncoding::Latin1);
    assert!(resolved.strip_ansi);
    assert!(resolved.extended_status);
    assert!(resolved.tab_exits);
    assert_eq!(resolved.backend, Backend::Inline);
    assert_eq!(resolved.inline_height, 8);
    assert_eq!(resolved.log_file_path, PathBuf::from("/tmp/linesel-test.log"));
    assert_eq!(resolved.theme.color_mode(), ColorMode::Rgb);

    let palette = resolved.theme.palette();
    assert_eq!(palette.highlight.fg, Some(Color::Rgb(203, 75, 22)));
    assert_eq!(palette.highlight.bg, Some(Color::Rgb(0, 0, 0)));
    assert_eq!(palette.selected.bg, Some(Color::Rgb(181, 137, 0)));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp_config("invalid", "this is not valid TOML ][}{");

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
fn load_config_file_handles_partial_config() {
    let config_path = write_temp_config(
        "partial",
        r#"
tab_exits = true
# Other fields omitted
"#,
    );

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.tab_exits, Some(true));
    assert_eq!(config.encoding, None);
    assert_eq!(config.theme, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_accepts_windowed_frontend_keys() {
    let config_path = write_temp_config(
        "gui_keys",
        r#"
gui_font_size = 11
gui_size = [900, 648]
tab_exits = true
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Windowed frontend keys should not be rejected")
        .expect("Should return Some(ConfigFile) for existing file");
    assert_eq!(config.tab_exits, Some(true));
    assert_eq!(config.gui_font_size, Some(toml::Value::Integer(11)));

    // Ignored when resolving.
    let resolved = merge_config(Some(config)).unwrap();
    assert_eq!(
        resolved,
        ResolvedConfig {
            tab_exits: true,
            ..ResolvedConfig::default()
        }
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("font_size = 11");
    assert!(result.is_err(), "Unknown top-level keys should be rejected");

    let result: Result<ConfigFile, _> = toml::from_str("[theme]\nfont = \"mono\"");
    assert!(result.is_err(), "Unknown theme keys should be rejected");
}

#[test]
fn merge_config_uses_defaults_when_none() {
    let resolved = merge_config(None).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.encoding, TextEncoding::Utf8);
    assert!(!config.strip_ansi);
    assert!(!config.extended_status);
    assert!(!config.tab_exits);
    assert_eq!(config.backend, Backend::Fullscreen);
    assert_eq!(config.inline_height, DEFAULT_INLINE_HEIGHT);
    assert_eq!(config.theme, Theme::default());
}

#[test]
fn merge_config_rejects_unknown_encoding() {
    let config = ConfigFile {
        encoding: Some("ebcdic".to_string()),
        ..ConfigFile::default()
    };
    assert_eq!(
        merge_config(Some(config)),
        Err(ConfigError::InvalidEncoding("ebcdic".to_string()))
    );
}

#[test]
fn merge_config_rejects_unknown_backend() {
    let config = ConfigFile {
        backend: Some("gui".to_string()),
        ..ConfigFile::default()
    };
    assert_eq!(
        merge_config(Some(config)),
        Err(ConfigError::InvalidBackend("gui".to_string()))
    );
}

#[test]
fn merge_config_rejects_zero_inline_height() {
    let config = ConfigFile {
        inline_height: Some(0),
        ..ConfigFile::default()
    };
    let err = merge_config(Some(config)).unwrap_err();
    assert!(err.to_string().contains("inline_height"));
}

#[test]
fn wrong_rgb_arity_names_the_key() {
    let config: ConfigFile = toml::from_str("[rgb]\nRED = [1, 2]").unwrap();
    let err = merge_config(Some(config)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid color for rgb.RED: Expected 3 integers but got 2 for rgb.RED"
    );
}

#[test]
fn unknown_theme_color_names_the_key() {
    let config: ConfigFile = toml::from_str("[theme]\nhighlight_fg = \"PURPLE\"").unwrap();
    let err = merge_config(Some(config)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown color 'PURPLE' for theme.highlight_fg"
    );
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
#[serial(linesel_env)]
fn apply_env_overrides_respects_encoding_and_backend() {
    let _encoding = EnvGuard::new(ENCODING_ENV_VAR);
    let _backend = EnvGuard::new(BACKEND_ENV_VAR);

    env::set_var(ENCODING_ENV_VAR, "ascii");
    env::set_var(BACKEND_ENV_VAR, "inline");

    let result = apply_env_overrides(ResolvedConfig::default()).unwrap();

    assert_eq!(result.encoding, TextEncoding::Ascii);
    assert_eq!(result.backend, Backend::Inline);
}

#[test]
#[serial(linesel_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _encoding = EnvGuard::new(ENCODING_ENV_VAR);
    let _backend = EnvGuard::new(BACKEND_ENV_VAR);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone()).unwrap();

    assert_eq!(result, base, "Config should be unchanged when no env vars are set");
}

#[test]
#[serial(linesel_env)]
fn apply_env_overrides_rejects_unknown_backend() {
    let _backend = EnvGuard::new(BACKEND_ENV_VAR);
    env::set_var(BACKEND_ENV_VAR, "gui");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result, Err(ConfigError::InvalidBackend("gui".to_string())));
}

#[test]
#[serial(linesel_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let explicit_path = write_temp_config("explicit", "backend = \"inline\"");
    let env_path = write_temp_config("env", "backend = \"fullscreen\"");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(
        config.backend.as_deref(),
        Some("inline"),
        "Should use explicit path, not LINESEL_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(linesel_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let env_path = write_temp_config("env_only", "encoding = \"ascii\"");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(
        config.encoding.as_deref(),
        Some("ascii"),
        "Should use LINESEL_CONFIG when no explicit path"
    );

    fs::remove_file(env_path).ok();
}

#[test]
fn apply_cli_overrides_sets_flags_and_names() {
    let overrides = CliOverrides {
        encoding: Some("latin1".to_string()),
        backend: Some("inline".to_string()),
        tab_exits: true,
        extended_status: true,
        strip_ansi: true,
    };

    let result = apply_cli_overrides(ResolvedConfig::default(), &overrides).unwrap();

    assert_eq!(result.encoding, TextEncoding::Latin1);
    assert_eq!(result.backend, Backend::Inline);
    assert!(result.tab_exits);
    assert!(result.extended_status);
    assert!(result.strip_ansi);
}

#[test]
fn apply_cli_overrides_unset_flags_keep_config_values() {
    let base = ResolvedConfig {
        tab_exits: true,
        strip_ansi: true,
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(base.clone(), &CliOverrides::default()).unwrap();
    assert_eq!(result, base);
}

#[test]
fn apply_cli_overrides_rejects_unknown_encoding() {
    let overrides = CliOverrides {
        encoding: Some("klingon".to_string()),
        ..CliOverrides::default()
    };
    let result = apply_cli_overrides(ResolvedConfig::default(), &overrides);
    assert_eq!(result, Err(ConfigError::InvalidEncoding("klingon".to_string())));
}

#[test]
#[serial(linesel_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _encoding = EnvGuard::new(ENCODING_ENV_VAR);
    let _backend = EnvGuard::new(BACKEND_ENV_VAR);

    // Config file sets encoding and backend
    let file = ConfigFile {
        encoding: Some("ascii".to_string()),
        backend: Some("inline".to_string()),
        ..ConfigFile::default()
    };
    let merged = merge_config(Some(file)).unwrap();
    assert_eq!(merged.encoding, TextEncoding::Ascii);

    // Env overrides encoding only
    env::set_var(ENCODING_ENV_VAR, "latin-1");
    let with_env = apply_env_overrides(merged).unwrap();
    assert_eq!(with_env.encoding, TextEncoding::Latin1);
    assert_eq!(with_env.backend, Backend::Inline);

    // CLI overrides backend
    let overrides = CliOverrides {
        backend: Some("fullscreen".to_string()),
        ..CliOverrides::default()
    };
    let final_config = apply_cli_overrides(with_env, &overrides).unwrap();
    assert_eq!(final_config.encoding, TextEncoding::Latin1);
    assert_eq!(final_config.backend, Backend::Fullscreen);
}
