//! Environment variable overrides. Kept in its own test binary so the
//! process environment does not leak into other config tests.

use std::env;

use tempfile::TempDir;

use outliner::config::{local_config_path, Settings};

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(local_config_path(dir.path()), "content_separator = \"::\"\n").unwrap();
    env::set_var("OUTLINER_CONTENT_SEPARATOR", "|");
    env::set_var("OUTLINER_INDENT", "--");

    let settings = Settings::load_from(None, Some(dir.path())).unwrap();

    env::remove_var("OUTLINER_CONTENT_SEPARATOR");
    env::remove_var("OUTLINER_INDENT");
    assert_eq!(settings.content_separator, "|");
    assert_eq!(settings.indent, "--");
    assert_eq!(settings.number_separator, "/");
}
