// tests/config_test.rs
use flowrel::config::{find_config, load_config, Config, VersionFile, CONFIG_FILE_NAME};
use flowrel::domain::Scheme;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Runs `f` with the working directory set to `dir`
fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir).unwrap();
    let result = f();
    env::set_current_dir(previous).unwrap();
    result
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
scheme = "semver"
calver_format = "YYYY.MM.DD"
remote = "upstream"

[branches]
main = "master"
develop = "dev"

[[version_files]]
path = "Cargo.toml"
pattern = 'version = "{{version}}"'
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.scheme, Scheme::SemVer);
    assert_eq!(config.remote, "upstream");
    assert_eq!(config.branches.main.as_deref(), Some("master"));
    assert_eq!(config.branches.develop.as_deref(), Some("dev"));
    assert_eq!(
        config.version_files,
        vec![VersionFile {
            path: "Cargo.toml".to_string(),
            pattern: "version = \"{{version}}\"".to_string(),
        }]
    );
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[branches]\nmain = \"trunk\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.scheme, Scheme::CalVer);
    assert_eq!(config.remote, "origin");
    assert_eq!(config.calver_format, "YYYY.MM.DD");
    assert_eq!(config.branches.main.as_deref(), Some("trunk"));
    assert_eq!(config.branches.develop, None);
}

#[test]
fn test_explicit_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn test_invalid_file_names_the_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"scheme = [1, 2]").unwrap();
    temp_file.flush().unwrap();

    let path = temp_file.path().to_str().unwrap().to_string();
    let err = load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains(&path));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let mut config = Config {
        scheme: Scheme::SemVer,
        ..Config::default()
    };
    config.branches.develop = Some("dev".to_string());
    config.save(&path).unwrap();

    let loaded = load_config(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(loaded, config);
}

#[test]
#[serial]
fn test_local_file_is_found() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "scheme = \"semver\"\n").unwrap();

    let (found, config) = in_dir(dir.path(), || {
        (find_config(None).unwrap(), load_config(None).unwrap())
    });
    assert!(found.is_some());
    assert_eq!(config.scheme, Scheme::SemVer);
}

#[test]
#[serial]
fn test_explicit_path_wins_over_local_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "scheme = \"semver\"\n").unwrap();

    let mut explicit = NamedTempFile::new().unwrap();
    explicit.write_all(b"scheme = \"calver\"\n").unwrap();
    explicit.flush().unwrap();
    let explicit_path = explicit.path().to_str().unwrap().to_string();

    let config = in_dir(dir.path(), || load_config(Some(&explicit_path)).unwrap());
    assert_eq!(config.scheme, Scheme::CalVer);
}
