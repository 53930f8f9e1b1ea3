// tests/cli_test.rs
use clap::Parser;
use flowrel::cli::{Cli, Commands, HotfixAction, ReleaseAction};
use flowrel::domain::Scheme;
use std::process::Command;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("flowrel").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_release_commands() {
    assert_eq!(
        parse(&["release", "start"]).command,
        Commands::Release {
            action: ReleaseAction::Start
        }
    );
    assert_eq!(
        parse(&["release", "finish", "--start-new"]).command,
        Commands::Release {
            action: ReleaseAction::Finish { start_new: true }
        }
    );
    assert_eq!(
        parse(&["hotfix", "finish"]).command,
        Commands::Hotfix {
            action: HotfixAction::Finish
        }
    );
}

#[test]
fn test_global_flags_anywhere() {
    let cli = parse(&["--dry-run", "release", "start", "-v", "-c", "custom.toml"]);
    assert!(cli.dry_run);
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref(), Some("custom.toml"));
}

#[test]
fn test_parse_init() {
    assert_eq!(
        parse(&["init"]).command,
        Commands::Init {
            scheme: Scheme::CalVer,
            force: false
        }
    );
    assert_eq!(
        parse(&["init", "--scheme", "SemVer", "--force"]).command,
        Commands::Init {
            scheme: Scheme::SemVer,
            force: true
        }
    );
    assert!(Cli::try_parse_from(["flowrel", "init", "--scheme", "zerover"]).is_err());
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["flowrel"]).is_err());
    assert!(Cli::try_parse_from(["flowrel", "release"]).is_err());
    assert!(Cli::try_parse_from(["flowrel", "hotfix", "finish", "--start-new"]).is_err());
}

#[test]
fn test_binary_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_flowrel"))
        .arg("version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(&format!("flowrel {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_binary_init_writes_config() {
    let dir = TempDir::new().unwrap();
    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_flowrel"))
            .args(args)
            .current_dir(dir.path())
            .output()
            .expect("Failed to execute command")
    };

    assert!(run(&["init", "--scheme", "semver"]).status.success());
    let text = std::fs::read_to_string(dir.path().join(".flowrel.toml")).unwrap();
    assert!(text.contains("scheme = \"semver\""));

    let again = run(&["init"]);
    assert_eq!(again.status.code(), Some(1));
    let stderr = String::from_utf8(again.stderr).unwrap();
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_binary_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_flowrel"))
        .args(["-c", "missing.toml", "status"])
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("ERROR:"));
    assert!(!stderr.contains("Usage:"));
}
