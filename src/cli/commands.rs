use super::{Cli, Commands, HotfixAction, ReleaseAction};
use crate::config::{self, Config, CONFIG_FILE_NAME};
use crate::domain::Scheme;
use crate::flow::{FinishOutcome, Flow, FlowStatus};
use crate::git::{Git2Repository, Repository};
use crate::ui;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    debug!(command = ?cli.command, dry_run = cli.dry_run, "running command");

    match cli.command {
        Commands::Version => {
            print_version();
            Ok(())
        }
        Commands::Init { scheme, force } => {
            let path = init_config(Path::new("."), scheme, force)?;
            print_init_summary(&path, scheme);
            Ok(())
        }
        command => {
            let config = config::load_config(cli.config.as_deref())
                .context("failed to load configuration")?;
            let repo = Git2Repository::open(".", cli.dry_run)
                .context("not inside a git repository")?;
            if cli.dry_run {
                ui::display_status("Dry run: no changes will be made");
            }
            let flow = Flow::new(repo, config.flow_options(cli.dry_run, cli.verbose))?;
            run_flow_command(&flow, command)
        }
    }
}

/// Dispatch a repository command against an assembled flow
pub fn run_flow_command<R: Repository>(flow: &Flow<R>, command: Commands) -> Result<()> {
    match command {
        Commands::Release { action } => match action {
            ReleaseAction::Start => {
                flow.release_start()?;
            }
            ReleaseAction::Finish { start_new } => {
                let outcome = flow.release_finish(start_new)?;
                report_finish(&outcome);
            }
        },
        Commands::Hotfix { action } => match action {
            HotfixAction::Start => {
                flow.hotfix_start()?;
            }
            HotfixAction::Finish => {
                let outcome = flow.hotfix_finish()?;
                report_finish(&outcome);
            }
        },
        Commands::Status => print_status(&flow.status()?, flow),
        Commands::Init { .. } | Commands::Version => {
            bail!("command does not operate on a repository")
        }
    }
    Ok(())
}

/// Write the default configuration with `scheme` into `dir`
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init_config(dir: &Path, scheme: Scheme, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if config::exists_in(dir) && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config {
        scheme,
        ..Config::default()
    };
    config
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

/// Version line plus build metadata when it was provided at compile time
pub fn version_lines() -> Vec<String> {
    let mut lines = vec![format!("flowrel {}", env!("CARGO_PKG_VERSION"))];
    if let Some(commit) = option_env!("FLOWREL_BUILD_COMMIT") {
        lines.push(format!("commit: {}", commit));
    }
    if let Some(date) = option_env!("FLOWREL_BUILD_DATE") {
        lines.push(format!("built: {}", date));
    }
    lines
}

fn print_version() {
    for line in version_lines() {
        println!("{}", line);
    }
}

fn print_init_summary(path: &Path, scheme: Scheme) {
    ui::display_success(&format!("Created {}", path.display()));
    ui::display_field("Scheme", scheme.as_str());
    ui::display_field("Main branch", "auto-detect");
    ui::display_field("Develop branch", "auto-detect");
    ui::display_field("Remote", crate::flow::DEFAULT_REMOTE);
}

fn report_finish(outcome: &FinishOutcome) {
    if !outcome.branch_deleted {
        ui::display_detail(&format!(
            "Delete {} by hand once the problem is fixed",
            outcome.branch
        ));
    }
}

fn print_status<R: Repository>(status: &FlowStatus, flow: &Flow<R>) {
    ui::display_field("Scheme", flow.versioner().scheme().as_str());
    ui::display_field("Main branch", flow.main_branch());
    ui::display_field("Develop branch", flow.develop_branch());
    ui::display_field("Remote", flow.remote());

    match flow.versioner().current() {
        Ok(current) if !current.is_empty() => ui::display_field("Current version", &current),
        Ok(_) => ui::display_field("Current version", "(none)"),
        Err(e) => ui::display_warning(&format!("could not read latest tag: {}", e)),
    }

    if status.is_idle() {
        ui::display_status("No release or hotfix in progress");
        return;
    }
    for branch in &status.releases {
        ui::display_status(&format!("Release in progress: {}", branch));
    }
    for branch in &status.hotfixes {
        ui::display_status(&format!("Hotfix in progress: {}", branch));
    }
}
