//! Pure formatting functions for UI output.
//!
//! Every user-facing line goes through here so that styling stays in one
//! place. Progress lines are only shown when the caller asks for them; see
//! [`Progress`].

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print an indented detail line under a status or success line.
pub fn display_detail(message: &str) {
    if message.is_empty() {
        println!();
    } else {
        println!("    {}", message);
    }
}

/// Print a git command that dry-run mode skipped.
pub fn display_command(command: &str) {
    println!("  {} {}", style("would run:").dim(), style(command).cyan());
}

/// Display a `label: value` summary line with aligned values.
pub fn display_field(label: &str, value: &str) {
    println!("  {:<18} {}", format!("{}:", label), style(value).bold());
}

/// Progress reporter that only speaks in verbose or dry-run mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Progress { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Headline for a step, e.g. "Starting new release"
    pub fn step(&self, message: &str) {
        if self.enabled {
            display_status(message);
        }
    }

    /// Detail under the current step
    pub fn detail(&self, message: &str) {
        if self.enabled {
            display_detail(message);
        }
    }
}
