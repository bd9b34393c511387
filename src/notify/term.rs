use colored::Colorize;
use tracing::info;

use crate::api::{Navigator, Notifier};
use crate::constants::NETWORK_ERROR_MESSAGE;

/// Terminal stand-in for the toast subsystem: one styled line on stderr
/// per notification, keeping stdout clean for command output.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn show_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    fn show_no_internet(&self) {
        eprintln!("{} {}", "⚠".yellow().bold(), NETWORK_ERROR_MESSAGE);
    }
}

/// Terminal stand-in for client navigation. A one-shot process has no
/// screen stack to rewind, so a location replacement is announced
/// instead.
pub struct TermNavigator;

impl Navigator for TermNavigator {
    fn replace(&self, location: &str) {
        info!("location replaced with {}", location);
        eprintln!("{} redirected to {}", "↩".cyan(), location);
    }
}
