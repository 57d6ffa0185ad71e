use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use colored::Colorize;

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

pub fn create(msg: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        style("{spinner:.cyan.bold} {msg}")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

/// Spinner for `mode`; JSON output stays free of terminal noise.
pub fn for_mode(mode: crate::output::OutputMode, msg: &str) -> Option<ProgressBar> {
    match mode {
        crate::output::OutputMode::Human => Some(create(msg)),
        crate::output::OutputMode::Json => None,
    }
}

pub fn finish_ok(sp: &ProgressBar, msg: &str) {
    sp.set_style(style("{msg}"));
    sp.finish_with_message(format!("{} {}", "✓".green().bold(), msg));
}

pub fn finish_err(sp: &ProgressBar, msg: &str) {
    sp.set_style(style("{msg}"));
    sp.finish_with_message(format!("{} {}", "✗".red().bold(), msg));
}

pub fn finish_clear(sp: &ProgressBar) {
    sp.finish_and_clear();
}
