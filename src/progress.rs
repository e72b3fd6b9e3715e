use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::ui::prelude::*;

/// Spinner for a blocking step. Hidden in JSON mode so stdout stays one event per line.
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    if get_output_format() == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Clear the spinner line and report the finished step.
pub fn finish_spinner_with_success(pb: ProgressBar, code: &str, message: impl Into<String>) {
    pb.finish_and_clear();
    emit(Level::Success, code, &format!("✓ {}", message.into()), None);
}
