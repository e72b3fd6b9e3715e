use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ApodError;
use crate::ui::prelude::*;

/// AppleScript that points every desktop at `image`.
pub fn render_script(image: &Path) -> String {
    let path = image
        .to_string_lossy()
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!(r#"tell application "System Events" to set picture of every desktop to "{path}""#)
}

/// Set the wallpaper through System Events, via an `osascript`-compatible interpreter.
pub fn apply_wallpaper(image: &Path, interpreter: &Path) -> Result<(), ApodError> {
    let interpreter = which::which(interpreter)
        .map_err(|_| ApodError::InterpreterMissing(interpreter.to_path_buf()))?;

    let abs_image = image.canonicalize()?;

    let mut script = tempfile::Builder::new()
        .prefix("apod-background-")
        .suffix(".scpt")
        .tempfile()?;
    script.write_all(render_script(&abs_image).as_bytes())?;
    script.flush()?;

    emit(
        Level::Debug,
        "apod.wallpaper.script",
        &format!(
            "Running {} {}",
            interpreter.display(),
            script.path().display()
        ),
        None,
    );

    let output = Command::new(&interpreter)
        .arg(script.path())
        .output()
        .map_err(|e| ApodError::Script(format!("failed to run {}: {e}", interpreter.display())))?;

    let script_path: PathBuf = script.path().to_path_buf();
    if let Err(e) = script.close() {
        emit(
            Level::Warn,
            "apod.wallpaper.cleanup",
            &format!("Error deleting file {}: {e}", script_path.display()),
            None,
        );
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ApodError::Script(stderr.trim().to_string()));
    }

    Ok(())
}
