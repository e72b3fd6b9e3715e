//! Desktop wallpaper application.
//!
//! The only backend drives macOS System Events through AppleScript.

use std::path::{Path, PathBuf};

use crate::error::ApodError;
use crate::ui::prelude::*;

pub mod macos;

pub trait SetWallpaper {
    fn apply(&self, image: &Path) -> Result<(), ApodError>;
}

/// Runs the generated AppleScript with `interpreter` (normally `/usr/bin/osascript`).
pub struct AppleScript {
    pub interpreter: PathBuf,
}

impl SetWallpaper for AppleScript {
    fn apply(&self, image: &Path) -> Result<(), ApodError> {
        emit(
            Level::Info,
            "apod.wallpaper.set",
            "Setting APOD picture to desktop background.",
            None,
        );
        macos::apply_wallpaper(image, &self.interpreter)
    }
}
