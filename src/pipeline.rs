use std::path::PathBuf;

use crate::config::ApodConfig;
use crate::download::download_image;
use crate::error::ApodError;
use crate::extract::image_uri;
use crate::fetch::{Fetch, check_connection, fetch_page};
use crate::ui::prelude::*;
use crate::wallpaper::SetWallpaper;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after the download instead of changing the desktop
    pub no_set: bool,
}

#[derive(Debug)]
pub struct Outcome {
    pub image: PathBuf,
    pub applied: bool,
}

/// Probe, fetch, extract, download and apply, aborting on the first failure.
pub fn run(
    config: &ApodConfig,
    options: RunOptions,
    fetcher: &dyn Fetch,
    setter: &dyn SetWallpaper,
) -> Result<Outcome, ApodError> {
    check_connection(
        fetcher,
        &config.page_url,
        config.probe_attempts,
        config.probe_delay(),
    )?;

    let page = fetch_page(fetcher, &config.page_url)?;
    let uri = image_uri(&page).ok_or(ApodError::NoImage)?;
    emit(
        Level::Debug,
        "apod.extract.found",
        &format!("Found {}", uri.as_str()),
        None,
    );

    let image = download_image(fetcher, &config.page_url, &uri, &config.download_dir())?;
    emit(
        Level::Debug,
        "apod.download.size",
        &format!("Downloaded {} bytes from {}", image.bytes, image.url),
        None,
    );

    if options.no_set {
        emit(
            Level::Info,
            "apod.wallpaper.skipped",
            "Leaving the desktop background unchanged.",
            None,
        );
        return Ok(Outcome {
            image: image.path,
            applied: false,
        });
    }

    setter.apply(&image.path)?;
    emit(
        Level::Success,
        "apod.wallpaper.done",
        "Desktop background updated.",
        Some(serde_json::json!({ "path": image.path })),
    );

    Ok(Outcome {
        image: image.path,
        applied: true,
    })
}
