use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ApodError;
use crate::extract::ImageUri;
use crate::fetch::Fetch;
use crate::progress::{create_spinner, finish_spinner_with_success};
use crate::ui::prelude::*;

#[derive(Debug)]
pub struct DownloadedImage {
    pub path: PathBuf,
    pub url: String,
    pub bytes: usize,
}

/// Download `uri` into `dir/apod.<ext>`, keeping the extension of the source image.
pub fn download_image(
    fetcher: &dyn Fetch,
    page_url: &str,
    uri: &ImageUri,
    dir: &Path,
) -> Result<DownloadedImage, ApodError> {
    let url = uri.resolve(page_url)?;
    emit(
        Level::Debug,
        "apod.download.url",
        &format!("Image URL: {url}"),
        None,
    );

    let pb = create_spinner("Downloading photo...");
    let response = match fetcher.get(&url) {
        Ok(response) => response,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    if !response.is_success() {
        pb.finish_and_clear();
        return Err(ApodError::Status {
            url,
            status: response.status,
        });
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("apod.{}", uri.extension()));
    if let Err(e) = fs::write(&path, &response.body) {
        pb.finish_and_clear();
        return Err(e.into());
    }
    finish_spinner_with_success(pb, "apod.download.done", "Done.");

    emit(
        Level::Info,
        "apod.download.saved",
        &format!("Photo saved to {}.", path.display()),
        Some(serde_json::json!({ "path": path, "url": url })),
    );

    Ok(DownloadedImage {
        path,
        url,
        bytes: response.body.len(),
    })
}
