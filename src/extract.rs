use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::error::ApodError;
use crate::ui::prelude::*;

lazy_static! {
    // The full-resolution <a href> precedes the inline <IMG SRC> on the page.
    static ref IMAGE_PATTERN: Regex =
        Regex::new(r#"(?i)<(?:a\s+href|img\s+src)="(image/\d{4}/[\w-]+\.(?:jpe?g|png))""#)
            .expect("image pattern is valid");
}

/// Relative image path as it appears on the APOD page, e.g. `image/2410/M31_1024.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUri(String);

impl ImageUri {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn extension(&self) -> &str {
        Path::new(&self.0)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("jpg")
    }

    /// Absolute URL of the image, relative to the page it was found on.
    pub fn resolve(&self, page_url: &str) -> Result<String, ApodError> {
        let invalid = |e: &dyn std::fmt::Display| ApodError::InvalidUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        };
        let base = reqwest::Url::parse(page_url).map_err(|e| invalid(&e))?;
        let url = base.join(&self.0).map_err(|e| invalid(&e))?;
        Ok(url.to_string())
    }
}

/// First image reference on the page, if any.
pub fn image_uri(page: &[u8]) -> Option<ImageUri> {
    emit(Level::Info, "apod.extract", "Getting APOD image URL.", None);
    let html = String::from_utf8_lossy(page);
    IMAGE_PATTERN
        .captures(&html)
        .and_then(|caps| caps.get(1))
        .map(|m| ImageUri(m.as_str().to_string()))
}
