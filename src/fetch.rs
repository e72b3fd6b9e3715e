//! HTTP access to the APOD site.
//!
//! Every request the pipeline makes goes through [`Fetch`], so the probe and
//! the download logic can be driven by an in-memory fake in tests.

use bytes::Bytes;
use std::thread;
use std::time::Duration;

use crate::error::ApodError;
use crate::ui::prelude::*;

/// A completed HTTP response, whatever its status.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: Bytes,
}

impl Fetched {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Fetch {
    /// GET `url`. Transport failures are errors; HTTP error statuses are not.
    fn get(&self, url: &str) -> Result<Fetched, ApodError>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ApodError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("apod/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApodError::Config(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<Fetched, ApodError> {
        let http_err = |source| ApodError::Http {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(http_err)?;
        Ok(Fetched { status, body })
    }
}

/// Probe `url` until it answers, sleeping `delay` between failed attempts.
///
/// Any response counts as reachable. Fails with [`ApodError::Unreachable`]
/// once all `attempts` requests have errored.
pub fn check_connection(
    fetcher: &dyn Fetch,
    url: &str,
    attempts: u32,
    delay: Duration,
) -> Result<(), ApodError> {
    if attempts == 0 {
        return Err(ApodError::Config(
            "probe_attempts must be at least 1".to_string(),
        ));
    }

    emit(Level::Info, "apod.probe.start", "Checking connection...", None);
    for attempt in 1..=attempts {
        match fetcher.get(url) {
            Ok(_) => {
                emit(Level::Success, "apod.probe.ok", "Ok.", None);
                return Ok(());
            }
            Err(e) => {
                emit(
                    Level::Debug,
                    "apod.probe.error",
                    &format!("Attempt {attempt}/{attempts} failed: {e}"),
                    None,
                );
                if attempt < attempts {
                    emit(
                        Level::Warn,
                        "apod.probe.retry",
                        &format!(
                            "There was a problem; sleeping for {} seconds.",
                            delay.as_secs()
                        ),
                        None,
                    );
                    thread::sleep(delay);
                }
            }
        }
    }

    Err(ApodError::Unreachable {
        url: url.to_string(),
        attempts,
    })
}

pub fn fetch_page(fetcher: &dyn Fetch, url: &str) -> Result<Bytes, ApodError> {
    emit(Level::Info, "apod.page.fetch", "Fetching APOD page.", None);
    let response = fetcher.get(url)?;
    if !response.is_success() {
        return Err(ApodError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}
