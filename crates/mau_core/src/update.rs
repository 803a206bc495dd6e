//! Remote version check.
//!
//! # Responsibility
//! - Read the local `version.txt` and fetch the published version string.
//! - Compare both numerically, component by component.
//! - Run the check off the caller's thread and report over a channel.
//!
//! # Invariants
//! - A missing or unreadable local file counts as `0.0.0`.
//! - The remote fetch gives up after a fixed timeout and is never retried.

use crossbeam_channel::Receiver;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

pub const REPO_VERSION_URL: &str =
    "https://raw.githubusercontent.com/l337quez/GNU-MAU/main/version.txt";
pub const PROJECT_PAGE_URL: &str = "https://github.com/l337quez/GNU-MAU";
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const FALLBACK_VERSION: &str = "0.0.0";

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[vV]?(\d+(?:\.\d+)*)$").expect("valid version regex"));

#[derive(Debug)]
pub enum UpdateError {
    Http(reqwest::Error),
    Status(u16),
    InvalidVersion(String),
}

impl Display for UpdateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "connection error: {err}"),
            Self::Status(code) => write!(f, "version server answered HTTP {code}"),
            Self::InvalidVersion(raw) => write!(f, "cannot parse version `{raw}`"),
        }
    }
}

impl Error for UpdateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpdateError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Parsed dotted version. Missing trailing components compare as zero.
#[derive(Debug, Clone)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let len = self.0.len().max(other.0.len());
        let at = |parts: &[u64], i: usize| parts.get(i).copied().unwrap_or(0);
        (0..len)
            .map(|i| at(&self.0, i).cmp(&at(&other.0, i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Parses `v1.2.3` or `1.2.3`.
pub fn parse_version(raw: &str) -> Result<Version, UpdateError> {
    let trimmed = raw.trim();
    let captures = VERSION_RE
        .captures(trimmed)
        .ok_or_else(|| UpdateError::InvalidVersion(trimmed.to_string()))?;
    captures[1]
        .split('.')
        .map(|part| part.parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map(Version)
        .map_err(|_| UpdateError::InvalidVersion(trimmed.to_string()))
}

/// Local version string, `0.0.0` when the file cannot be read.
pub fn read_local_version(path: &Path) -> String {
    std::fs::read_to_string(path)
        .map(|text| text.trim().to_string())
        .ok()
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

/// Fetches the published version string from `url`.
pub fn fetch_remote_version(url: &str) -> Result<String, UpdateError> {
    let mut builder = reqwest::blocking::Client::builder().timeout(FETCH_TIMEOUT);
    if is_loopback(url) {
        builder = builder.no_proxy();
    }
    let client = builder.build()?;
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Status(status.as_u16()));
    }
    Ok(response.text()?.trim().to_string())
}

/// Local mirrors are reached directly, never through a configured proxy.
fn is_loopback(url: &str) -> bool {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .is_some_and(|host| {
            host == "localhost"
                || host
                    .trim_matches(['[', ']'])
                    .parse::<std::net::IpAddr>()
                    .is_ok_and(|ip| ip.is_loopback())
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatus {
    pub available: bool,
    pub local: String,
    pub remote: String,
}

/// Compares two raw version strings.
pub fn compare_versions(local: &str, remote: &str) -> Result<UpdateStatus, UpdateError> {
    let available = parse_version(remote)? > parse_version(local)?;
    Ok(UpdateStatus {
        available,
        local: local.to_string(),
        remote: remote.to_string(),
    })
}

/// Blocking check against `url`.
pub fn check_for_update(local_version_file: &Path, url: &str) -> Result<UpdateStatus, UpdateError> {
    let local = read_local_version(local_version_file);
    let remote = fetch_remote_version(url)?;
    let status = compare_versions(&local, &remote)?;
    info!(
        "event=update_check module=update status=ok local={} remote={} available={}",
        status.local, status.remote, status.available
    );
    Ok(status)
}

/// Outcome delivered by [`spawn_update_check`].
#[derive(Debug)]
pub enum UpdateEvent {
    Checked(UpdateStatus),
    Failed(String),
}

/// Runs [`check_for_update`] on a worker thread. The receiver yields exactly
/// one event.
pub fn spawn_update_check(
    local_version_file: impl Into<std::path::PathBuf>,
    url: impl Into<String>,
) -> Receiver<UpdateEvent> {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    let local_version_file = local_version_file.into();
    let url = url.into();
    std::thread::spawn(move || {
        let event = match check_for_update(&local_version_file, &url) {
            Ok(status) => UpdateEvent::Checked(status),
            Err(err) => {
                warn!("event=update_check module=update status=error error={}", err);
                UpdateEvent::Failed(err.to_string())
            }
        };
        // Receiver may already be gone.
        let _ = sender.send(event);
    });
    receiver
}
