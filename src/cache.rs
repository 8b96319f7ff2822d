//! Local data directory holding the booking table exports.
//!
//! Exports are NDJSON files, one per table, written by the persistence layer.
//! When a remote `base_url` is configured the manager fetches missing or stale
//! exports from `<base_url>/<file>.gz` and unpacks them into the directory.
//! Staleness is judged by comparing the local `version.txt` against the
//! `version` field of the remote `meta.json`.

use crate::config;
use crate::error::{PricingError, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Locates, downloads and caches booking data files.
pub struct CacheManager {
    /// Directory where data files are stored.
    pub data_dir: PathBuf,
    /// If true, never download (use local files only).
    pub offline: bool,
    /// Where exports are published, if anywhere.
    pub base_url: Option<String>,
    timeout: Duration,
    client: Option<Client>,
    remote_ver: Option<String>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default cache
    /// directory. Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            data_dir: dir,
            offline,
            base_url: None,
            timeout,
            client: None,
            remote_ver: None,
        })
    }

    /// Publish location for exports, e.g. `https://exports.example.com/booking`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Downloads are only attempted when online and a base URL is known.
    fn remote_base(&self) -> Option<&str> {
        if self.offline {
            None
        } else {
            self.base_url.as_deref()
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Read the locally recorded export version from `version.txt`.
    pub fn local_version(&self) -> Option<String> {
        fs::read_to_string(self.data_dir.join("version.txt"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn save_version(&self, version: &str) {
        if let Err(e) = fs::write(self.data_dir.join("version.txt"), version) {
            warn!(error = %e, "could not record export version");
        }
    }

    /// Fetch the published export version from the remote `meta.json`.
    ///
    /// Returns `None` if offline, unconfigured or unreachable. The result is
    /// cached for subsequent calls.
    pub fn remote_version(&mut self) -> Result<Option<String>> {
        if self.remote_ver.is_some() {
            return Ok(self.remote_ver.clone());
        }
        let Some(base) = self.remote_base().map(str::to_string) else {
            return Ok(None);
        };
        let client = self.client()?;
        match client.get(format!("{}/{}", base, config::META_FILE)).send() {
            Ok(resp) => {
                let data: serde_json::Value = resp.error_for_status()?.json()?;
                let version = data
                    .get("version")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());
                self.remote_ver = version.clone();
                Ok(version)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch export version");
                Ok(None)
            }
        }
    }

    /// Whether local exports are out of date.
    ///
    /// Without a remote to compare against, local files are considered fresh.
    pub fn is_stale(&mut self) -> Result<bool> {
        if self.remote_base().is_none() {
            return Ok(false);
        }
        match self.local_version() {
            None => Ok(true),
            Some(local_ver) => match self.remote_version()? {
                None => Ok(false),
                Some(remote_ver) => Ok(local_ver != remote_ver),
            },
        }
    }

    /// Download `<base_url>/<filename>.gz` and unpack it to `dest`.
    ///
    /// Writes to a temp file first and renames on success, so an interrupted
    /// download never leaves a partial file behind.
    fn download_file(&mut self, filename: &str, dest: &Path) -> Result<()> {
        let base = self.remote_base().map(str::to_string).ok_or_else(|| {
            PricingError::NotFound(format!("no remote configured for {}", filename))
        })?;
        let url = format!("{}/{}.gz", base, filename);
        info!(%url, "downloading export");

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_dest = dest.with_file_name(format!("{}.tmp", filename));

        let client = self.client()?;
        let result = (|| -> Result<()> {
            let resp = client.get(&url).send()?.error_for_status()?;
            let mut decoder = GzDecoder::new(BufReader::new(resp));
            let mut out = fs::File::create(&tmp_dest)?;
            io::copy(&mut decoder, &mut out)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    fn ensure_file(&mut self, filename: &str) -> Result<PathBuf> {
        let local_path = self.data_dir.join(filename);

        if !local_path.exists() || self.is_stale()? {
            if self.remote_base().is_none() {
                if local_path.exists() {
                    return Ok(local_path);
                }
                return Err(PricingError::NotFound(format!(
                    "data file {} not found in {} and no remote is available",
                    filename,
                    self.data_dir.display()
                )));
            }
            self.download_file(filename, &local_path)?;
            if let Ok(Some(version)) = self.remote_version() {
                self.save_version(&version);
            }
        }

        Ok(local_path)
    }

    /// Ensure a table export is present locally, downloading if needed.
    ///
    /// # Arguments
    ///
    /// * `table` - Table name (e.g. `"place_prices"`).
    pub fn ensure_table_file(&mut self, table: &str) -> Result<PathBuf> {
        let filename = config::table_files()
            .get(table)
            .copied()
            .ok_or_else(|| PricingError::NotFound(format!("Unknown table: {}", table)))?;
        self.ensure_file(filename)
    }

    /// Load and parse a JSON file such as `meta`.
    ///
    /// A corrupt file is deleted so the next call fetches a fresh copy.
    pub fn load_json(&mut self, name: &str) -> Result<serde_json::Value> {
        let filename = config::json_files()
            .get(name)
            .copied()
            .ok_or_else(|| PricingError::NotFound(format!("Unknown JSON file: {}", name)))?;
        let path = self.ensure_file(filename)?;

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt data file, removing");
                let _ = fs::remove_file(&path);
                Err(PricingError::NotFound(format!(
                    "Data file '{}' was corrupt and has been removed: {}",
                    filename, e
                )))
            }
        }
    }

    /// Remove all data files and recreate the directory.
    pub fn clear(&self) -> Result<()> {
        if self.data_dir.exists() {
            fs::remove_dir_all(&self.data_dir)?;
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    /// Drop the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
