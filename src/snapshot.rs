//! Version-aware download and local cache of catalog snapshot files.
//!
//! The crawler pipeline publishes daily catalog snapshots (parquet plus
//! gzipped NDJSON) under a static base URL. This manager checks `meta.json`
//! for version changes and re-downloads when stale. Individual files are
//! downloaded lazily on first access.

use crate::config;
use crate::error::{Result, ShukError};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct SnapshotManager {
    /// Directory where cached snapshot files are stored.
    pub data_dir: PathBuf,
    /// If true, never download (use cached files only).
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
    remote_ver: Option<String>,
}

impl SnapshotManager {
    /// Create a new snapshot manager.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default cache
    /// directory. Creates the directory if it does not exist.
    pub fn new(data_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            data_dir: dir,
            offline,
            timeout,
            client: None,
            remote_ver: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()?,
            );
        }
        Ok(self.client.as_ref().unwrap())
    }

    fn local_version(&self) -> Option<String> {
        let version_file = self.data_dir.join("version.txt");
        if version_file.exists() {
            fs::read_to_string(&version_file)
                .ok()
                .map(|s| s.trim().to_string())
        } else {
            None
        }
    }

    fn save_version(&self, version: &str) {
        let version_file = self.data_dir.join("version.txt");
        let _ = fs::write(version_file, version);
    }

    /// Fetch the current snapshot version from `meta.json`.
    ///
    /// Returns the version string (e.g. `"2026-08-25"`), or `None` if offline
    /// or the server is unreachable. Caches the result for subsequent calls.
    pub fn remote_version(&mut self) -> Result<Option<String>> {
        if self.remote_ver.is_some() {
            return Ok(self.remote_ver.clone());
        }
        if self.offline {
            return Ok(None);
        }
        let client = self.client()?.clone();
        match client.get(config::META_URL).send() {
            Ok(resp) => {
                let resp = resp.error_for_status()?;
                let data: serde_json::Value = resp.json()?;
                let version = data
                    .get("snapshot_date")
                    .and_then(|v| v.as_str())
                    .or_else(|| data.get("version").and_then(|v| v.as_str()))
                    .map(|s| s.to_string());
                self.remote_ver = version.clone();
                Ok(version)
            }
            Err(e) => {
                eprintln!("Failed to fetch snapshot version: {}", e);
                Ok(None)
            }
        }
    }

    /// Check if the local snapshot is out of date.
    ///
    /// Returns `true` if there is no local snapshot or the server has a newer
    /// one. Returns `false` if up to date or the server is unreachable.
    pub fn is_stale(&mut self) -> Result<bool> {
        match self.local_version() {
            None => Ok(true),
            Some(local_ver) => match self.remote_version()? {
                None => Ok(false), // can't check, assume fresh
                Some(remote_ver) => Ok(local_ver != remote_ver),
            },
        }
    }

    /// Download a single file from the snapshot server.
    ///
    /// Downloads to a temp file first and renames on success, so an
    /// interrupted download never leaves a corrupt partial file behind.
    fn download_file(&mut self, filename: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", config::SNAPSHOT_BASE, filename);
        eprintln!("Downloading {}", url);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension(format!(
            "{}.tmp",
            dest.extension().and_then(|e| e.to_str()).unwrap_or("")
        ));

        let client = self.client()?.clone();
        let result = (|| -> Result<()> {
            let resp = client.get(&url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
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
            if self.offline {
                if local_path.exists() {
                    return Ok(local_path);
                }
                return Err(ShukError::NotFound(format!(
                    "Snapshot file {} not cached and offline mode is enabled",
                    filename
                )));
            }
            self.download_file(filename, &local_path)?;
            if let Ok(Some(version)) = self.remote_version() {
                self.save_version(&version);
            }
        }

        Ok(local_path)
    }

    /// Ensure a parquet snapshot file is cached locally, downloading if needed.
    ///
    /// `view_name` is the logical view name (e.g. `"products"`, `"stores"`).
    /// Returns the local filesystem path to the cached parquet file.
    pub fn ensure_parquet(&mut self, view_name: &str) -> Result<PathBuf> {
        let files = config::parquet_files();
        let filename = files.get(view_name).ok_or_else(|| {
            ShukError::NotFound(format!("Unknown snapshot view: {}", view_name))
        })?;
        self.ensure_file(filename)
    }

    /// Ensure a gzipped NDJSON snapshot is cached and decompressed.
    ///
    /// Returns the path to the inflated `.ndjson` file, ready for
    /// `read_json_auto`. If the cached gz is corrupt it is removed so the
    /// next call re-downloads a fresh copy.
    pub fn ensure_ndjson(&mut self, name: &str) -> Result<PathBuf> {
        let files = config::ndjson_files();
        let filename = files.get(name).ok_or_else(|| {
            ShukError::NotFound(format!("Unknown snapshot NDJSON file: {}", name))
        })?;
        let gz_path = self.ensure_file(filename)?;
        let out_path = gz_path.with_extension(""); // strip .gz

        if out_path.exists() {
            return Ok(out_path);
        }

        let inflate = (|| -> Result<()> {
            let file = fs::File::open(&gz_path)?;
            let mut decoder = GzDecoder::new(BufReader::new(file));
            let mut contents = Vec::new();
            decoder.read_to_end(&mut contents)?;
            fs::write(&out_path, &contents)?;
            Ok(())
        })();

        match inflate {
            Ok(()) => Ok(out_path),
            Err(e) => {
                eprintln!("Corrupt snapshot file {}: {} -- removing", gz_path.display(), e);
                let _ = fs::remove_file(&gz_path);
                let _ = fs::remove_file(&out_path);
                Err(ShukError::NotFound(format!(
                    "Snapshot file '{}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    filename, e
                )))
            }
        }
    }

    /// Remove all cached snapshot files and recreate the data directory.
    pub fn clear(&self) -> Result<()> {
        if self.data_dir.exists() {
            fs::remove_dir_all(&self.data_dir)?;
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}
