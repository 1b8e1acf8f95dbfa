use include_dir::{include_dir, Dir};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cache directory name; bumping it orphans every previous version, which
/// `activate` then deletes.
pub const CACHE_VERSION: &str = "rondo-assets-v1";

/// Assets primed at install time, cached verbatim under their own names.
pub const ASSET_MANIFEST: [&str; 4] = ["banner.txt", "help.txt", "programs.json", "offline.txt"];

/// Served when both the cache and the source fail for a requested asset.
pub const FALLBACK_ASSET: &str = "offline.txt";

static BUNDLED_DIR: Dir = include_dir!("assets");

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("asset source has no entry for {0}")]
    SourceMiss(String),
    #[error("asset {0} unavailable: not cached, source failed, no fallback")]
    Unavailable(String),
    #[error("asset {0} is malformed: {1}")]
    Malformed(String, String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where assets come from when the cache misses. Production uses the
/// bundled set; tests swap in failing sources to simulate being offline.
pub trait AssetSource {
    fn fetch(&self, asset: &str) -> Result<Vec<u8>, CacheError>;
}

/// The compiled-in asset set under `assets/`.
pub struct BundledAssets;

impl AssetSource for BundledAssets {
    fn fetch(&self, asset: &str) -> Result<Vec<u8>, CacheError> {
        BUNDLED_DIR
            .get_file(asset)
            .map(|f| f.contents().to_vec())
            .ok_or_else(|| CacheError::SourceMiss(asset.to_string()))
    }
}

/// Versioned cache-first asset store.
///
/// `install` primes the full manifest, `activate` deletes stale versions,
/// and `fetch` intercepts every asset read: cached copy first, then the
/// source (storing a best-effort copy), then the fallback page.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
}

impl AssetCache {
    /// `root` holds one subdirectory per cache version.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn version_dir(&self) -> PathBuf {
        self.root.join(CACHE_VERSION)
    }

    fn entry_path(&self, asset: &str) -> PathBuf {
        self.version_dir().join(asset)
    }

    /// Prime every manifest asset from `source`. Fails if any single
    /// asset cannot be fetched or written; readiness is immediate and
    /// independent of older versions.
    pub fn install(&self, source: &dyn AssetSource) -> Result<(), CacheError> {
        fs::create_dir_all(self.version_dir())?;
        for asset in ASSET_MANIFEST {
            let bytes = source.fetch(asset)?;
            fs::write(self.entry_path(asset), bytes)?;
        }
        Ok(())
    }

    /// Delete every version directory except the current one. Safe to run
    /// before or after `install`.
    pub fn activate(&self) -> std::io::Result<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        for entry in entries {
            let entry = entry?;
            if entry.file_name() != CACHE_VERSION && entry.path().is_dir() {
                fs::remove_dir_all(entry.path())?;
            }
        }
        Ok(())
    }

    /// Cached bytes for `asset`, if present.
    pub fn lookup(&self, asset: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(asset)).ok()
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.entry_path(asset).is_file()
    }

    /// Best-effort write-back; a failed write never fails the read path.
    fn store(&self, asset: &str, bytes: &[u8]) {
        let path = self.entry_path(asset);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(path, bytes);
    }

    /// Cache-first read. A cache hit never consults the source; a miss
    /// fetches and caches a copy; a source failure falls back to the
    /// cached fallback page, and only when that is also missing does the
    /// failure reach the caller.
    pub fn fetch(&self, asset: &str, source: &dyn AssetSource) -> Result<Vec<u8>, CacheError> {
        if let Some(bytes) = self.lookup(asset) {
            return Ok(bytes);
        }
        match source.fetch(asset) {
            Ok(bytes) => {
                self.store(asset, &bytes);
                Ok(bytes)
            }
            Err(_) => self
                .lookup(FALLBACK_ASSET)
                .ok_or_else(|| CacheError::Unavailable(asset.to_string())),
        }
    }
}
