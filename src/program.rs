use serde::Deserialize;
use serde_json::from_slice;

use crate::cache::{AssetCache, AssetSource, CacheError};
use crate::config::TimerConfig;

/// A built-in workout template. The set is fixed at build time in
/// `assets/programs.json` and served through the asset cache.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub subtitle: String,
    pub work_secs: u32,
    pub rest_secs: u32,
    pub rounds: u32,
    pub sets: u32,
    pub set_rest_secs: u32,
}

impl Program {
    pub fn default_config(&self) -> TimerConfig {
        TimerConfig {
            work_secs: self.work_secs,
            rest_secs: self.rest_secs,
            rounds: self.rounds,
            sets: self.sets,
            set_rest_secs: self.set_rest_secs,
        }
    }
}

pub const PROGRAMS_ASSET: &str = "programs.json";

#[derive(Clone, Debug)]
pub struct ProgramCatalog {
    programs: Vec<Program>,
}

impl ProgramCatalog {
    /// Load the catalog through the asset cache: cached copy first, then
    /// the bundled source.
    pub fn load(cache: &AssetCache, source: &dyn AssetSource) -> Result<Self, CacheError> {
        let bytes = cache.fetch(PROGRAMS_ASSET, source)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CacheError> {
        let programs: Vec<Program> = from_slice(bytes)
            .map_err(|e| CacheError::Malformed(PROGRAMS_ASSET.to_string(), e.to_string()))?;
        Ok(Self { programs })
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Program> {
        self.programs.get(idx)
    }

    pub fn by_id(&self, id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == id)
    }
}
