use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::program::Program;

/// Per-program timing overrides. Every field is clamped to its declared
/// bounds on load and on edit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerConfig {
    pub work_secs: u32,
    pub rest_secs: u32,
    pub rounds: u32,
    pub sets: u32,
    pub set_rest_secs: u32,
}

impl TimerConfig {
    pub fn clamped(self) -> Self {
        Self {
            work_secs: SettingField::WorkTime.clamp(self.work_secs),
            rest_secs: SettingField::RestTime.clamp(self.rest_secs),
            rounds: SettingField::Rounds.clamp(self.rounds),
            sets: SettingField::Sets.clamp(self.sets),
            set_rest_secs: SettingField::SetRest.clamp(self.set_rest_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SettingField {
    #[strum(serialize = "work time")]
    WorkTime,
    #[strum(serialize = "rest time")]
    RestTime,
    #[strum(serialize = "rounds")]
    Rounds,
    #[strum(serialize = "sets")]
    Sets,
    #[strum(serialize = "set rest")]
    SetRest,
}

impl SettingField {
    pub const ALL: [SettingField; 5] = [
        SettingField::WorkTime,
        SettingField::RestTime,
        SettingField::Rounds,
        SettingField::Sets,
        SettingField::SetRest,
    ];

    pub fn bounds(self) -> (u32, u32) {
        match self {
            SettingField::WorkTime | SettingField::RestTime => (5, 300),
            SettingField::Rounds => (1, 50),
            SettingField::Sets => (1, 20),
            SettingField::SetRest => (10, 300),
        }
    }

    pub fn step(self) -> u32 {
        match self {
            SettingField::WorkTime | SettingField::RestTime => 5,
            SettingField::Rounds | SettingField::Sets => 1,
            SettingField::SetRest => 10,
        }
    }

    pub fn clamp(self, value: u32) -> u32 {
        let (min, max) = self.bounds();
        value.clamp(min, max)
    }

    pub fn get(self, cfg: &TimerConfig) -> u32 {
        match self {
            SettingField::WorkTime => cfg.work_secs,
            SettingField::RestTime => cfg.rest_secs,
            SettingField::Rounds => cfg.rounds,
            SettingField::Sets => cfg.sets,
            SettingField::SetRest => cfg.set_rest_secs,
        }
    }

    pub fn set(self, cfg: &mut TimerConfig, value: u32) {
        let value = self.clamp(value);
        match self {
            SettingField::WorkTime => cfg.work_secs = value,
            SettingField::RestTime => cfg.rest_secs = value,
            SettingField::Rounds => cfg.rounds = value,
            SettingField::Sets => cfg.sets = value,
            SettingField::SetRest => cfg.set_rest_secs = value,
        }
    }

    /// Seconds for the timing fields, a bare count for rounds/sets.
    pub fn unit(self) -> &'static str {
        match self {
            SettingField::Rounds | SettingField::Sets => "",
            _ => "s",
        }
    }
}

/// Scratch copy of a program's configuration while the user adjusts it.
/// Nothing persists until the app commits the draft.
#[derive(Debug, Clone)]
pub struct SettingsEditor {
    pub draft: TimerConfig,
    selected: usize,
}

impl SettingsEditor {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            draft: config,
            selected: 0,
        }
    }

    pub fn field(&self) -> SettingField {
        SettingField::ALL[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % SettingField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.selected = (self.selected + SettingField::ALL.len() - 1) % SettingField::ALL.len();
    }

    /// Move the selected field by one step in `dir` (+1/-1), clamped.
    pub fn adjust(&mut self, dir: i32) {
        let field = self.field();
        let current = field.get(&self.draft);
        let step = field.step();
        let next = if dir >= 0 {
            current.saturating_add(step)
        } else {
            current.saturating_sub(step)
        };
        field.set(&mut self.draft, next);
    }
}

/// The persisted blob: program id -> configuration, written wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SavedConfigs(HashMap<String, TimerConfig>);

impl SavedConfigs {
    /// Saved override for a program, clamped; the program's defaults when
    /// nothing was saved. Never an error.
    pub fn config_for(&self, program: &Program) -> TimerConfig {
        self.0
            .get(&program.id)
            .map(|c| c.clamped())
            .unwrap_or_else(|| program.default_config())
    }

    pub fn insert(&mut self, id: &str, config: TimerConfig) {
        self.0.insert(id.to_string(), config);
    }

    pub fn get(&self, id: &str) -> Option<&TimerConfig> {
        self.0.get(id)
    }
}

pub trait ConfigStore {
    fn load(&self) -> SavedConfigs;
    fn save(&self, configs: &SavedConfigs) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "rondo") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("rondo_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> SavedConfigs {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(configs) = serde_json::from_slice::<SavedConfigs>(&bytes) {
                return configs;
            }
        }
        SavedConfigs::default()
    }

    fn save(&self, configs: &SavedConfigs) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(configs).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
