use crate::error::Result;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// Environment settings, backed by a settings.json file in the working directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configs {
    pub verbose_mode: bool,
    pub max_procs: isize,
    pub transects: TransectSettings,
}

/// Ray-growth settings used when generating transects. Values are in the
/// x-y units of the river network.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TransectSettings {
    pub extension_increment: f64,
    pub max_length: f64,
}

impl Default for TransectSettings {
    fn default() -> TransectSettings {
        TransectSettings {
            extension_increment: 250.0,
            max_length: 50000.0,
        }
    }
}

impl Default for Configs {
    fn default() -> Configs {
        Configs {
            verbose_mode: true,
            max_procs: -1,
            transects: TransectSettings::default(),
        }
    }
}

impl Configs {
    pub fn new() -> Configs {
        Configs::default()
    }

    /// Number of worker threads to use, honouring `max_procs` when it is positive.
    pub fn num_procs(&self) -> usize {
        let mut num_procs = num_cpus::get() as isize;
        if self.max_procs > 0 && self.max_procs < num_procs {
            num_procs = self.max_procs;
        }
        num_procs.max(1) as usize
    }
}

fn settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

/// Reads settings.json from the current directory, falling back to the
/// defaults when the file does not exist.
pub fn get_configs() -> Result<Configs> {
    let dir = std::env::current_dir()?;
    get_configs_from(&dir)
}

pub fn get_configs_from(dir: &Path) -> Result<Configs> {
    let config_file = settings_path(dir);
    match fs::read_to_string(&config_file) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(_) => {
            warn!(
                "No settings file found at {}; using defaults.",
                config_file.display()
            );
            Ok(Configs::new())
        }
    }
}

pub fn save_configs(configs: &Configs) -> Result<()> {
    let dir = std::env::current_dir()?;
    save_configs_to(configs, &dir)
}

pub fn save_configs_to(configs: &Configs, dir: &Path) -> Result<()> {
    let configs_json = serde_json::to_string_pretty(configs)?;
    fs::write(settings_path(dir), configs_json)?;
    Ok(())
}
