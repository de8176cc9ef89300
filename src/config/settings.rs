//! Configuration settings for the life engine driver

use crate::game_of_life::EngineOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub size: i64,
    pub generations: u64,
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_auto_advance() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,
    /// Seed cells as `[x, y]` pairs, applied after the pattern file
    #[serde(default)]
    pub cells: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                size: 10,
                generations: 2,
                auto_advance: true,
                threads: None,
            },
            input: InputConfig {
                pattern_file: None,
                cells: vec![(5, 5), (5, 6), (5, 7)],
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.size < 0 {
            anyhow::bail!("Grid size must not be negative, got {}", self.simulation.size);
        }

        if self.simulation.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.simulation.threads == Some(0) {
            anyhow::bail!("Thread count must be positive when given");
        }

        let size = self.simulation.size as usize;
        if let Some(&(x, y)) = self.input.cells.iter().find(|&&(x, y)| x >= size || y >= size) {
            anyhow::bail!("Seed cell ({}, {}) lies outside the {}x{} grid", x, y, size, size);
        }

        if let Some(ref pattern) = self.input.pattern_file {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.simulation.size = size;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(threads) = cli_overrides.threads {
            self.simulation.threads = Some(threads);
        }
        if cli_overrides.single_step {
            self.simulation.auto_advance = false;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
            self.input.cells.clear();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }

    /// Engine options derived from the simulation section
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            auto_advance: self.simulation.auto_advance,
            threads: self.simulation.threads,
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<i64>,
    pub generations: Option<u64>,
    pub threads: Option<usize>,
    pub single_step: bool,
    pub pattern_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}
