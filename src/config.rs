use crate::algos::{DEFAULT_TEAM_SIZE, HeadcountPolicy, THREE_PERSON_EVENTS};
use crate::solver::Settings;
use eyre::{Result, WrapErr, bail, ensure};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration file read when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "sciflow.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub solver: SolverConfig,
    pub headcounts: HeadcountConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub team_size: usize,
    pub team_count: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            team_count: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadcountConfig {
    pub default: usize,
    /// When present, replaces the built-in table of three-person events.
    pub events: Option<IndexMap<String, usize>>,
}

impl Default for HeadcountConfig {
    fn default() -> Self {
        Self {
            default: 2,
            events: None,
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config> {
        let content = fs::read_to_string(file_name).wrap_err_with(|| {
            format!("cannot load configuration file {}", file_name.display())
        })?;
        Self::parse(&content)
            .wrap_err_with(|| format!("cannot parse configuration file {}", file_name.display()))
    }

    /// Load the given file, or the default one if it exists, or fall back to
    /// the built-in configuration.
    pub fn load_or_default(file_name: Option<&Path>) -> Result<Config> {
        match file_name {
            Some(file_name) => Self::load(file_name),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                debug!("no configuration file, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        ensure!(
            config.solver.team_size > 0,
            "solver.team_size must be at least 1"
        );
        ensure!(
            config.solver.team_count > 0,
            "solver.team_count must be at least 1"
        );
        ensure!(
            config.headcounts.default > 0,
            "headcounts.default must be at least 1"
        );
        if let Some((event, _)) = config
            .headcounts
            .events
            .iter()
            .flatten()
            .find(|&(_, &n)| n == 0)
        {
            bail!("headcount for {event} must be at least 1");
        }
        Ok(config)
    }

    pub fn headcounts(&self) -> HeadcountPolicy {
        match &self.headcounts.events {
            Some(events) => events
                .iter()
                .fold(HeadcountPolicy::new(self.headcounts.default), |policy, (event, &n)| {
                    policy.with_event(event.clone(), n)
                }),
            None => THREE_PERSON_EVENTS
                .iter()
                .fold(HeadcountPolicy::new(self.headcounts.default), |policy, event| {
                    policy.with_event(*event, 3)
                }),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            team_size: self.solver.team_size,
            headcounts: self.headcounts(),
        }
    }
}
