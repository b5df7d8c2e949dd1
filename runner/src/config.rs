//! Self-test configuration
//!
//! The configuration is read from a TOML file by the runner which will configure the
//! appropriate environment variables during the firmware build.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use bn_sum4_config as env_names;
use serde::Deserialize;

use crate::path::get_workspace_path;

/// Default target triple, the smallest RISC-V profile with a prebuilt `core`.
pub const DEFAULT_TRIPLE: &str = "riscv32i-unknown-none-elf";

// ——————————————————————————— Config Definition ———————————————————————————— //

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub target: Target,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Log {
    pub level: Option<String>,
    pub color: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Platform {
    pub name: Option<String>,
    pub result_address: Option<usize>,
    pub done_address: Option<usize>,
    pub console_address: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Target {
    pub triple: Option<String>,
    pub profile: Option<Profiles>,
    pub start_address: Option<usize>,
    pub stack_size: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Profiles {
    Debug,
    Release,
}

impl Target {
    pub fn triple(&self) -> &str {
        self.triple.as_deref().unwrap_or(DEFAULT_TRIPLE)
    }

    pub fn profile(&self) -> Profiles {
        self.profile.unwrap_or(Profiles::Debug)
    }
}

// ————————————————————————— Environment Variables —————————————————————————— //

impl Config {
    pub fn build_envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();
        envs.extend(self.log.build_envs());
        envs.extend(self.platform.build_envs());
        envs
    }
}

impl Log {
    fn build_envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();
        if let Some(level) = &self.level {
            envs.insert(String::from(env_names::LOG_LEVEL_ENV), level.clone());
        }
        if let Some(color) = self.color {
            envs.insert(String::from(env_names::LOG_COLOR_ENV), format!("{}", color));
        }
        envs
    }
}

impl Platform {
    fn build_envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();
        if let Some(name) = &self.name {
            envs.insert(String::from(env_names::PLATFORM_NAME_ENV), name.clone());
        }
        if let Some(addr) = self.result_address {
            envs.insert(
                String::from(env_names::RESULT_ADDRESS_ENV),
                format!("0x{:x}", addr),
            );
        }
        if let Some(addr) = self.done_address {
            envs.insert(
                String::from(env_names::DONE_ADDRESS_ENV),
                format!("0x{:x}", addr),
            );
        }
        if let Some(addr) = self.console_address {
            envs.insert(
                String::from(env_names::CONSOLE_ADDRESS_ENV),
                format!("0x{:x}", addr),
            );
        }
        envs
    }
}

// ————————————————————————————— Config Loader —————————————————————————————— //

/// Read the configuration, either from the provided path or from `config.toml` at the root of
/// the workspace.
///
/// A missing default configuration is not an error, defaults are used instead.
pub fn read_config(path: &Option<PathBuf>) -> Option<Config> {
    let config = match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Could not read '{}': {}", path.display(), err);
                return None;
            }
        },
        None => {
            let mut config_path = get_workspace_path();
            config_path.push("config.toml");
            fs::read_to_string(config_path).unwrap_or_else(|_| {
                log::info!("No config file found, using defaults");
                String::new()
            })
        }
    };

    parse_config(&config)
}

fn parse_config(config: &str) -> Option<Config> {
    match toml::from_str::<Config>(config) {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("Failed to parse configuration:\n{}", err.message());
            None
        }
    }
}

// ————————————————————————————————— Tests —————————————————————————————————— //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config() {
        let cfg = parse_config("").unwrap();
        assert!(cfg.build_envs().is_empty());
        assert_eq!(cfg.target.triple(), DEFAULT_TRIPLE);
        assert_eq!(cfg.target.profile(), Profiles::Debug);
    }

    #[test]
    fn full_config() {
        let cfg = parse_config(
            r#"
            [log]
            level = "debug"
            color = true

            [platform]
            name = "sim"
            result_address = 0x10000000
            done_address = 0x10000004
            console_address = 0x10000008

            [target]
            triple = "riscv32imac-unknown-none-elf"
            profile = "release"
            start_address = 0x80000000
            stack_size = 4096
            "#,
        )
        .unwrap();

        let envs = cfg.build_envs();
        assert_eq!(envs["BN_SUM4_LOG_LEVEL"], "debug");
        assert_eq!(envs["BN_SUM4_LOG_COLOR"], "true");
        assert_eq!(envs["BN_SUM4_PLATFORM_NAME"], "sim");
        assert_eq!(envs["BN_SUM4_RESULT_ADDRESS"], "0x10000000");
        assert_eq!(envs["BN_SUM4_DONE_ADDRESS"], "0x10000004");
        assert_eq!(envs["BN_SUM4_CONSOLE_ADDRESS"], "0x10000008");
        assert_eq!(envs.len(), 6);

        assert_eq!(cfg.target.triple(), "riscv32imac-unknown-none-elf");
        assert_eq!(cfg.target.profile(), Profiles::Release);
        assert_eq!(cfg.target.start_address, Some(0x8000_0000));
        assert_eq!(cfg.target.stack_size, Some(4096));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse_config("[platform]\nresult = 0x1000").is_none());
        assert!(parse_config("[target]\nprofile = \"fast\"").is_none());
    }

    #[test]
    fn workspace_config_is_valid() {
        let mut path = get_workspace_path();
        path.push("config.toml");
        assert!(read_config(&Some(path)).is_some());
    }
}
