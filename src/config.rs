use eyre::{WrapErr, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "rsalloc.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: Input,
    pub output: Output,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Input {
    pub staff: Option<PathBuf>,
    pub projects: Option<PathBuf>,
    pub students: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Output {
    pub allocation: Option<PathBuf>,
    pub details: bool,
}

impl Config {
    pub fn load(file_name: &Path) -> eyre::Result<Config> {
        let content = fs::read_to_string(file_name).wrap_err_with(|| {
            format!("cannot load configuration file {}", file_name.display())
        })?;
        Self::parse(&content)
            .wrap_err_with(|| format!("cannot parse configuration file {}", file_name.display()))
    }

    pub fn parse(content: &str) -> eyre::Result<Config> {
        Ok(toml::from_str(content)?)
    }

    /// Load the configuration file given on the command line, or the default
    /// one if it exists.
    pub fn load_or_default(file_name: Option<&Path>) -> eyre::Result<Config> {
        match file_name {
            Some(file_name) => Self::load(file_name),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Config::default()),
        }
    }
}

/// Pick the path given on the command line, or else the configured one.
pub fn get_path(
    cli: Option<PathBuf>,
    configured: &Option<PathBuf>,
    what: &str,
) -> eyre::Result<PathBuf> {
    cli.or_else(|| configured.clone())
        .ok_or_else(|| eyre!("no {what} file given on the command line or in the configuration"))
}
