use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tally_core::time::DEFAULT_TIMEZONE;
use tally_core::{DEFAULT_CATEGORIES, DEFAULT_PEOPLE};

use crate::session::DEFAULT_PASSPHRASE;
use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSection,
    pub session: SessionSection,
    pub form: FormSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Expense log CSV; defaults to ~/.tally/expenses.csv
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Shared passphrase for the session gate. Not a security boundary.
    pub passphrase: String,
    /// IANA timezone used for "now", "today" and "this month"
    pub timezone: String,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSection {
    pub currency_symbol: String,
    pub categories: Vec<String>,
    pub people: Vec<String>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            passphrase: DEFAULT_PASSPHRASE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for FormSection {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            people: DEFAULT_PEOPLE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

/// Load `path`, or ~/.tally/config.toml when `None`. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
