//! `dbsc config` – show the effective configuration.

use anyhow::Result;
use dbsc_core::config::{self, DbscConfig};

pub fn run_config(cfg: &DbscConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", cfg.to_toml_string()?);
    Ok(())
}
