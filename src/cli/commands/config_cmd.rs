//! config command - Get, set, or list configuration values

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};

use super::{emit, Context};
use crate::config::Config;

/// Get a configuration value. Defaults are shown for unset keys.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = ctx.config.get_value(key)?;
    emit(ctx, &value, || println!("{}", value))
}

/// Set a configuration value and write the file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();
    config
        .set_value(key, value)
        .with_context(|| format!("Cannot set {}", key))?;
    let path = config.write().context("Failed to write config")?;

    ctx.say(format!("Set {} = {} in {}", key, value, path.display()));
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let values = Config::KEYS
        .iter()
        .map(|key| Ok((*key, ctx.config.get_value(key)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    emit(ctx, &values, || {
        match ctx.config.path() {
            Some(path) => println!("# {}", path.display()),
            None => println!("# defaults (no config file)"),
        }
        for key in Config::KEYS {
            if let Some(value) = values.get(key) {
                println!("{} = {}", key, value);
            }
        }
    })
}

/// Print where the config file is (or would be written).
pub fn path(ctx: &Context) -> Result<()> {
    let path = match ctx.config.path() {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    let display = path.display().to_string();
    emit(ctx, &display, || println!("{}", display))
}
