// src/config/validate.rs

use std::collections::HashSet;

use anyhow::{anyhow, Context, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - the semester name parses (`"25WS"` style)
/// - there is at least one unit and no duplicate unit names
/// - entry-point file names are plain file names
///
/// It does **not** touch the filesystem: whether unit directories or entry
/// points actually exist is decided per unit at build time, since a missing
/// directory is a normal state, not a config error.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    cfg.semester_year()
        .context("invalid active_semester in config")?;
    ensure_has_units(cfg)?;
    validate_entry_point(&cfg.entry_points.lesson, "lesson")?;
    validate_entry_point(&cfg.entry_points.exercise, "exercise")?;
    Ok(())
}

fn ensure_has_units(cfg: &ConfigFile) -> Result<()> {
    if cfg.units.is_empty() {
        return Err(anyhow!("config must list at least one unit in `units`"));
    }

    let mut seen = HashSet::new();
    for unit in cfg.units.iter() {
        if unit.trim().is_empty() {
            return Err(anyhow!("config contains an empty unit name"));
        }
        if !seen.insert(unit.as_str()) {
            return Err(anyhow!("duplicate unit '{}' in `units`", unit));
        }
    }
    Ok(())
}

fn validate_entry_point(name: &str, which: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("[entry_points].{} must not be empty", which));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(anyhow!(
            "[entry_points].{} must be a plain file name, got '{}'",
            which,
            name
        ));
    }
    Ok(())
}
