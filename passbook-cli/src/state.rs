use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn passbook_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".passbook"))
}

pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

/// Already-extracted statement text, decoded lossily
pub fn read_text_input(path: &Path) -> Result<String> {
    let bytes = read_input(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
