//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Press;

/// Remove generated pages
pub fn run(press: &Press) -> Result<()> {
    if press.public_dir.exists() {
        fs::remove_dir_all(&press.public_dir)?;
        tracing::info!("Deleted: {:?}", press.public_dir);
    }

    Ok(())
}
