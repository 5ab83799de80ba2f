use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::draw::Color;

pub mod wayland;

/// Run the Wayland front-end until the user exits.
///
/// # Arguments
/// * `config` - Loaded and clamped configuration
/// * `storage_dir` - Directory holding the saved canvas slots
/// * `background` - Optional background color overriding the config
pub fn run_wayland(config: Config, storage_dir: PathBuf, background: Option<Color>) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(config, storage_dir, background);
    backend.run()
}
