use crate::config::InputConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse the input document from a YAML file
pub fn load_config(config_path: &Path) -> Result<InputConfig> {
    info!("Loading network details from: {:?}", config_path);

    // Open the input file
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open input file '{}'", config_path.display()))?;

    // Parse the YAML content
    let config: InputConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse input file '{}'", config_path.display()))?;

    info!(
        "Detected {} architecture with width {}",
        config.architecture, config.width
    );

    // Validate the configuration
    config.validate()?;

    Ok(config)
}
