use clap::Parser;
use closgen::config_loader;
use closgen::render::generate_frr_configs;
use closgen::topology::{build_architecture, TwoTierClos};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Two-tier Clos fabric modeling and FRR configuration generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input YAML containing network implementation details
    #[arg(short, long)]
    input: PathBuf,

    /// Generate device configurations after modeling the network architecture
    #[arg(short, long)]
    generate: bool,

    /// Directory where configurations will be written
    #[arg(short, long, default_value = "frr_output")]
    output_dir: PathBuf,

    /// Write the complete device model as topology.json in the output directory
    #[arg(long)]
    dump_model: bool,
}

/// Serialize the fabric model as pretty JSON
fn write_model(clos: &TwoTierClos, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", output_dir.display()))?;

    let path = output_dir.join("topology.json");
    let json = serde_json::to_string_pretty(clos).wrap_err("Failed to serialize topology model")?;
    fs::write(&path, json).wrap_err_with(|| format!("Failed to write '{}'", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Input file: {:?}", args.input);

    // Parse input YAML
    let config = config_loader::load_config(&args.input)?;

    // Generate the fabric model for the selected architecture
    let clos = build_architecture(&config)
        .wrap_err_with(|| format!("Failed to build {} architecture", config.architecture))?;

    if args.dump_model {
        let path = write_model(&clos, &args.output_dir)?;
        info!("Wrote topology model to {:?}", path);
    }

    // Generate configuration files based on model
    if args.generate {
        info!("Output directory: {:?}", args.output_dir);
        let written = generate_frr_configs(&clos, &args.output_dir)
            .wrap_err("Failed to generate FRR configurations")?;
        info!("Generated {} configuration files for {} devices", written.len(), clos.devices().count());
    }

    Ok(())
}
