use anyhow::{Context, Result};
use flexi_logger::Logger;
use wisp::{FieldConfig, Viewer};

fn setup_logging() -> Result<flexi_logger::LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::detailed_format)
        .start()?;
    log::info!("Adjust the log level by setting RUST_LOG. By default RUST_LOG=info");
    Ok(handle)
}

fn main() -> Result<()> {
    let _logger = setup_logging()?;

    let seed = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("the first argument must be a numeric seed")?;

    let mut viewer = Viewer::new().with_config(FieldConfig::default());
    if let Some(seed) = seed {
        log::info!("using seed {}", seed);
        viewer = viewer.with_seed(seed);
    }

    viewer.run()?;
    Ok(())
}
