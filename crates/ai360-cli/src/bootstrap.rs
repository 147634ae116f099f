use anyhow::Context;
use ai360_config::Ai360Config;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration. `--data-dir` wins over
/// `general.data_dir`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<Ai360Config> {
    load_dotenv()?;

    let mut config = Ai360Config::load().context("failed to load ai360 configuration")?;
    if let Some(dir) = &flags.data_dir {
        config.general.data_dir = dir.display().to_string();
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(anyhow::anyhow!("failed to load .env file: {error}")),
    }
}
