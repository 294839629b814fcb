use crate::infra::config::{DEFAULT_CONFIG_NAME, install_default_config};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn install(config_dir: &Path) -> Result<()> {
    info!(" Preparando config em {:?}", config_dir);

    if install_default_config(config_dir)? {
        info!(
            " Config pronto. Ajuste {:?} conforme necessário",
            config_dir.join(DEFAULT_CONFIG_NAME)
        );
    } else {
        info!(" {DEFAULT_CONFIG_NAME} já existe, nada alterado");
    }

    Ok(())
}
