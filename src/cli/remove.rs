use super::App;
use anyhow::Result;
use tracing::{info, warn};

pub fn run(app: &App, name: &str) -> Result<()> {
    if !app.orchestrator.dev_container_exists(name)? {
        warn!("Container '{name}' não existe, nada a remover");
        return Ok(());
    }

    app.orchestrator.replace_existing(name)?;
    info!(" Container '{name}' removido");
    Ok(())
}
