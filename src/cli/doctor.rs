use super::App;
use crate::infra::config::DEFAULT_CONFIG_NAME;
use anyhow::{Result, bail};
use std::path::Path;

pub fn run(app: &App, config_dir: &Path) -> Result<()> {
    println!("🔍 Checando dependências e configuração...");
    let binary = &app.settings().binary;

    let available = app.container_service.is_command_available();
    if available {
        println!("✅ {binary} disponível");
    } else {
        println!("⚠️  {binary} não encontrado no PATH");
    }

    let config_file = config_dir.join(DEFAULT_CONFIG_NAME);
    if config_file.exists() {
        println!("✅ Config: {:?}", config_file);
    } else {
        println!(
            "ℹ️  Sem {:?}, usando valores padrão (use devswap init)",
            config_file
        );
    }

    if !available {
        bail!("{binary} é obrigatório");
    }

    Ok(())
}
