pub mod create;
pub mod doctor;
pub mod prompt;
pub mod remove;
pub mod setup;
pub mod show;

use crate::domain::ContainerRuntime;
use crate::infra::config::{default_config_dir, load_app_config};
use crate::infra::{CliRuntime, Settings};
use crate::services::{ContainerService, DevContainerOrchestrator};
use anyhow::Result;
use clap::{Parser, Subcommand};
use create::CreateOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "devswap",
    version,
    about = "Clona um container em execução como um dev container (volume extra, debugger, script de init)"
)]
pub struct Cli {
    /// Diretório de configuração (default: ~/.config/devswap)
    #[arg(long, env = "DEVSWAP_CONFIG_DIR", default_value_os_t = default_config_dir())]
    pub config_dir: PathBuf,

    /// Cliente de containers a usar (docker, podman)
    #[arg(long, env = "DEVSWAP_RUNTIME")]
    pub runtime: Option<String>,

    /// Logs de debug
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cria o dev container a partir de um container existente
    Create(CreateOptions),
    /// Mostra a configuração derivada e o comando run equivalente
    Show {
        /// Container de origem
        source: String,
    },
    /// Para e remove um dev container
    Remove {
        /// Nome do dev container
        name: String,
    },
    /// Verifica dependências e configuração
    Doctor,
    /// Instala o devswap.toml padrão no diretório de configuração
    Init,
}

/// Wired services for one invocation.
pub struct App {
    pub container_service: Arc<ContainerService>,
    pub orchestrator: DevContainerOrchestrator,
}

impl App {
    pub fn new(config_dir: &Path, runtime_override: Option<String>) -> Result<Self> {
        let mut settings = load_app_config(config_dir)?.resolve()?;
        if let Some(binary) = runtime_override {
            settings.binary = binary;
        }

        let runtime = Arc::new(CliRuntime::new(settings.binary.clone()));
        Ok(Self::with_runtime(runtime, settings))
    }

    pub fn with_runtime(runtime: Arc<dyn ContainerRuntime>, settings: Settings) -> Self {
        let container_service = Arc::new(ContainerService::new(runtime));
        let orchestrator = DevContainerOrchestrator::new(container_service.clone(), settings);
        Self {
            container_service,
            orchestrator,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.orchestrator.settings()
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        config_dir,
        runtime,
        command,
        ..
    } = cli;
    let app = || App::new(&config_dir, runtime.clone());

    match command {
        Commands::Create(options) => create::run(
            &app()?,
            &options,
            &mut io::stdin().lock(),
            &mut io::stdout(),
        ),
        Commands::Show { source } => show::run(&app()?, &source, &mut io::stdout()),
        Commands::Remove { name } => remove::run(&app()?, &name),
        Commands::Doctor => doctor::run(&app()?, &config_dir),
        Commands::Init => setup::install(&config_dir),
    }
}
