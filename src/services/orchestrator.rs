use crate::domain::{ContainerSpecification, RunOverrides, generate_run_args, render_run_command};
use crate::infra::Settings;
use crate::services::ContainerService;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the user asked for: clone `source` into `dev_name` with extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevContainerRequest {
    pub source: String,
    pub dev_name: String,
    /// Host directory mounted at [`Settings::swap_target`]
    pub swap_dir: Option<PathBuf>,
    pub debugger: bool,
    /// Shell command run via `sh -c` once the container is up
    pub inject: Option<String>,
}

/// Derived specification plus the `run` arguments for it.
#[derive(Debug, Clone)]
pub struct DevContainerPlan {
    pub spec: ContainerSpecification,
    pub overrides: RunOverrides,
    pub args: Vec<String>,
}

impl DevContainerPlan {
    /// Shell-quoted form of [`DevContainerPlan::args`]
    pub fn rendered(&self) -> String {
        render_run_command(&self.spec, Some(&self.overrides))
    }
}

/// Drives the create-dev-container workflow on top of [`ContainerService`].
pub struct DevContainerOrchestrator {
    container_service: Arc<ContainerService>,
    settings: Settings,
}

impl DevContainerOrchestrator {
    pub fn new(container_service: Arc<ContainerService>, settings: Settings) -> Self {
        Self {
            container_service,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Inspects the source container and derives the dev container's `run` arguments.
    pub fn plan(&self, request: &DevContainerRequest) -> Result<DevContainerPlan> {
        let mut spec = self
            .container_service
            .specification(&request.source)
            .context("falha ao obter configuração do container")?;

        if let Some(dir) = &request.swap_dir {
            let dir = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
            info!(" Adicionando volume dev-swap: {}:{}", dir, self.settings.swap_target);
            spec.add_volume(&dir, &self.settings.swap_target);
        }

        if request.debugger {
            let port = self.settings.debugger_port;
            info!(" Adicionando porta do debugger: {port}:{port}");
            spec.add_port(port, port);
        }

        let overrides = RunOverrides::named(request.dev_name.clone());
        let args = generate_run_args(&spec, Some(&overrides));
        debug!("run args: {:?}", args);

        Ok(DevContainerPlan {
            spec,
            overrides,
            args,
        })
    }

    /// Creates and starts the dev container.
    ///
    /// Run and readiness failures abort; debugger installation and the inject command only warn.
    pub fn create(&self, request: &DevContainerRequest) -> Result<DevContainerPlan> {
        info!(" Criando dev container '{}'...", request.dev_name);

        let plan = self.plan(request)?;
        info!(" {} run -d {}", self.settings.binary, plan.rendered());

        self.container_service
            .run_detached(&plan.args)
            .context("falha ao rodar o dev container")?;

        self.container_service
            .wait_until_running(
                &request.dev_name,
                self.settings.ready_timeout,
                self.settings.ready_interval,
            )
            .context("o container não iniciou")?;

        if request.debugger {
            if let Err(e) = self.install_debugger(&request.dev_name) {
                warn!("Falha ao instalar o debugger: {e:#}");
            }
        }

        if let Some(script) = request.inject.as_deref() {
            if let Err(e) = self.execute_in_container(&request.dev_name, script) {
                warn!("Falha ao executar o script de inicialização: {e:#}");
            }
        }

        info!(" Dev container '{}' criado!", request.dev_name);
        Ok(plan)
    }

    /// Installs the debugger (delve by default) into a running container that has Go.
    pub fn install_debugger(&self, container: &str) -> Result<()> {
        info!(" Instalando debugger em '{container}'...");

        if self
            .container_service
            .exec_capture(container, &strings(&["which", "go"]))
            .is_err()
        {
            bail!("Go não está instalado em '{container}', não é possível instalar o debugger");
        }

        debug!("Go encontrado, instalando debugger...");
        self.container_service
            .exec_streaming(container, &self.settings.debugger_install)
            .context("falha ao instalar o debugger")?;

        let verify = self
            .container_service
            .exec_capture(
                container,
                &strings(&["sh", "-c", "command -v dlv || echo 'dlv not found'"]),
            )
            .context("falha ao verificar a instalação do debugger")?;

        if verify.contains("not found") {
            bail!("debugger instalado mas não encontrado no PATH");
        }

        info!(" Debugger instalado em '{container}'");
        Ok(())
    }

    pub fn execute_in_container(&self, container: &str, script: &str) -> Result<()> {
        info!(" Executando em '{container}': {script}");
        self.container_service
            .exec_streaming(container, &strings(&["sh", "-c", script]))
    }

    /// Stops (best effort) and removes an existing dev container.
    pub fn replace_existing(&self, name: &str) -> Result<()> {
        if let Err(e) = self.container_service.stop(name) {
            warn!("Erro ao parar '{name}': {e:#}");
        }

        self.container_service
            .remove(name)
            .with_context(|| format!("falha ao remover '{name}'"))
    }

    pub fn dev_container_exists(&self, name: &str) -> Result<bool> {
        self.container_service.exists(name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
