use crate::domain::{ContainerRuntime, ContainerSpecification, ParseError, parse_inspect_json};
use anyhow::{Context, Result, bail};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Inspects `name` and parses the result into a specification.
    pub fn specification(&self, name: &str) -> Result<ContainerSpecification> {
        info!(" Inspecionando container '{name}'...");
        let document = self.runtime.inspect(name)?;

        match parse_inspect_json(&document) {
            Ok(spec) => Ok(spec),
            Err(ParseError::EmptyResult) => bail!("Container '{name}' não encontrado"),
            Err(e) => Err(e).with_context(|| format!("lendo configuração de '{name}'")),
        }
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        let exists = self.runtime.container_exists(name)?;
        debug!("Container '{name}' existe: {exists}");
        Ok(exists)
    }

    pub fn run_detached(&self, args: &[String]) -> Result<String> {
        let id = self.runtime.run_detached(args)?;
        info!(" Container iniciado: {id}");
        Ok(id)
    }

    /// Polls until `name` reports running, giving up after `timeout`.
    pub fn wait_until_running(&self, name: &str, timeout: Duration, interval: Duration) -> Result<()> {
        info!("ﱮ Aguardando '{name}' ficar pronto...");
        let deadline = Instant::now() + timeout;

        while Instant::now() < deadline {
            match self.runtime.is_running(name) {
                Ok(true) => {
                    info!(" '{name}' está rodando");
                    return Ok(());
                }
                Ok(false) => debug!("{name} ainda não está rodando"),
                Err(e) => debug!("Erro ao consultar estado de {name}: {e}"),
            }

            thread::sleep(interval);
        }

        bail!("Timeout aguardando o container '{name}' iniciar ({timeout:?})")
    }

    pub fn exec_capture(&self, container: &str, command: &[String]) -> Result<String> {
        self.runtime.exec_capture(container, command)
    }

    pub fn exec_streaming(&self, container: &str, command: &[String]) -> Result<()> {
        self.runtime.exec_streaming(container, command)
    }

    pub fn stop(&self, name: &str) -> Result<()> {
        info!(" Parando '{name}'...");
        self.runtime.stop_container(name)
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        info!(" Removendo '{name}'...");
        self.runtime.remove_container(name)
    }

    pub fn is_command_available(&self) -> bool {
        self.runtime.is_command_available()
    }
}
