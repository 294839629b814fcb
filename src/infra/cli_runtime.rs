use crate::domain::ContainerRuntime;
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// [`ContainerRuntime`] backed by a docker-compatible command line client.
#[derive(Debug, Clone)]
pub struct CliRuntime {
    binary: String,
}

impl CliRuntime {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn output<I, S>(&self, args: I, context: &str) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args
            .into_iter()
            .map(|item| item.as_ref().to_os_string())
            .collect();
        debug!("{} {:?}", self.binary, args);

        Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("{context}: falha ao executar {}", self.binary))
    }

    fn checked<I, S>(&self, args: I, context: &str) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.output(args, context)?;
        ensure_success(&self.binary, &output, context)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl ContainerRuntime for CliRuntime {
    fn inspect(&self, name: &str) -> Result<String> {
        let context = format!("inspecionando container {name}");
        let output = self.output(["inspect", name], &context)?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        // docker prints `[]` and exits 1 when nothing matches
        if !output.status.success() && stdout.trim() != "[]" {
            ensure_success(&self.binary, &output, &context)?;
        }

        Ok(stdout)
    }

    fn container_exists(&self, name: &str) -> Result<bool> {
        let filter = format!("name=^{name}$");
        let out = self.checked(
            ["ps", "-a", "--filter", filter.as_str(), "--format", "{{.Names}}"],
            &format!("checando existência do container {name}"),
        )?;

        Ok(out.lines().any(|line| line.trim() == name))
    }

    fn is_running(&self, name: &str) -> Result<bool> {
        let output = self.output(
            ["inspect", "-f", "{{.State.Running}}", name],
            &format!("checando estado do container {name}"),
        )?;

        if !output.status.success() {
            return Ok(false);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim() == "true")
    }

    fn run_detached(&self, args: &[String]) -> Result<String> {
        let mut full = vec!["run".to_string(), "-d".to_string()];
        full.extend(args.iter().cloned());

        let out = self.checked(full, "criando container")?;
        Ok(out.trim().to_string())
    }

    fn exec_capture(&self, container: &str, command: &[String]) -> Result<String> {
        let mut full = vec!["exec".to_string(), container.to_string()];
        full.extend(command.iter().cloned());

        self.checked(full, &format!("executando {:?} em {container}", command))
    }

    fn exec_streaming(&self, container: &str, command: &[String]) -> Result<()> {
        let status = Command::new(&self.binary)
            .arg("exec")
            .arg(container)
            .args(command)
            .status()
            .with_context(|| format!("executando {:?} em {container}", command))?;

        if !status.success() {
            bail!(
                "{} exec retornou status {:?} ({:?} em {container})",
                self.binary,
                status,
                command
            );
        }

        Ok(())
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.checked(["stop", name], &format!("parando container {name}"))
            .map(|_| ())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.checked(["rm", name], &format!("removendo container {name}"))
            .map(|_| ())
    }

    fn is_command_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

fn ensure_success(binary: &str, output: &Output, context: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    bail!(
        "{binary} retornou status {:?} ({context}): {}",
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    )
}
