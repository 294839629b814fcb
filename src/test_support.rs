use crate::domain::ContainerRuntime;
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockContainer {
    pub running: bool,
    pub run_args: Vec<String>,
}

/// In-memory [`ContainerRuntime`] that records every call as `operation:target`.
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<HashMap<String, MockContainer>>,
    inspects: RwLock<HashMap<String, String>>,
    exec_outputs: RwLock<HashMap<String, String>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    start_on_run: RwLock<bool>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            inspects: RwLock::new(HashMap::new()),
            exec_outputs: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            start_on_run: RwLock::new(true),
        }
    }

    pub fn add_container(&self, name: &str, running: bool) {
        self.containers.write().unwrap().insert(
            name.to_string(),
            MockContainer {
                running,
                run_args: Vec::new(),
            },
        );
    }

    /// Registers the `inspect` output for `name`. Unknown names inspect as `[]`.
    pub fn add_inspect(&self, name: &str, document: &str) {
        self.inspects
            .write()
            .unwrap()
            .insert(name.to_string(), document.to_string());
    }

    /// Output of `exec_capture` for a command (tokens joined by spaces). Unknown commands fail.
    pub fn set_exec_output(&self, command: &str, output: &str) {
        self.exec_outputs
            .write()
            .unwrap()
            .insert(command.to_string(), output.to_string());
    }

    pub fn set_running(&self, name: &str, running: bool) {
        self.containers
            .write()
            .unwrap()
            .entry(name.to_string())
            .or_insert_with(|| MockContainer {
                running,
                run_args: Vec::new(),
            })
            .running = running;
    }

    /// Whether containers created by `run_detached` come up running (default: true).
    pub fn set_start_on_run(&self, start: bool) {
        *self.start_on_run.write().unwrap() = start;
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.containers.read().unwrap().contains_key(name)
    }

    pub fn is_running_now(&self, name: &str) -> bool {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .is_some_and(|c| c.running)
    }

    pub fn run_args(&self, name: &str) -> Option<Vec<String>> {
        self.containers
            .read()
            .unwrap()
            .get(name)
            .map(|c| c.run_args.clone())
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn inspect(&self, name: &str) -> Result<String> {
        self.record_command(&format!("inspect:{}", name));
        self.check_fail("inspect")?;

        Ok(self
            .inspects
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| "[]".to_string()))
    }

    fn container_exists(&self, name: &str) -> Result<bool> {
        self.record_command(&format!("exists:{}", name));
        self.check_fail("exists")?;
        Ok(self.has_container(name))
    }

    fn is_running(&self, name: &str) -> Result<bool> {
        self.record_command(&format!("is_running:{}", name));
        self.check_fail("is_running")?;
        Ok(self.is_running_now(name))
    }

    fn run_detached(&self, args: &[String]) -> Result<String> {
        let name = args
            .iter()
            .position(|a| a == "--name")
            .and_then(|i| args.get(i + 1))
            .cloned()
            .unwrap_or_default();

        self.record_command(&format!("run:{}", name));
        self.check_fail("run")?;

        let running = *self.start_on_run.read().unwrap();
        self.containers.write().unwrap().insert(
            name.clone(),
            MockContainer {
                running,
                run_args: args.to_vec(),
            },
        );

        Ok(format!("mock-{}", name))
    }

    fn exec_capture(&self, container: &str, command: &[String]) -> Result<String> {
        let joined = command.join(" ");
        self.record_command(&format!("exec:{}:{}", container, joined));
        self.check_fail("exec_capture")?;

        match self.exec_outputs.read().unwrap().get(&joined) {
            Some(output) => Ok(output.clone()),
            None => bail!("Mock exec sem saída configurada: {}", joined),
        }
    }

    fn exec_streaming(&self, container: &str, command: &[String]) -> Result<()> {
        self.record_command(&format!("exec:{}:{}", container, command.join(" ")));
        self.check_fail("exec_streaming")?;
        Ok(())
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("stop:{}", name));
        self.check_fail("stop")?;

        if let Some(container) = self.containers.write().unwrap().get_mut(name) {
            container.running = false;
        }
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("remove:{}", name));
        self.check_fail("remove")?;

        self.containers.write().unwrap().remove(name);
        Ok(())
    }

    fn is_command_available(&self) -> bool {
        self.record_command("is_available");
        self.check_fail("available").is_ok()
    }
}
