use anyhow::Result;
use std::fmt::Debug;

/// Trait for container runtime operations
///
/// Implemented by [`CliRuntime`](crate::infra::CliRuntime), which shells out to the docker or
/// podman client, and by the in-memory mock used in tests.
pub trait ContainerRuntime: Send + Sync + Debug {
    /// Raw `inspect` JSON for one container.
    ///
    /// "Not found" is reported as an empty JSON array (`[]`), not as an error, so the parser
    /// can tell it apart from a client that failed to execute.
    fn inspect(&self, name: &str) -> Result<String>;

    /// Check whether a container with exactly this name exists (running or not)
    fn container_exists(&self, name: &str) -> Result<bool>;

    /// Check whether a container is running
    fn is_running(&self, name: &str) -> Result<bool>;

    /// Run a detached container from the given `run` arguments, returning its id
    fn run_detached(&self, args: &[String]) -> Result<String>;

    /// Execute a command in a container and capture stdout
    fn exec_capture(&self, container: &str, command: &[String]) -> Result<String>;

    /// Execute a command in a container with inherited stdout/stderr
    fn exec_streaming(&self, container: &str, command: &[String]) -> Result<()>;

    /// Stop a container
    fn stop_container(&self, name: &str) -> Result<()>;

    /// Remove a container
    fn remove_container(&self, name: &str) -> Result<()>;

    /// Check if the client binary is available
    fn is_command_available(&self) -> bool;
}
