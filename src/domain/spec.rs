use serde::Serialize;
use std::collections::HashMap;

/// Normalized, runtime-agnostic launch configuration of a container.
///
/// Built by [`parse_inspect_json`](super::parse_inspect_json), optionally extended with extra
/// volumes/ports, then consumed by [`generate_run_args`](super::generate_run_args).
/// Every collection defaults to empty; nothing here is ever "null".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerSpecification {
    pub name: String,
    pub image: String,
    /// `KEY=VALUE` entries, source order.
    pub environment: Vec<String>,
    /// `source:destination` or `source:destination:ro`.
    pub volumes: Vec<String>,
    /// `hostPort:containerPort`, protocol stripped.
    pub ports: Vec<String>,
    pub networks: Vec<String>,
    pub command: Vec<String>,
    /// Only the first element survives generation.
    pub entry_point: Vec<String>,
    pub working_directory: String,
    pub labels: HashMap<String, String>,
    /// `hostPath:containerPath`.
    pub devices: Vec<String>,
    /// `hostname:ip`, verbatim.
    pub extra_hosts: Vec<String>,
    /// Empty means "no restart policy".
    pub restart_policy: String,
}

impl ContainerSpecification {
    pub fn add_volume(&mut self, source: &str, destination: &str) {
        self.volumes.push(format!("{source}:{destination}"));
    }

    pub fn add_port(&mut self, host: u16, container: u16) {
        self.ports.push(format!("{host}:{container}"));
    }
}

/// Small set of overrides applied at generation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOverrides {
    /// Replaces the specification's name in `--name` when present and non-empty.
    pub name: Option<String>,
}

impl RunOverrides {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
