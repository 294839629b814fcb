use super::error::ParseError;
use super::spec::ContainerSpecification;
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

const NO_RESTART: &str = "no";

// The runtime writes `null` for empty sections; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One element of `<runtime> inspect` output. Only the fields we translate are declared.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct InspectRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    config: ConfigSection,
    #[serde(default, deserialize_with = "null_as_default")]
    mounts: Vec<MountRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    network_settings: NetworkSection,
    #[serde(default, deserialize_with = "null_as_default")]
    host_config: HostSection,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct ConfigSection {
    #[serde(default, deserialize_with = "null_as_default")]
    image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    env: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    cmd: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    entrypoint: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    labels: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    working_dir: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct MountRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    r#type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    destination: String,
    #[serde(rename = "RW", default, deserialize_with = "null_as_default")]
    rw: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct NetworkSection {
    #[serde(default, deserialize_with = "null_as_default")]
    networks: IndexMap<String, IgnoredAny>,
    #[serde(default, deserialize_with = "null_as_default")]
    ports: IndexMap<String, Option<Vec<PortBinding>>>,
}

#[derive(Deserialize, Debug, Default)]
struct PortBinding {
    #[serde(rename = "HostPort", default, deserialize_with = "null_as_default")]
    host_port: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct HostSection {
    #[serde(default, deserialize_with = "null_as_default")]
    devices: Vec<DeviceRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    restart_policy: RestartPolicy,
    #[serde(default, deserialize_with = "null_as_default")]
    extra_hosts: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct DeviceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    path_on_host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    path_in_container: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct RestartPolicy {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

/// Parses `<runtime> inspect <name>` output into a [`ContainerSpecification`].
///
/// The document is an array of inspection objects; only the first one is used.
/// Missing or `null` sections become empty values, while a present value of the wrong
/// type fails with [`ParseError::MalformedJson`].
pub fn parse_inspect_json(document: &str) -> Result<ContainerSpecification, ParseError> {
    let records: Vec<InspectRecord> = serde_json::from_str(document)?;
    let record = records.into_iter().next().ok_or(ParseError::EmptyResult)?;

    let InspectRecord {
        name,
        config,
        mounts,
        network_settings,
        host_config,
    } = record;

    let restart_policy = match host_config.restart_policy.name.as_str() {
        "" | NO_RESTART => String::new(),
        other => other.to_string(),
    };

    Ok(ContainerSpecification {
        name: name.strip_prefix('/').unwrap_or(&name).to_string(),
        image: config.image,
        environment: config.env,
        volumes: mounts.iter().filter_map(volume_entry).collect(),
        ports: port_entries(&network_settings.ports),
        networks: network_settings.networks.into_keys().collect(),
        command: config.cmd,
        entry_point: config.entrypoint,
        working_directory: config.working_dir,
        labels: config.labels,
        devices: host_config
            .devices
            .iter()
            .map(|d| format!("{}:{}", d.path_on_host, d.path_in_container))
            .collect(),
        extra_hosts: host_config.extra_hosts,
        restart_policy,
    })
}

fn volume_entry(mount: &MountRecord) -> Option<String> {
    match mount.r#type.as_str() {
        "bind" | "volume" => {
            let mut entry = format!("{}:{}", mount.source, mount.destination);
            if !mount.rw {
                entry.push_str(":ro");
            }
            Some(entry)
        }
        // tmpfs, npipe, cluster...
        _ => None,
    }
}

// One entry per binding with a host port. Multiple bindings for the same container port
// (IPv4 + IPv6) yield repeated entries.
fn port_entries(ports: &IndexMap<String, Option<Vec<PortBinding>>>) -> Vec<String> {
    let mut entries = Vec::new();

    for (container_port, bindings) in ports {
        let container_port = container_port
            .split_once('/')
            .map_or(container_port.as_str(), |(port, _proto)| port);

        for binding in bindings.iter().flatten() {
            if binding.host_port.is_empty() {
                continue;
            }
            entries.push(format!("{}:{}", binding.host_port, container_port));
        }
    }

    entries
}
