use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Subset of a `docker inspect` document that affects the run command.
///
/// Unknown fields are ignored; every known field is optional because the
/// translator renders whatever is present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InspectionRecord {
    pub id: Option<String>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub host_config: Option<HostConfig>,
    pub config: Option<ContainerConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostConfig {
    pub runtime: Option<String>,
    pub binds: Option<Vec<String>>,
    pub volumes_from: Option<Vec<String>>,
    /// Container port -> host bindings, in document order.
    pub port_bindings: Option<IndexMap<String, Option<Vec<PortBinding>>>>,
    pub links: Option<Vec<String>>,
    pub publish_all_ports: Option<bool>,
    pub network_mode: Option<String>,
    pub restart_policy: Option<RestartPolicy>,
    pub extra_hosts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PortBinding {
    pub host_ip: Option<String>,
    pub host_port: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RestartPolicy {
    pub name: Option<String>,
    pub maximum_retry_count: Option<i64>,
}

/// The image-level `Config` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerConfig {
    pub hostname: Option<String>,
    pub exposed_ports: Option<IndexMap<String, serde_json::Value>>,
    pub env: Option<Vec<String>>,
    pub attach_stdin: Option<bool>,
    pub attach_stdout: Option<bool>,
    pub attach_stderr: Option<bool>,
    pub tty: Option<bool>,
    pub open_stdin: Option<bool>,
    pub entrypoint: Option<Argv>,
    pub image: Option<String>,
    pub cmd: Option<Argv>,
}

/// `Entrypoint` and `Cmd` are argv lists, but older engines emit a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Argv {
    List(Vec<String>),
    Shell(String),
}

impl Argv {
    /// Space-joined tokens. A bare string is not an argv list and yields `None`.
    pub fn joined(&self) -> Option<String> {
        match self {
            Argv::List(args) => Some(args.join(" ")),
            Argv::Shell(_) => None,
        }
    }
}

/// One reconstructed container: short hashes, bare name, and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedResult {
    pub image: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub command: String,
}
