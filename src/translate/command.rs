use indexmap::IndexMap;

use super::types::{ContainerConfig, HostConfig, InspectionRecord, PortBinding, RestartPolicy};

/// Accumulates a `docker run` line token by token.
///
/// Empty values are dropped so absent fields never leave dangling flags.
struct RunCommand {
    line: String,
}

impl RunCommand {
    fn new() -> Self {
        Self {
            line: "docker run".to_string(),
        }
    }

    fn flag(&mut self, flag: &str) {
        self.line.push(' ');
        self.line.push_str(flag);
    }

    fn option(&mut self, flag: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.line.push(' ');
        self.line.push_str(flag);
        self.line.push(' ');
        self.line.push_str(value);
    }

    fn bare(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        self.line.push(' ');
        self.line.push_str(value);
    }

    fn repeated<'a>(&mut self, flag: &str, values: impl IntoIterator<Item = &'a String>) {
        for value in values {
            self.option(flag, value);
        }
    }

    fn finish(self) -> String {
        self.line
    }
}

/// Render the full command line for `record`, using the already-normalized `name`.
pub(super) fn render(record: &InspectionRecord, name: Option<&str>) -> String {
    let mut cmd = RunCommand::new();
    cmd.option("--name", name.unwrap_or_default());

    let default_host = HostConfig::default();
    let host = record.host_config.as_ref().unwrap_or(&default_host);
    push_host_config(&mut cmd, host);

    let default_config = ContainerConfig::default();
    let config = record.config.as_ref().unwrap_or(&default_config);
    push_container_config(&mut cmd, config);

    let image = config
        .image
        .as_deref()
        .filter(|image| !image.is_empty())
        .or(record.image.as_deref());
    cmd.bare(image.unwrap_or_default());

    if let Some(args) = config.cmd.as_ref().and_then(|c| c.joined()) {
        cmd.bare(&args);
    }

    cmd.finish()
}

fn push_host_config(cmd: &mut RunCommand, host: &HostConfig) {
    if let Some(runtime) = &host.runtime {
        cmd.option("--runtime", runtime);
    }
    cmd.repeated("-v", host.binds.iter().flatten());
    cmd.repeated("--volumes-from", host.volumes_from.iter().flatten());
    if let Some(bindings) = &host.port_bindings {
        for published in published_ports(bindings) {
            cmd.option("-p", &published);
        }
    }
    for link in host.links.iter().flatten() {
        if link.is_empty() {
            continue;
        }
        cmd.option("--link", &link_alias(link));
    }
    if host.publish_all_ports == Some(true) {
        cmd.flag("-P");
    }
    if let Some(mode) = &host.network_mode
        && mode != "default"
    {
        cmd.option("--net", mode);
    }
    if let Some(policy) = &host.restart_policy {
        cmd.option("--restart", &restart_policy(policy));
    }
    cmd.repeated("--add-host", host.extra_hosts.iter().flatten());
}

fn push_container_config(cmd: &mut RunCommand, config: &ContainerConfig) {
    if let Some(hostname) = &config.hostname {
        cmd.option("-h", hostname);
    }
    if let Some(exposed) = &config.exposed_ports {
        for port in exposed.keys() {
            cmd.option("--expose", port);
        }
    }
    for env in config.env.iter().flatten() {
        if env.is_empty() {
            continue;
        }
        cmd.option("-e", &single_quote(env));
    }

    let stdin = config.attach_stdin == Some(true);
    let stdout = config.attach_stdout == Some(true);
    let stderr = config.attach_stderr == Some(true);
    if !stdin && !stdout && !stderr {
        cmd.flag("-d");
    }
    if stdin {
        cmd.option("-a", "stdin");
    }
    if stdout {
        cmd.option("-a", "stdout");
    }
    if stderr {
        cmd.option("-a", "stderr");
    }
    if config.tty == Some(true) {
        cmd.flag("-t");
    }
    if config.open_stdin == Some(true) {
        cmd.flag("-i");
    }

    if let Some(entrypoint) = config.entrypoint.as_ref().and_then(|e| e.joined())
        && !entrypoint.is_empty()
    {
        cmd.option("--entrypoint", &format!("\"{entrypoint}\""));
    }
}

/// One `-p` value per container port.
///
/// When a port has several host bindings only the last one is rendered;
/// `docker run` itself accepts repeated `-p` for the same port, so this loses
/// information. Kept for output compatibility with existing tooling.
fn published_ports(bindings: &IndexMap<String, Option<Vec<PortBinding>>>) -> Vec<String> {
    bindings
        .iter()
        .map(|(container_port, hosts)| {
            let host = hosts
                .iter()
                .flatten()
                .map(host_binding)
                .next_back()
                .unwrap_or_default();
            if host.is_empty() {
                container_port.clone()
            } else {
                format!("{host}:{container_port}")
            }
        })
        .collect()
}

fn host_binding(binding: &PortBinding) -> String {
    let port = binding.host_port.clone().unwrap_or_default();
    match binding.host_ip.as_deref() {
        Some(ip) if !ip.is_empty() => format!("{ip}:{port}"),
        _ => port,
    }
}

/// `/web/db:/web/database` -> `db:database`.
fn link_alias(link: &str) -> String {
    let mut parts = link.split(':');
    let target = parts.next().map(last_segment).unwrap_or_default();
    let alias = parts.next().map(last_segment).unwrap_or_default();
    format!("{target}:{alias}")
}

fn last_segment(part: &str) -> &str {
    part.rsplit('/').next().unwrap_or(part)
}

fn restart_policy(policy: &RestartPolicy) -> String {
    match policy.name.as_deref() {
        Some("on-failure") => {
            format!("on-failure:{}", policy.maximum_retry_count.unwrap_or(0))
        }
        Some(name) => name.to_string(),
        None => String::new(),
    }
}

/// Wrap in single quotes, escaping embedded quotes with the `'\''` idiom.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quote_escapes_embedded_quotes() {
        assert_eq!(single_quote("FOO=bar'baz"), r"'FOO=bar'\''baz'");
        assert_eq!(single_quote("PLAIN=1"), "'PLAIN=1'");
    }

    #[test]
    fn link_alias_strips_namespace_prefixes() {
        assert_eq!(link_alias("/db:/web/db"), "db:db");
        assert_eq!(link_alias("redis:cache"), "redis:cache");
    }

    #[test]
    fn link_without_alias_keeps_separator() {
        assert_eq!(link_alias("/db"), "db:");
    }

    #[test]
    fn restart_policy_rendering() {
        let on_failure = RestartPolicy {
            name: Some("on-failure".into()),
            maximum_retry_count: Some(3),
        };
        let always = RestartPolicy {
            name: Some("always".into()),
            maximum_retry_count: Some(0),
        };
        assert_eq!(restart_policy(&on_failure), "on-failure:3");
        assert_eq!(restart_policy(&always), "always");
        assert_eq!(restart_policy(&RestartPolicy::default()), "");
    }

    #[test]
    fn last_host_binding_wins() {
        let mut bindings = IndexMap::new();
        bindings.insert(
            "80/tcp".to_string(),
            Some(vec![
                PortBinding {
                    host_ip: None,
                    host_port: Some("8080".into()),
                },
                PortBinding {
                    host_ip: Some("127.0.0.1".into()),
                    host_port: Some("9090".into()),
                },
            ]),
        );
        assert_eq!(published_ports(&bindings), vec!["127.0.0.1:9090:80/tcp"]);
    }

    #[test]
    fn unbound_port_renders_container_port_only() {
        let mut bindings = IndexMap::new();
        bindings.insert("53/udp".to_string(), None);
        bindings.insert("443/tcp".to_string(), Some(vec![]));
        bindings.insert(
            "22/tcp".to_string(),
            Some(vec![PortBinding {
                host_ip: Some(String::new()),
                host_port: Some(String::new()),
            }]),
        );
        assert_eq!(published_ports(&bindings), vec!["53/udp", "443/tcp", "22/tcp"]);
    }
}
