use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program and leading arguments used to inspect containers.
    pub inspect_command: String,
    pub format: OutputFormat,
    pub log_level: Option<String>,
}

impl Config {
    /// Split `inspect_command` into an argv with shell quoting rules.
    pub fn inspect_argv(&self) -> Result<Vec<String>> {
        let argv = match shell_words::split(&self.inspect_command) {
            Ok(argv) => argv,
            Err(e) => bail!("invalid inspect_command {:?}: {e}", self.inspect_command),
        };
        if argv.is_empty() {
            bail!("inspect_command cannot be blank");
        }
        Ok(argv)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inspect_command: "docker inspect".to_string(),
            format: OutputFormat::Text,
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inspects_with_docker() {
        let argv = Config::default().inspect_argv().unwrap();
        assert_eq!(argv, vec!["docker", "inspect"]);
    }

    #[test]
    fn quoted_arguments_survive_splitting() {
        let cfg = Config {
            inspect_command: r#"docker --context "remote host" inspect"#.into(),
            ..Config::default()
        };
        assert_eq!(
            cfg.inspect_argv().unwrap(),
            vec!["docker", "--context", "remote host", "inspect"]
        );
    }

    #[test]
    fn blank_or_unbalanced_commands_are_rejected() {
        let blank = Config {
            inspect_command: "   ".into(),
            ..Config::default()
        };
        assert!(blank.inspect_argv().is_err());

        let unbalanced = Config {
            inspect_command: "docker 'inspect".into(),
            ..Config::default()
        };
        assert!(unbalanced.inspect_argv().is_err());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: Config = serde_yaml::from_str("format: json\n").unwrap();
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.inspect_command, "docker inspect");
        assert!(cfg.log_level.is_none());
    }

    #[test]
    fn format_names_match_config_values() {
        for format in [OutputFormat::Text, OutputFormat::Json] {
            let yaml = format!("format: {}\n", format.as_str());
            let cfg: Config = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(cfg.format, format);
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(serde_yaml::from_str::<Config>("format: xml\n").is_err());
    }
}
