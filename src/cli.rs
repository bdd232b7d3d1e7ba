use clap::Parser;

use crate::config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "rekcod",
    version,
    about = "Reverse-engineer `docker run` commands from `docker inspect` output",
    long_about = "rekcod turns container names or ids, files of `docker inspect` output, or \
                  inline inspect JSON into the `docker run` commands that would recreate them. \
                  With no inputs it reads stdin: either a JSON document or whitespace-separated ids."
)]
pub struct Cli {
    /// Container names or ids, paths to inspect output, or inline JSON
    pub inputs: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Command used to inspect containers (default: "docker inspect")
    #[arg(long, value_name = "CMD")]
    pub inspect_command: Option<String>,

    /// Minimum log level written to stderr (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Overlay command-line values on top of the file config.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(format) = self.format {
            cfg.format = format;
        }
        if let Some(command) = &self.inspect_command {
            cfg.inspect_command = command.clone();
        }
        if let Some(level) = &self.log_level {
            cfg.log_level = Some(level.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_inputs_is_allowed() {
        let cli = Cli::try_parse_from(["rekcod"]).unwrap();
        assert!(cli.inputs.is_empty());
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_mixed_inputs_keep_order() {
        let cli =
            Cli::try_parse_from(["rekcod", "web", "inspect.json", r#"{"Name":"/x"}"#]).unwrap();
        assert_eq!(cli.inputs, vec!["web", "inspect.json", r#"{"Name":"/x"}"#]);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "rekcod",
            "--format",
            "json",
            "--inspect-command",
            "podman inspect",
            "web",
        ])
        .unwrap();
        let mut cfg = Config::default();
        cli.apply(&mut cfg);
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.inspect_command, "podman inspect");
        assert!(cfg.log_level.is_none());
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let cli = Cli::try_parse_from(["rekcod", "web"]).unwrap();
        let mut cfg = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        cli.apply(&mut cfg);
        assert_eq!(cfg.format, OutputFormat::Json);
    }
}
