use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Config file read by `start` and `validate` when `--config` is omitted
pub const DEFAULT_CONFIG_PATH: &str = "souperb.yaml";

#[derive(Parser, Debug)]
#[command(name = "souperb")]
#[command(about = "Souperb - soup recommendations, shelves, and CarroQueen the soup advisor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP backend
    Start {
        /// Path to the configuration file; environment variables are used
        /// when it does not exist
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the HTTP port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the log format (pretty, json, compact)
        #[arg(long)]
        log_format: Option<String>,
    },

    /// Validate configuration without starting the server
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a new configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_overrides() {
        let cli = Cli::try_parse_from([
            "souperb",
            "start",
            "--port",
            "8080",
            "--log-format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Start {
                config,
                host,
                port,
                log_format,
            } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
                assert_eq!(log_format.as_deref(), Some("json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_init_output() {
        let cli = Cli::try_parse_from(["souperb", "init", "-o", "conf/souperb.yaml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Init { output } if output == PathBuf::from("conf/souperb.yaml")
        ));
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["souperb", "start", "--port", "99999"]).is_err());
    }
}
