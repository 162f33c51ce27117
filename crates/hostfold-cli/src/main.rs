//! hostfold CLI
//!
//! Dynamic inventory script: reads an infrastructure state document from the
//! controller API and prints hosts and groups as inventory JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use eyre::WrapErr;
use hostfold_client::StateFetcher;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{Config, ControllerConfig, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "hostfold")]
#[command(about = "Dynamic inventory from infrastructure state", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $HOSTFOLD_CONFIG or hostfold.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Controller API base URL
    #[arg(long, global = true)]
    host: Option<String>,

    /// Basic auth username
    #[arg(long, global = true)]
    username: Option<String>,

    /// Basic auth password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Skip TLS certificate verification (`=false` overrides config and env)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    insecure_skip_verify: Option<bool>,

    /// State document path, relative to the host
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full inventory with host variables
    #[command(name = "list")]
    List {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the variables of a single host
    #[command(name = "host")]
    Host {
        /// Host name
        name: String,
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print group membership as text
    #[command(name = "groups")]
    Groups,
}

impl Cli {
    fn overrides(&self) -> ControllerConfig {
        ControllerConfig {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            insecure_skip_verify: self.insecure_skip_verify,
            state_endpoint: self.endpoint.clone(),
            timeout_secs: None,
        }
    }
}

fn init_tracing(log: &LogConfig, force_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if force_json || log.format == LogFormat::Json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    init_tracing(&config.log, cli.log_json);

    let controller = ControllerConfig::from_env()?
        .overlay(config.controller)
        .overlay(cli.overrides());
    let fetcher = StateFetcher::new(controller.connection()?)?;

    let inventory = fetcher
        .inventory()
        .await
        .wrap_err("failed to read inventory")?;

    match cli.command {
        Commands::List { pretty } => {
            println!("{}", render::to_output(&render::render_list(&inventory), pretty)?);
        }
        Commands::Host { name, pretty } => {
            println!(
                "{}",
                render::to_output(&render::render_host(&inventory, &name), pretty)?
            );
        }
        Commands::Groups => {
            print!("{}", render::render_groups(&inventory));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_insecure_flag_values() {
        let cli = parse(&["hostfold", "list"]);
        assert_eq!(cli.overrides().insecure_skip_verify, None);

        let cli = parse(&["hostfold", "--insecure-skip-verify", "list"]);
        assert_eq!(cli.overrides().insecure_skip_verify, Some(true));

        let cli = parse(&["hostfold", "--insecure-skip-verify=false", "list"]);
        assert_eq!(cli.overrides().insecure_skip_verify, Some(false));
    }

    #[test]
    fn test_insecure_flag_false_overrides_lower_layers() {
        let env_layer = ControllerConfig {
            insecure_skip_verify: Some(true),
            ..Default::default()
        };
        let cli = parse(&["hostfold", "groups", "--insecure-skip-verify=false"]);
        let merged = env_layer.overlay(cli.overrides());
        assert_eq!(merged.insecure_skip_verify, Some(false));
    }

    #[test]
    fn test_insecure_flag_rejects_bad_value() {
        let result = Cli::try_parse_from(["hostfold", "--insecure-skip-verify=maybe", "list"]);
        assert!(result.is_err());
    }
}
