//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.
//! Every handler receives a [`Context`] carrying the config location and the
//! output formatter, and reports failures through [`Context::fail`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gxwf_core::{Config, ConfigManager, Error, Login, Result};
use gxwf_galaxy::GalaxyClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod alias;
mod completions;
mod datasets;
mod edit;
mod invocations;
mod invoke;
mod list;
mod login;
mod report;
mod upload;

/// gxwf - Galaxy workflow client
///
/// List, alias and invoke workflows on Galaxy servers from the command line.
#[derive(Parser, Debug)]
#[command(name = "gxwf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Path of the config file (default: ~/.gxwf)
    #[arg(long, global = true, env = "GXWF_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage logins to Galaxy servers
    #[command(subcommand)]
    Login(login::LoginCommands),

    /// List workflows
    List(list::ListArgs),

    /// List datasets
    Datasets(datasets::DatasetsArgs),

    /// Upload a dataset, or import a workflow from a .ga file
    Upload(upload::UploadArgs),

    /// Invoke a workflow
    Invoke(invoke::InvokeArgs),

    /// Manage aliases for workflow and dataset IDs
    #[command(subcommand)]
    Alias(alias::AliasCommands),

    /// Show job states of workflow invocations
    Invocations(invocations::InvocationsArgs),

    /// Fetch the report of a workflow invocation
    Report(report::ReportArgs),

    /// Print the editor URL of a workflow
    Edit(edit::EditArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Per-invocation state shared by all command handlers
pub struct Context {
    config_manager: ConfigManager,
    formatter: Formatter,
}

/// An active login with a verified connection to its server
pub struct Session {
    pub config: Config,
    pub login_name: String,
    pub login: Login,
    pub client: GalaxyClient,
}

impl Context {
    pub fn new(config_manager: ConfigManager, output_config: OutputConfig) -> Self {
        Self {
            config_manager,
            formatter: Formatter::new(output_config),
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub fn load_config(&self) -> Result<Config> {
        self.config_manager.load()
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        self.config_manager.save(config)
    }

    /// Connect to the server of the active login
    pub async fn open_session(&self) -> Result<Session> {
        let config = self.load_config()?;
        let (name, login) = config.active_login()?;
        let (login_name, login) = (name.to_string(), login.clone());

        tracing::debug!(login = %login_name, url = %login.url, "opening session");
        let client = GalaxyClient::open(&login).await?;

        Ok(Session {
            config,
            login_name,
            login,
            client,
        })
    }

    /// Report an error and return its exit code
    pub fn fail(&self, error: &Error) -> ExitCode {
        self.formatter.error(&error.to_string());
        ExitCode::from(error)
    }

    /// Turn a handler result into an exit code
    pub fn finish(&self, result: Result<()>) -> ExitCode {
        match result {
            Ok(()) => ExitCode::Success,
            Err(e) => self.fail(&e),
        }
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    if let Commands::Completions(args) = cli.command {
        return completions::execute(args);
    }

    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => match ConfigManager::new() {
            Ok(cm) => cm,
            Err(e) => {
                let formatter = Formatter::new(output_config);
                formatter.error(&e.to_string());
                return ExitCode::from(&e);
            }
        },
    };
    let ctx = Context::new(config_manager, output_config);

    match cli.command {
        Commands::Login(cmd) => login::execute(cmd, &ctx).await,
        Commands::List(args) => list::execute(args, &ctx).await,
        Commands::Datasets(args) => datasets::execute(args, &ctx).await,
        Commands::Upload(args) => upload::execute(args, &ctx).await,
        Commands::Invoke(args) => invoke::execute(args, &ctx).await,
        Commands::Alias(cmd) => alias::execute(cmd, &ctx).await,
        Commands::Invocations(args) => invocations::execute(args, &ctx).await,
        Commands::Report(args) => report::execute(args, &ctx).await,
        Commands::Edit(args) => edit::execute(args, &ctx),
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Wait for the interrupt `signal` and return the code to exit with
///
/// Returns `None` if the signal cannot be listened for.
pub async fn wait_for_interrupt<S>(signal: S) -> Option<ExitCode>
where
    S: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => Some(ExitCode::Interrupted),
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "gxwf",
            "--json",
            "--config",
            "/tmp/gxwf.yml",
            "alias",
            "list",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/gxwf.yml")));
        assert!(matches!(cli.command, Commands::Alias(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gxwf", "list", "--quiet", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["gxwf"]).is_err());
    }

    #[tokio::test]
    async fn test_interrupt_exits_with_130() {
        let code = wait_for_interrupt(async { Ok(()) }).await;
        assert_eq!(code, Some(ExitCode::Interrupted));
        assert_eq!(code.map(ExitCode::as_i32), Some(130));
    }

    #[tokio::test]
    async fn test_interrupt_listener_failure_is_ignored() {
        let code = wait_for_interrupt(async {
            Err(std::io::Error::other("no signal handler"))
        })
        .await;
        assert_eq!(code, None);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
