//! Login management commands
//!
//! A login is a named Galaxy server URL and API key. Adding one creates the
//! `GXWF datasets` history on the server and makes the login active.

use clap::Subcommand;
use serde::Serialize;

use gxwf_core::history::create_managed_history;
use gxwf_core::login::mask_api_key;
use gxwf_core::{Error, Login, Result, SwitchOutcome};
use gxwf_galaxy::GalaxyClient;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::Table;

/// Login subcommands
#[derive(Subcommand, Debug)]
pub enum LoginCommands {
    /// Add a login and make it the active one
    ///
    /// A history named `GXWF datasets` is created on the server to hold the
    /// datasets gxwf uploads.
    Add(AddArgs),

    /// Show all configured logins
    View(ViewArgs),

    /// Activate a different login
    Switch(NameArgs),

    /// Delete a login that is no longer needed
    Delete(NameArgs),
}

/// Arguments for `login add`
#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// URL of the Galaxy server
    #[arg(long)]
    pub url: String,

    /// API key of your account on the server
    #[arg(long)]
    pub api_key: String,

    /// Handy name to refer to the login with
    #[arg(long)]
    pub name: String,
}

/// Arguments for `login view`
#[derive(clap::Args, Debug)]
pub struct ViewArgs {
    /// Show API keys in full instead of masked
    #[arg(long)]
    pub show_key: bool,
}

/// Arguments naming an existing login
#[derive(clap::Args, Debug)]
pub struct NameArgs {
    /// Login name
    pub name: String,
}

#[derive(Serialize)]
struct LoginInfo {
    name: String,
    url: String,
    api_key: String,
    history_id: String,
    active: bool,
}

#[derive(Serialize)]
struct LoginListOutput {
    active_login: Option<String>,
    logins: Vec<LoginInfo>,
}

/// Execute a login subcommand
pub async fn execute(cmd: LoginCommands, ctx: &Context) -> ExitCode {
    let result = match cmd {
        LoginCommands::Add(args) => execute_add(args, ctx).await,
        LoginCommands::View(args) => execute_view(args, ctx),
        LoginCommands::Switch(args) => execute_switch(args, ctx),
        LoginCommands::Delete(args) => execute_delete(args, ctx),
    };
    ctx.finish(result)
}

async fn execute_add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    if config.has_login(&args.name) {
        return Err(Error::LoginExists(format!(
            "{}. Please choose another, or first delete the existing login using `gxwf login delete`.",
            args.name
        )));
    }

    let mut login = Login::new(&args.url, &args.api_key, "");
    let client = GalaxyClient::open(&login).await?;
    let history = create_managed_history(&client).await?;
    tracing::info!(login = %args.name, history = %history.id, "created gxwf history");

    login.history_id = history.id;
    config.add_login(&args.name, login)?;
    ctx.save_config(&config)?;

    ctx.formatter()
        .success(&format!("New login {} created.", args.name));
    Ok(())
}

fn execute_view(args: ViewArgs, ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let formatter = ctx.formatter();

    let shown_key = |login: &Login| {
        if args.show_key {
            login.api_key.clone()
        } else {
            mask_api_key(&login.api_key)
        }
    };

    if formatter.is_json() {
        let output = LoginListOutput {
            active_login: config.active_login.clone(),
            logins: config
                .logins
                .iter()
                .map(|(name, login)| LoginInfo {
                    name: name.clone(),
                    url: login.url.clone(),
                    api_key: shown_key(login),
                    history_id: login.history_id.clone(),
                    active: config.active_login.as_deref() == Some(name.as_str()),
                })
                .collect(),
        };
        formatter.json(&output);
        return Ok(());
    }

    match &config.active_login {
        Some(name) => formatter.println(&format!(
            "You are currently using active login: {}",
            formatter.bold(name)
        )),
        None => formatter.println("No login is active. Add one with `gxwf login add`."),
    }

    let table = Table::new()
        .column("Login name", config.logins.keys().cloned())
        .column("URL", config.logins.values().map(|l| l.url.clone()))
        .column("API key", config.logins.values().map(shown_key))
        .column(
            "History ID",
            config.logins.values().map(|l| l.history_id.clone()),
        );
    formatter.table(&table);
    Ok(())
}

fn execute_switch(args: NameArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    match config.switch_login(&args.name)? {
        SwitchOutcome::AlreadyActive => {
            ctx.formatter()
                .println(&format!("Login with name {} is already activated.", args.name));
        }
        SwitchOutcome::Activated => {
            ctx.save_config(&config)?;
            ctx.formatter()
                .success(&format!("Login with name {} activated.", args.name));
        }
    }
    Ok(())
}

fn execute_delete(args: NameArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.load_config()?;
    config.delete_login(&args.name)?;
    ctx.save_config(&config)?;
    ctx.formatter()
        .success(&format!("Login {} deleted.", args.name));
    Ok(())
}
