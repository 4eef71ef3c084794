//! Alias management commands
//!
//! Aliases are short local names for workflow and dataset IDs. Every command
//! that takes a workflow or dataset accepts an alias in place of the ID.

use std::collections::BTreeMap;

use clap::{CommandFactory, Subcommand};
use serde::Serialize;

use gxwf_core::history::aliasable_ids;
use gxwf_core::{AliasManager, Error, Result};

use super::{Cli, Context};
use crate::exit_code::ExitCode;
use crate::output::Table;

/// Alias subcommands
#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// Add an alias to a single ID
    Add(AddArgs),

    /// Add random aliases to all your workflows and gxwf datasets that have none
    AddAll,

    /// List all aliases
    List,

    /// Delete one alias with --alias, or all of them with --all
    Delete(DeleteArgs),
}

/// Arguments for `alias add`
#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Workflow or dataset ID to alias
    #[arg(long)]
    pub id: String,

    /// Alias to assign; a random one is generated if omitted
    #[arg(long)]
    pub alias: Option<String>,
}

/// Arguments for `alias delete`
#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Alias to delete
    #[arg(long)]
    pub alias: Option<String>,

    /// Delete all aliases
    #[arg(long)]
    pub all: bool,
}

/// What `alias delete` should remove
#[derive(Debug, PartialEq, Eq)]
enum DeleteTarget<'a> {
    One(&'a str),
    All,
}

impl DeleteArgs {
    fn target(&self) -> Result<DeleteTarget<'_>> {
        match (self.alias.as_deref(), self.all) {
            (Some(name), false) => Ok(DeleteTarget::One(name)),
            (None, true) => Ok(DeleteTarget::All),
            _ => Err(Error::AmbiguousDelete(delete_usage())),
        }
    }
}

fn delete_usage() -> String {
    let mut cmd = Cli::command();
    let help = cmd
        .find_subcommand_mut("alias")
        .and_then(|alias| alias.find_subcommand_mut("delete"))
        .map(|delete| delete.render_help().to_string())
        .unwrap_or_default();
    format!("give exactly one of --alias or --all\n\n{help}")
}

#[derive(Serialize)]
struct AliasEntry {
    alias: String,
    id: String,
}

impl AliasEntry {
    fn list(pairs: impl IntoIterator<Item = (String, String)>) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(alias, id)| Self { alias, id })
            .collect()
    }
}

/// Execute an alias subcommand
pub async fn execute(cmd: AliasCommands, ctx: &Context) -> ExitCode {
    let manager = AliasManager::with_config_manager(ctx.config_manager().clone());

    let result = match cmd {
        AliasCommands::Add(args) => execute_add(args, &manager, ctx),
        AliasCommands::AddAll => execute_add_all(&manager, ctx).await,
        AliasCommands::List => execute_list(&manager, ctx),
        AliasCommands::Delete(args) => execute_delete(args, &manager, ctx),
    };
    ctx.finish(result)
}

fn execute_add(args: AddArgs, manager: &AliasManager, ctx: &Context) -> Result<()> {
    let formatter = ctx.formatter();
    let alias = match &args.alias {
        Some(name) => {
            if let Some(previous) = manager.set(name, &args.id)? {
                if previous != args.id {
                    formatter.warning(&format!(
                        "Alias {name} pointed to {previous}; it now points to {}.",
                        args.id
                    ));
                }
            }
            name.clone()
        }
        None => manager.set_random(&args.id)?,
    };

    if formatter.is_json() {
        formatter.json(&AliasEntry { alias, id: args.id });
    } else {
        formatter.println(&format!(
            "Alias assigned to ID {}: {}",
            args.id,
            formatter.bold(&alias)
        ));
    }
    Ok(())
}

async fn execute_add_all(manager: &AliasManager, ctx: &Context) -> Result<()> {
    let session = ctx.open_session().await?;
    let ids = aliasable_ids(&session.client, &session.login.history_id).await?;
    let assigned = manager.assign_all(&ids)?;
    print_assigned(&assigned, ctx);
    Ok(())
}

fn print_assigned(assigned: &BTreeMap<String, String>, ctx: &Context) {
    let formatter = ctx.formatter();
    if formatter.is_json() {
        let entries = AliasEntry::list(
            assigned
                .iter()
                .map(|(id, alias)| (alias.clone(), id.clone())),
        );
        formatter.json(&entries);
        return;
    }

    if assigned.is_empty() {
        formatter.println("Every workflow and dataset already has an alias.");
    }
    for (id, alias) in assigned {
        formatter.println(&format!(
            "Alias assigned to ID {id}: {}",
            formatter.bold(alias)
        ));
    }
}

fn execute_list(manager: &AliasManager, ctx: &Context) -> Result<()> {
    let aliases = manager.list()?;
    let formatter = ctx.formatter();

    if formatter.is_json() {
        formatter.json(&AliasEntry::list(aliases));
        return Ok(());
    }

    let table = Table::new()
        .column("Alias", aliases.keys().cloned())
        .column("ID", aliases.values().cloned());
    formatter.table(&table);
    Ok(())
}

fn execute_delete(args: DeleteArgs, manager: &AliasManager, ctx: &Context) -> Result<()> {
    match args.target()? {
        DeleteTarget::One(name) => {
            let id = manager.remove(name)?;
            ctx.formatter()
                .success(&format!("Alias {name} (ID {id}) deleted."));
        }
        DeleteTarget::All => {
            let count = manager.clear()?;
            ctx.formatter()
                .success(&format!("{count} alias(es) deleted."));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Commands;
    use clap::Parser;

    fn parse_delete(args: &[&str]) -> DeleteArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Alias(AliasCommands::Delete(args)) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_alias_add() {
        let cli = Cli::try_parse_from(["gxwf", "alias", "add", "--id", "wf123"]).unwrap();
        match cli.command {
            Commands::Alias(AliasCommands::Add(args)) => {
                assert_eq!(args.id, "wf123");
                assert_eq!(args.alias, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_alias_add_all_and_list() {
        let cli = Cli::try_parse_from(["gxwf", "alias", "add-all"]).unwrap();
        assert!(matches!(cli.command, Commands::Alias(AliasCommands::AddAll)));

        let cli = Cli::try_parse_from(["gxwf", "alias", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::Alias(AliasCommands::List)));
    }

    #[test]
    fn test_delete_target() {
        let args = parse_delete(&["gxwf", "alias", "delete", "--alias", "redfox"]);
        assert_eq!(args.target().unwrap(), DeleteTarget::One("redfox"));

        let args = parse_delete(&["gxwf", "alias", "delete", "--all"]);
        assert_eq!(args.target().unwrap(), DeleteTarget::All);
    }

    #[test]
    fn test_delete_target_ambiguous() {
        let neither = parse_delete(&["gxwf", "alias", "delete"]);
        let both = parse_delete(&["gxwf", "alias", "delete", "--alias", "redfox", "--all"]);

        for args in [neither, both] {
            match args.target() {
                Err(Error::AmbiguousDelete(message)) => {
                    assert!(message.contains("--alias"));
                    assert!(message.contains("Usage"));
                }
                other => panic!("expected AmbiguousDelete, got {other:?}"),
            }
        }
    }
}
