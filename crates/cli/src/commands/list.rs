//! list command - List workflows
//!
//! Shows the user's own workflows, or published ones with `--public`, with
//! the alias of each workflow if it has one.

use clap::Args;
use serde::Serialize;

use gxwf_core::alias::invert;
use gxwf_core::{GalaxyApi as _, Result, WorkflowSummary};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::Table;

/// List workflows
#[derive(Args, Debug)]
pub struct ListArgs {
    /// List published workflows instead of your own
    #[arg(long)]
    pub public: bool,

    /// Only show workflows whose name or owner contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
struct WorkflowRow {
    name: String,
    id: String,
    alias: Option<String>,
    steps: u64,
    owner: String,
}

/// Execute the list command
pub async fn execute(args: ListArgs, ctx: &Context) -> ExitCode {
    let result = list_workflows(args, ctx).await;
    ctx.finish(result)
}

async fn list_workflows(args: ListArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session().await?;
    let workflows = session.client.list_workflows(args.public).await?;
    let workflows = filter_workflows(workflows, args.search.as_deref());

    let by_id = invert(&session.config.aliases);
    let rows: Vec<WorkflowRow> = workflows
        .into_iter()
        .map(|wf| WorkflowRow {
            alias: by_id.get(&wf.id).cloned(),
            name: wf.name,
            id: wf.id,
            steps: wf.number_of_steps,
            owner: wf.owner,
        })
        .collect();

    let formatter = ctx.formatter();
    if formatter.is_json() {
        formatter.json(&rows);
        return Ok(());
    }

    let table = Table::new()
        .column("Workflow name", rows.iter().map(|r| r.name.clone()))
        .column("ID", rows.iter().map(|r| r.id.clone()))
        .column(
            "Alias",
            rows.iter().map(|r| r.alias.clone().unwrap_or_default()),
        )
        .column("Steps", rows.iter().map(|r| r.steps.to_string()))
        .column("Owner", rows.iter().map(|r| r.owner.clone()));
    formatter.table(&table);
    Ok(())
}

fn filter_workflows(workflows: Vec<WorkflowSummary>, search: Option<&str>) -> Vec<WorkflowSummary> {
    match search {
        Some(text) => workflows.into_iter().filter(|wf| wf.matches(text)).collect(),
        None => workflows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    fn workflow(name: &str, owner: &str) -> WorkflowSummary {
        WorkflowSummary {
            id: format!("{name}-id"),
            name: name.to_string(),
            owner: owner.to_string(),
            number_of_steps: 4,
            published: true,
        }
    }

    #[test]
    fn test_filter_workflows() {
        let workflows = vec![
            workflow("RNA-seq", "alice"),
            workflow("ChIP-seq", "bob"),
            workflow("Assembly", "rna-lab"),
        ];

        let names: Vec<String> = filter_workflows(workflows.clone(), Some("RNA"))
            .into_iter()
            .map(|wf| wf.name)
            .collect();
        assert_eq!(names, vec!["RNA-seq"]);

        let names: Vec<String> = filter_workflows(workflows.clone(), Some("rna"))
            .into_iter()
            .map(|wf| wf.name)
            .collect();
        assert_eq!(names, vec!["Assembly"]);

        assert_eq!(filter_workflows(workflows, None).len(), 3);
    }

    #[test]
    fn test_parse_list_args() {
        let cli = Cli::try_parse_from(["gxwf", "list", "--public", "--search", "RNA"]).unwrap();
        match cli.command {
            Commands::List(args) => {
                assert!(args.public);
                assert_eq!(args.search.as_deref(), Some("RNA"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_short_search() {
        let cli = Cli::try_parse_from(["gxwf", "list", "-s", "RNA"]).unwrap();
        match cli.command {
            Commands::List(args) => {
                assert!(!args.public);
                assert_eq!(args.search.as_deref(), Some("RNA"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
