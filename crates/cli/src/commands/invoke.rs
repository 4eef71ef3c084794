//! invoke command - Invoke a workflow
//!
//! Inputs are either collected interactively, one prompt per workflow input
//! step, or loaded from a file saved by an earlier `invoke --save`. Each
//! invocation runs in a new history.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use gxwf_core::alias::resolve;
use gxwf_core::invocation::{collect_inputs, submit};
use gxwf_core::{Error, GalaxyApi as _, InvocationRequest, Result, WorkflowDetails};

use super::{Context, Session};
use crate::exit_code::ExitCode;
use crate::output::{Spinner, Table, prompt};

/// History name used when none is given
const DEFAULT_HISTORY_NAME: &str = "gxwf_history";

/// Invoke a workflow
///
/// When prompted for an input, give a dataset ID or alias for dataset inputs
/// and a plain value for parameters.
#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Workflow ID or alias
    #[arg(required_unless_present = "from_file", conflicts_with = "from_file")]
    pub workflow: Option<String>,

    /// Run with inputs saved earlier with --save
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Name of the history the workflow runs in
    #[arg(long, default_value = DEFAULT_HISTORY_NAME)]
    pub history: String,

    /// Save the entered inputs to a YAML file
    #[arg(long, value_name = "FILE", conflicts_with = "from_file")]
    pub save: Option<PathBuf>,

    /// Only save the inputs, do not run the workflow
    #[arg(long, requires = "save")]
    pub no_run: bool,
}

#[derive(Debug, Serialize)]
struct InvokeOutput {
    workflow_id: String,
    invocation_id: String,
    history_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
}

/// Execute the invoke command
pub async fn execute(args: InvokeArgs, ctx: &Context) -> ExitCode {
    let result = invoke(args, ctx).await;
    ctx.finish(result)
}

async fn invoke(args: InvokeArgs, ctx: &Context) -> Result<()> {
    let request = match &args.from_file {
        Some(path) => {
            let request = InvocationRequest::load(path)?;
            let session = ctx.open_session().await?;
            Some((session, request))
        }
        None => {
            let token = args
                .workflow
                .as_deref()
                .ok_or_else(|| Error::General("a workflow ID or alias is required".into()))?;
            let session = ctx.open_session().await?;
            let request = build_request(&session, token, &args, ctx).await?;
            request.map(|request| (session, request))
        }
    };

    let Some((session, request)) = request else {
        return Ok(());
    };
    run(&session, &request, &args.history, ctx).await
}

/// Prompt for the workflow's inputs, returning `None` if it should not run
async fn build_request(
    session: &Session,
    token: &str,
    args: &InvokeArgs,
    ctx: &Context,
) -> Result<Option<InvocationRequest>> {
    let formatter = ctx.formatter();
    let workflow_id = resolve(token, &session.config.aliases);
    let workflow = session.client.show_workflow(workflow_id).await?;

    show_inputs(&workflow, ctx);

    let request = collect_inputs(
        &session.client,
        &workflow,
        &session.config.aliases,
        |index, input| {
            let question = format!("Input {index}: {} ", formatter.bold(input.display_label()));
            prompt::ask(&question).map_err(Error::from)
        },
    )
    .await?;

    if let Some(path) = &args.save {
        save_request(&request, path)?;
        formatter.success(&format!("Inputs saved to {}.", path.display()));

        if args.no_run || !prompt::confirm("Continue to run workflow?")? {
            return Ok(None);
        }
    }

    Ok(Some(request))
}

fn show_inputs(workflow: &WorkflowDetails, ctx: &Context) {
    let formatter = ctx.formatter();
    if formatter.is_json() {
        return;
    }
    formatter.println(&format!(
        "{} {}",
        formatter.bold("Workflow selected:"),
        workflow.name
    ));

    let inputs = workflow.ordered_inputs();
    let table = Table::new()
        .column("Number", inputs.iter().map(|(index, _)| index.to_string()))
        .column(
            "Name",
            inputs.iter().map(|(_, input)| input.display_label().to_string()),
        );
    formatter.table(&table);
    formatter.println(&formatter.bold(
        "Enter inputs (dataset ID or alias, or a value for parameters):",
    ));
}

fn save_request(request: &InvocationRequest, path: &Path) -> Result<()> {
    request.save(path).map_err(|e| match e {
        Error::Io(io) => Error::General(format!("Cannot write {}: {io}", path.display())),
        other => other,
    })
}

async fn run(
    session: &Session,
    request: &InvocationRequest,
    history_name: &str,
    ctx: &Context,
) -> Result<()> {
    let formatter = ctx.formatter();
    let spinner = Spinner::start(formatter.config(), "Invoking workflow...");
    let submission = submit(&session.client, request, history_name).await?;
    spinner.finish_and_clear();

    if formatter.is_json() {
        formatter.json(&InvokeOutput {
            workflow_id: request.workflow_id.clone(),
            invocation_id: submission.invocation.id,
            history_id: submission.history_id,
            state: submission.invocation.state,
        });
    } else {
        formatter.success(&format!(
            "Workflow invoked in history {history_name} ({}). Invocation ID: {}",
            submission.history_id, submission.invocation.id
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> std::result::Result<InvokeArgs, clap::Error> {
        let cli = Cli::try_parse_from(args)?;
        match cli.command {
            Commands::Invoke(args) => Ok(args),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_interactive_defaults() {
        let args = parse(&["gxwf", "invoke", "redfox"]).unwrap();
        assert_eq!(args.workflow.as_deref(), Some("redfox"));
        assert_eq!(args.history, "gxwf_history");
        assert!(args.save.is_none());
        assert!(!args.no_run);
    }

    #[test]
    fn test_parse_save_without_running() {
        let args = parse(&[
            "gxwf", "invoke", "wf123", "--save", "inputs.yml", "--no-run",
        ])
        .unwrap();
        assert_eq!(args.save, Some(PathBuf::from("inputs.yml")));
        assert!(args.no_run);
    }

    #[test]
    fn test_parse_from_file() {
        let args = parse(&[
            "gxwf",
            "invoke",
            "--from-file",
            "inputs.yml",
            "--history",
            "run 2",
        ])
        .unwrap();
        assert_eq!(args.workflow, None);
        assert_eq!(args.from_file, Some(PathBuf::from("inputs.yml")));
        assert_eq!(args.history, "run 2");
    }

    #[test]
    fn test_parse_rejects_bad_combinations() {
        // Needs a workflow or a file
        assert!(parse(&["gxwf", "invoke"]).is_err());
        // Not both
        assert!(parse(&["gxwf", "invoke", "wf123", "--from-file", "inputs.yml"]).is_err());
        // --no-run only makes sense with --save
        assert!(parse(&["gxwf", "invoke", "wf123", "--no-run"]).is_err());
    }
}
