//! report command - Fetch an invocation report
//!
//! Prints the markdown report Galaxy generates for one invocation of a
//! workflow, or writes it to a file.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use gxwf_core::alias::resolve;
use gxwf_core::{Error, GalaxyApi as _, Result};

use super::Context;
use crate::exit_code::ExitCode;

/// Fetch the report of a workflow invocation
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Workflow ID or alias
    pub workflow: String,

    /// Which invocation to report on, counting from 0
    #[arg(long, short = 'n', default_value_t = 0)]
    pub number: usize,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    invocation_id: String,
    markdown: String,
}

/// Execute the report command
pub async fn execute(args: ReportArgs, ctx: &Context) -> ExitCode {
    let result = report(args, ctx).await;
    ctx.finish(result)
}

async fn report(args: ReportArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session().await?;
    let workflow_id = resolve(&args.workflow, &session.config.aliases);

    let invocations = session.client.workflow_invocations(workflow_id).await?;
    let count = invocations.len();
    let invocation = invocations.into_iter().nth(args.number).ok_or_else(|| {
        Error::NotFound(format!(
            "workflow {workflow_id} has {count} invocation(s); there is no invocation {}",
            args.number
        ))
    })?;

    let markdown = session.client.invocation_report(&invocation.id).await?;
    let formatter = ctx.formatter();

    match &args.output {
        Some(path) => {
            std::fs::write(path, &markdown)?;
            formatter.success(&format!("Report written to {}.", path.display()));
        }
        None if formatter.is_json() => formatter.json(&ReportOutput {
            invocation_id: invocation.id,
            markdown,
        }),
        None => println!("{markdown}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_report() {
        let cli = Cli::try_parse_from(["gxwf", "report", "redfox", "-n", "2", "-o", "out.md"])
            .unwrap();
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.workflow, "redfox");
                assert_eq!(args.number, 2);
                assert_eq!(args.output, Some(PathBuf::from("out.md")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_report_defaults() {
        let cli = Cli::try_parse_from(["gxwf", "report", "wf123"]).unwrap();
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.number, 0);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
