//! invocations command - Show job states of invocations
//!
//! For each invocation of a workflow (or of every workflow), lists one line
//! per job, grouped and coloured by job state.

use clap::Args;
use serde::Serialize;

use gxwf_core::alias::resolve;
use gxwf_core::invocation::job_lines;
use gxwf_core::{GalaxyApi as _, Invocation, InvocationSummary, Result};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Color, Formatter};

/// Show job states of workflow invocations
#[derive(Args, Debug)]
pub struct InvocationsArgs {
    /// Workflow ID or alias; all invocations are shown if omitted
    pub workflow: Option<String>,
}

#[derive(Debug, Serialize)]
struct InvocationOutput {
    id: String,
    workflow_id: Option<String>,
    history_id: Option<String>,
    state: Option<String>,
    jobs: InvocationSummary,
}

/// Execute the invocations command
pub async fn execute(args: InvocationsArgs, ctx: &Context) -> ExitCode {
    let result = show_invocations(args, ctx).await;
    ctx.finish(result)
}

async fn show_invocations(args: InvocationsArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session().await?;
    let invocations = match args.workflow.as_deref() {
        Some(token) => {
            let workflow_id = resolve(token, &session.config.aliases);
            session.client.workflow_invocations(workflow_id).await?
        }
        None => session.client.list_invocations().await?,
    };

    let formatter = ctx.formatter();
    if invocations.is_empty() && !formatter.is_json() {
        formatter.println("No invocations found.");
        return Ok(());
    }

    let mut outputs = Vec::new();
    for (number, invocation) in invocations.into_iter().enumerate() {
        let summary = session.client.invocation_summary(&invocation.id).await?;
        if formatter.is_json() {
            outputs.push(invocation_output(invocation, summary));
        } else {
            print_invocation(number + 1, &summary, formatter);
        }
    }

    if formatter.is_json() {
        formatter.json(&outputs);
    }
    Ok(())
}

fn invocation_output(invocation: Invocation, summary: InvocationSummary) -> InvocationOutput {
    InvocationOutput {
        id: invocation.id,
        workflow_id: invocation.workflow_id,
        history_id: invocation.history_id,
        state: invocation.state,
        jobs: summary,
    }
}

fn print_invocation(number: usize, summary: &InvocationSummary, formatter: &Formatter) {
    formatter.println("");
    formatter.println(&formatter.bold(&format!("Invocation {number}")));
    for (job, state) in job_lines(&summary.states) {
        formatter.println(&formatter.colored(
            &format!("\u{2B24} Job {job} ({state})"),
            state_color(state),
        ));
    }
}

/// Display colour of a job state
fn state_color(state: &str) -> Color {
    match state {
        "ok" => Color::Green,
        "running" | "queued" => Color::Yellow,
        "error" => Color::Red,
        "deleted" | "deleted_new" => Color::Magenta,
        _ => Color::Cyan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_colors() {
        assert_eq!(state_color("ok"), Color::Green);
        assert_eq!(state_color("running"), Color::Yellow);
        assert_eq!(state_color("queued"), Color::Yellow);
        assert_eq!(state_color("error"), Color::Red);
        assert_eq!(state_color("paused"), Color::Cyan);
        assert_eq!(state_color("new"), Color::Cyan);
        assert_eq!(state_color("deleted"), Color::Magenta);
        assert_eq!(state_color("deleted_new"), Color::Magenta);
    }

    #[test]
    fn test_invocation_output_json() {
        let invocation = Invocation {
            id: "inv1".to_string(),
            workflow_id: Some("wf123".to_string()),
            history_id: Some("h1".to_string()),
            state: Some("scheduled".to_string()),
            update_time: None,
        };
        let summary: InvocationSummary =
            serde_json::from_str(r#"{"states": {"ok": 2, "running": 1}}"#).unwrap();

        let json = serde_json::to_value(invocation_output(invocation, summary)).unwrap();
        assert_eq!(json["id"], "inv1");
        assert_eq!(json["jobs"]["states"]["ok"], 2);
    }
}
