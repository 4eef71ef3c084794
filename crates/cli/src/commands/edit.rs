//! edit command - Print the workflow editor URL
//!
//! Works offline: only the active login's URL and the alias map are used.

use clap::Args;
use serde::Serialize;

use gxwf_core::Result;
use gxwf_core::alias::resolve;
use gxwf_galaxy::workflow_editor_url;

use super::Context;
use crate::exit_code::ExitCode;

/// Print the editor URL of a workflow
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Workflow ID or alias
    pub workflow: String,
}

#[derive(Debug, Serialize)]
struct EditOutput {
    workflow_id: String,
    url: String,
}

/// Execute the edit command
pub fn execute(args: EditArgs, ctx: &Context) -> ExitCode {
    let result = edit(args, ctx);
    ctx.finish(result)
}

fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;
    let (_, login) = config.active_login()?;
    let workflow_id = resolve(&args.workflow, &config.aliases);
    let url = workflow_editor_url(&login.url, workflow_id)?;

    let formatter = ctx.formatter();
    if formatter.is_json() {
        formatter.json(&EditOutput {
            workflow_id: workflow_id.to_string(),
            url,
        });
    } else {
        println!("{url}");
    }
    Ok(())
}
