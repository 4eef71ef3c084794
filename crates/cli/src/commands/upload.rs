//! upload command - Upload a dataset or import a workflow
//!
//! Files ending in `.ga` are imported as workflows; anything else is
//! uploaded as a dataset into the login's gxwf history.

use std::path::PathBuf;

use clap::Args;
use humansize::{DECIMAL, format_size};
use serde::Serialize;

use gxwf_core::history::{is_workflow_file, read_workflow_file};
use gxwf_core::{Error, GXWF_TAG, GalaxyApi as _, Result};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::Spinner;

/// Upload a dataset, or import a workflow from a .ga file
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    pub path: PathBuf,

    /// Publish an imported workflow
    #[arg(long)]
    pub public: bool,

    /// Galaxy datatype of an uploaded dataset
    #[arg(long, default_value = "auto")]
    pub file_type: String,
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    kind: &'static str,
    id: String,
    name: String,
}

/// Execute the upload command
pub async fn execute(args: UploadArgs, ctx: &Context) -> ExitCode {
    let result = upload(args, ctx).await;
    ctx.finish(result)
}

async fn upload(args: UploadArgs, ctx: &Context) -> Result<()> {
    let metadata = std::fs::metadata(&args.path)
        .map_err(|e| Error::General(format!("Cannot read {}: {e}", args.path.display())))?;
    if !metadata.is_file() {
        return Err(Error::General(format!(
            "{} is not a file",
            args.path.display()
        )));
    }

    let session = ctx.open_session().await?;
    let formatter = ctx.formatter();

    let output = if is_workflow_file(&args.path) {
        let workflow = read_workflow_file(&args.path)?;
        let spinner = Spinner::start(formatter.config(), "Importing workflow...");
        let imported = session
            .client
            .import_workflow(workflow, args.public)
            .await?;
        spinner.finish_and_clear();

        formatter.success(&format!(
            "Workflow {} imported with ID {}.",
            imported.name, imported.id
        ));
        UploadOutput {
            kind: "workflow",
            id: imported.id,
            name: imported.name,
        }
    } else {
        let name = args
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let history_id = &session.login.history_id;

        let spinner = Spinner::start(
            formatter.config(),
            &format!(
                "Uploading {name} ({})...",
                format_size(metadata.len(), DECIMAL)
            ),
        );
        let dataset_id = session
            .client
            .upload_file(&args.path, history_id, &args.file_type)
            .await?;
        spinner.set_message("Tagging dataset...");
        session
            .client
            .tag_dataset(history_id, &dataset_id, &[GXWF_TAG.to_string()])
            .await?;
        spinner.finish_and_clear();

        formatter.success(&format!("Dataset {name} uploaded with ID {dataset_id}."));
        UploadOutput {
            kind: "dataset",
            id: dataset_id,
            name,
        }
    };

    if formatter.is_json() {
        formatter.json(&output);
    }
    Ok(())
}
