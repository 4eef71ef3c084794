//! datasets command - List datasets
//!
//! Lists the datasets of the login's `GXWF datasets` history, or of every
//! history with `--all`. Only datasets that are ready to use are shown.

use std::collections::BTreeMap;

use clap::Args;
use serde::Serialize;

use gxwf_core::alias::invert;
use gxwf_core::history::{all_datasets, managed_datasets};
use gxwf_core::{DatasetSummary, Result};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::Table;

/// List datasets
#[derive(Args, Debug)]
pub struct DatasetsArgs {
    /// Only show datasets whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// List datasets from all histories, not only the gxwf history
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Debug, Serialize)]
struct DatasetRow {
    name: String,
    extension: String,
    id: String,
    alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<String>,
}

/// Execute the datasets command
pub async fn execute(args: DatasetsArgs, ctx: &Context) -> ExitCode {
    let result = list_datasets(args, ctx).await;
    ctx.finish(result)
}

async fn list_datasets(args: DatasetsArgs, ctx: &Context) -> Result<()> {
    let session = ctx.open_session().await?;
    let by_id = invert(&session.config.aliases);
    let search = args.search.as_deref();

    let rows = if args.all {
        let mut rows = Vec::new();
        for entry in all_datasets(&session.client).await? {
            rows.extend(dataset_rows(
                entry.datasets,
                search,
                &by_id,
                Some(&entry.history.name),
            ));
        }
        rows
    } else {
        let datasets = managed_datasets(&session.client, &session.login.history_id).await?;
        dataset_rows(datasets, search, &by_id, None)
    };

    let formatter = ctx.formatter();
    if formatter.is_json() {
        formatter.json(&rows);
        return Ok(());
    }

    let mut table = Table::new()
        .column("Dataset name", rows.iter().map(|r| r.name.clone()))
        .column("Extension", rows.iter().map(|r| r.extension.clone()))
        .column("ID", rows.iter().map(|r| r.id.clone()))
        .column(
            "Alias",
            rows.iter().map(|r| r.alias.clone().unwrap_or_default()),
        );
    if args.all {
        table = table.column(
            "History",
            rows.iter().map(|r| r.history.clone().unwrap_or_default()),
        );
    }
    formatter.table(&table);
    Ok(())
}

/// Ready datasets matching `search`, as table rows
fn dataset_rows(
    datasets: Vec<DatasetSummary>,
    search: Option<&str>,
    by_id: &BTreeMap<String, String>,
    history: Option<&str>,
) -> Vec<DatasetRow> {
    datasets
        .into_iter()
        .filter(|ds| ds.is_ready())
        .filter(|ds| search.is_none_or(|text| ds.matches(text)))
        .map(|ds| DatasetRow {
            alias: by_id.get(&ds.id).cloned(),
            name: ds.name.unwrap_or_default(),
            extension: ds.extension.unwrap_or_default(),
            id: ds.id,
            history: history.map(str::to_string),
        })
        .collect()
}
