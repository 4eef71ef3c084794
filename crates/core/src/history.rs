//! History and dataset operations
//!
//! Every login owns one history, created when the login is added, that holds
//! the datasets gxwf uploads. Datasets and histories gxwf manages carry the
//! `gxwf` tag.

use std::path::Path;

use crate::error::{Error, Result};
use crate::traits::{DatasetSummary, GalaxyApi, History};
use crate::GXWF_TAG;

/// Name of the history created for each new login
pub const MANAGED_HISTORY_NAME: &str = "GXWF datasets";

/// File extension of Galaxy workflow files
pub const WORKFLOW_EXTENSION: &str = "ga";

/// Datasets of one history
#[derive(Debug, Clone)]
pub struct HistoryDatasets {
    pub history: History,
    pub datasets: Vec<DatasetSummary>,
}

/// Create and tag the history that holds a new login's datasets
pub async fn create_managed_history<A>(api: &A) -> Result<History>
where
    A: GalaxyApi + ?Sized,
{
    let history = api.create_history(MANAGED_HISTORY_NAME).await?;
    api.tag_history(&history.id, GXWF_TAG).await?;
    Ok(history)
}

/// List the datasets of the managed history, tagging any that lack the gxwf tag
pub async fn managed_datasets<A>(api: &A, history_id: &str) -> Result<Vec<DatasetSummary>>
where
    A: GalaxyApi + ?Sized,
{
    let mut datasets = api.history_contents(history_id).await?;
    for dataset in &mut datasets {
        if !dataset.tags.iter().any(|t| t == GXWF_TAG) {
            tracing::debug!(dataset = %dataset.id, "tagging dataset");
            let tags = vec![GXWF_TAG.to_string()];
            api.tag_dataset(history_id, &dataset.id, &tags).await?;
            dataset.tags = tags;
        }
    }
    Ok(datasets)
}

/// List the datasets of every history, one request per history
pub async fn all_datasets<A>(api: &A) -> Result<Vec<HistoryDatasets>>
where
    A: GalaxyApi + ?Sized,
{
    let mut all = Vec::new();
    for history in api.list_histories().await? {
        let datasets = api.history_contents(&history.id).await?;
        all.push(HistoryDatasets { history, datasets });
    }
    Ok(all)
}

/// IDs that `alias add-all` should cover: the user's workflows and the
/// datasets of the managed history
pub async fn aliasable_ids<A>(api: &A, history_id: &str) -> Result<Vec<String>>
where
    A: GalaxyApi + ?Sized,
{
    let mut ids: Vec<String> = api
        .list_workflows(false)
        .await?
        .into_iter()
        .map(|wf| wf.id)
        .collect();
    ids.extend(
        api.history_contents(history_id)
            .await?
            .into_iter()
            .map(|ds| ds.id),
    );
    Ok(ids)
}

/// Whether a file should be imported as a workflow rather than uploaded as a dataset
pub fn is_workflow_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == WORKFLOW_EXTENSION)
}

/// Parse a .ga workflow file and add the gxwf tag to it
pub fn read_workflow_file(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)?;
    let mut workflow: serde_json::Value = serde_json::from_str(&content)?;
    tag_workflow(&mut workflow)?;
    Ok(workflow)
}

fn tag_workflow(workflow: &mut serde_json::Value) -> Result<()> {
    let object = workflow
        .as_object_mut()
        .ok_or_else(|| Error::General("workflow file must contain a JSON object".into()))?;
    let tags = object
        .entry("tags")
        .or_insert_with(|| serde_json::Value::Array(Vec::new()));
    match tags {
        serde_json::Value::Array(tags) => {
            if !tags.iter().any(|t| t == GXWF_TAG) {
                tags.push(GXWF_TAG.into());
            }
            Ok(())
        }
        _ => Err(Error::General("workflow 'tags' must be a list".into())),
    }
}
