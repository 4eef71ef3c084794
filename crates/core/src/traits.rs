//! GalaxyApi trait definition
//!
//! This trait defines the subset of the Galaxy REST API that gxwf uses.
//! It allows the command logic to be decoupled from the HTTP client and
//! tested against a mock.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::invocation::InvocationRequest;

/// A Galaxy history (the container datasets live in)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry of a history's contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// File extension / datatype, e.g. "fastqsanger"
    #[serde(default)]
    pub extension: Option<String>,

    /// Dataset state, e.g. "ok", "queued", "error"
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl DatasetSummary {
    /// Whether the dataset is usable: not deleted and in the `ok` state
    pub fn is_ready(&self) -> bool {
        !self.deleted && self.state.as_deref() == Some("ok")
    }

    /// Whether the dataset name contains `search`
    pub fn matches(&self, search: &str) -> bool {
        self.name.as_deref().unwrap_or_default().contains(search)
    }
}

/// Details needed to reference a dataset as a workflow input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDetails {
    pub id: String,

    /// "hda" for history datasets, "ldda" for library datasets
    #[serde(default = "default_hda_ldda")]
    pub hda_ldda: String,
}

fn default_hda_ldda() -> String {
    "hda".to_string()
}

/// Workflow as returned by the workflow listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub number_of_steps: u64,

    #[serde(default)]
    pub published: bool,
}

impl WorkflowSummary {
    /// Whether the workflow name or owner contains `search`
    pub fn matches(&self, search: &str) -> bool {
        self.name.contains(search) || self.owner.contains(search)
    }
}

/// An input step of a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInput {
    #[serde(default)]
    pub label: Option<String>,
}

impl WorkflowInput {
    /// Label to show the user, empty when the step is unlabelled
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }
}

/// A single workflow with its input steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDetails {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Input steps keyed by step index
    #[serde(default)]
    pub inputs: BTreeMap<String, WorkflowInput>,
}

impl WorkflowDetails {
    /// Input steps ordered by numeric step index
    pub fn ordered_inputs(&self) -> Vec<(&str, &WorkflowInput)> {
        let mut inputs: Vec<(&str, &WorkflowInput)> = self
            .inputs
            .iter()
            .map(|(index, input)| (index.as_str(), input))
            .collect();
        inputs.sort_by_key(|(index, _)| (index.parse::<u64>().unwrap_or(u64::MAX), *index));
        inputs
    }
}

/// One execution instance of a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    pub id: String,

    #[serde(default)]
    pub workflow_id: Option<String>,

    #[serde(default)]
    pub history_id: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub update_time: Option<String>,
}

/// Job counts per state for an invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationSummary {
    #[serde(default)]
    pub states: BTreeMap<String, u64>,

    #[serde(default)]
    pub populated_state: Option<String>,
}

/// Operations gxwf performs against a Galaxy server
///
/// Every method maps to exactly one API request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalaxyApi: Send + Sync {
    /// List the user's histories
    async fn list_histories(&self) -> Result<Vec<History>>;

    /// Create a history
    async fn create_history(&self, name: &str) -> Result<History>;

    /// Add a tag to a history
    async fn tag_history(&self, history_id: &str, tag: &str) -> Result<()>;

    /// Delete a history, optionally purging it
    async fn delete_history(&self, history_id: &str, purge: bool) -> Result<()>;

    /// List the datasets of a history
    async fn history_contents(&self, history_id: &str) -> Result<Vec<DatasetSummary>>;

    /// Replace the tags of a dataset in a history
    async fn tag_dataset(&self, history_id: &str, dataset_id: &str, tags: &[String])
    -> Result<()>;

    /// Show a single dataset
    async fn show_dataset(&self, dataset_id: &str) -> Result<DatasetDetails>;

    /// Upload a local file into a history, returning the new dataset's ID
    async fn upload_file(&self, path: &Path, history_id: &str, file_type: &str) -> Result<String>;

    /// List workflows (published ones when `published` is set)
    async fn list_workflows(&self, published: bool) -> Result<Vec<WorkflowSummary>>;

    /// Show a single workflow with its inputs
    async fn show_workflow(&self, workflow_id: &str) -> Result<WorkflowDetails>;

    /// Import a workflow from its JSON (.ga) representation
    async fn import_workflow(
        &self,
        workflow: serde_json::Value,
        publish: bool,
    ) -> Result<WorkflowSummary>;

    /// Invoke a workflow, writing its outputs into `history_id`
    async fn invoke_workflow(
        &self,
        request: &InvocationRequest,
        history_id: &str,
    ) -> Result<Invocation>;

    /// List every invocation visible to the user
    async fn list_invocations(&self) -> Result<Vec<Invocation>>;

    /// List the invocations of one workflow
    async fn workflow_invocations(&self, workflow_id: &str) -> Result<Vec<Invocation>>;

    /// Job state counts of an invocation
    async fn invocation_summary(&self, invocation_id: &str) -> Result<InvocationSummary>;

    /// Markdown report of an invocation
    async fn invocation_report(&self, invocation_id: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_is_ready() {
        let mut ds: DatasetSummary =
            serde_json::from_str(r#"{"id": "d1", "name": "reads.fq", "state": "ok"}"#).unwrap();
        assert!(ds.is_ready());
        assert!(ds.matches("reads"));
        assert!(!ds.matches("genome"));

        ds.deleted = true;
        assert!(!ds.is_ready());

        ds.deleted = false;
        ds.state = Some("queued".to_string());
        assert!(!ds.is_ready());
    }

    #[test]
    fn test_workflow_matches_name_or_owner() {
        let wf: WorkflowSummary = serde_json::from_str(
            r#"{"id": "w1", "name": "RNA-seq", "owner": "bgruening", "number_of_steps": 5}"#,
        )
        .unwrap();
        assert!(wf.matches("RNA"));
        assert!(wf.matches("gruen"));
        assert!(!wf.matches("ChIP"));
    }

    #[test]
    fn test_workflow_inputs_ordered_numerically() {
        let wf: WorkflowDetails = serde_json::from_str(
            r#"{
                "id": "w1",
                "name": "wf",
                "inputs": {
                    "10": {"label": "ten"},
                    "2": {"label": "two"},
                    "0": {"label": null}
                }
            }"#,
        )
        .unwrap();

        let order: Vec<&str> = wf.ordered_inputs().iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec!["0", "2", "10"]);
        assert_eq!(wf.inputs["0"].display_label(), "");
    }

    #[test]
    fn test_dataset_details_default_src() {
        let details: DatasetDetails = serde_json::from_str(r#"{"id": "d1"}"#).unwrap();
        assert_eq!(details.hda_ldda, "hda");
    }
}
