//! Workflow invocation requests
//!
//! An [`InvocationRequest`] names a workflow and maps each of its input steps
//! to a dataset reference or a literal value. It is built interactively or
//! loaded from a saved YAML file, then submitted once into a freshly created
//! history.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alias::{AliasMap, resolve};
use crate::error::{Error, Result};
use crate::traits::{GalaxyApi, Invocation, WorkflowDetails, WorkflowInput};
use crate::GXWF_TAG;

/// Job states in display order
pub const JOB_STATES: &[&str] = &[
    "ok",
    "running",
    "error",
    "paused",
    "deleted",
    "deleted_new",
    "new",
    "queued",
];

/// Value supplied for one workflow input step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Reference to an existing dataset
    Dataset { src: String, id: String },
    /// Anything that is not a dataset, passed through as typed
    Literal(serde_json::Value),
}

/// Everything needed to invoke a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(alias = "wf_id")]
    pub workflow_id: String,

    /// Input step index to value
    #[serde(default)]
    pub inputs: BTreeMap<String, InputValue>,

    /// Step index to tool parameter overrides
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl InvocationRequest {
    /// Create an empty request for a workflow
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            inputs: BTreeMap::new(),
            params: BTreeMap::new(),
        }
    }

    /// Load a request saved with [`InvocationRequest::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let request = serde_yaml::from_str(&content)?;
        Ok(request)
    }

    /// Save the request as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Result of submitting an invocation
#[derive(Debug, Clone)]
pub struct Submission {
    /// History created to hold the invocation's outputs
    pub history_id: String,
    pub invocation: Invocation,
}

/// Turn one user answer into an input value
///
/// The answer is alias-resolved and looked up as a dataset. When the server
/// does not know it as a dataset it is kept as a literal parameter value.
pub async fn resolve_input<A>(api: &A, answer: &str, aliases: &AliasMap) -> Result<InputValue>
where
    A: GalaxyApi + ?Sized,
{
    let id = resolve(answer.trim(), aliases);
    match api.show_dataset(id).await {
        Ok(dataset) => Ok(InputValue::Dataset {
            src: dataset.hda_ldda,
            id: id.to_string(),
        }),
        Err(e) if e.is_not_found() => {
            tracing::debug!(value = id, "not a dataset, using as literal");
            Ok(InputValue::Literal(serde_json::Value::String(id.to_string())))
        }
        Err(e) => Err(e),
    }
}

/// Ask for a value for every input step of a workflow
///
/// `prompt` is called once per input step, in step order, with the step
/// index and its input description.
pub async fn collect_inputs<A, F>(
    api: &A,
    workflow: &WorkflowDetails,
    aliases: &AliasMap,
    mut prompt: F,
) -> Result<InvocationRequest>
where
    A: GalaxyApi + ?Sized,
    F: FnMut(&str, &WorkflowInput) -> Result<String>,
{
    let mut request = InvocationRequest::new(&workflow.id);
    for (index, input) in workflow.ordered_inputs() {
        let answer = prompt(index, input)?;
        let value = resolve_input(api, &answer, aliases).await?;
        request.inputs.insert(index.to_string(), value);
    }
    Ok(request)
}

/// Submit an invocation into a new history named `history_name`
///
/// The history is tagged for gxwf before invoking. If tagging or invoking
/// fails the history is purged again; a failure to clean up is only logged.
pub async fn submit<A>(api: &A, request: &InvocationRequest, history_name: &str) -> Result<Submission>
where
    A: GalaxyApi + ?Sized,
{
    let history = api.create_history(history_name).await?;
    tracing::info!(history = %history.id, workflow = %request.workflow_id, "invoking workflow");

    let outcome = match api.tag_history(&history.id, GXWF_TAG).await {
        Ok(()) => api.invoke_workflow(request, &history.id).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(invocation) => Ok(Submission {
            history_id: history.id,
            invocation,
        }),
        Err(e) => {
            if let Err(cleanup) = api.delete_history(&history.id, true).await {
                tracing::warn!(history = %history.id, error = %cleanup, "failed to delete history after failed invocation");
            }
            Err(Error::RemoteOperationFailed(format!(
                "Invocation failed: {e}. Check dataset IDs were specified correctly."
            )))
        }
    }
}

/// Number the jobs of an invocation by state
///
/// Returns `(job number, state)` pairs, states in [`JOB_STATES`] order and
/// jobs numbered consecutively from 1. States not in [`JOB_STATES`] are
/// not listed.
pub fn job_lines(states: &BTreeMap<String, u64>) -> Vec<(u64, &'static str)> {
    let mut lines = Vec::new();
    let mut number = 1;
    for state in JOB_STATES {
        for _ in 0..states.get(*state).copied().unwrap_or(0) {
            lines.push((number, *state));
            number += 1;
        }
    }
    lines
}
