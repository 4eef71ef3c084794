//! Galaxy client implementation
//!
//! Wraps a `reqwest` client bound to one login and implements the GalaxyApi
//! trait from gxwf-core. Every trait method issues exactly one request.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use gxwf_core::{
    DatasetDetails, DatasetSummary, Error, GalaxyApi, History, Invocation, InvocationRequest,
    InvocationSummary, Login, Result, WorkflowDetails, WorkflowSummary,
};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Keys requested for each history content entry
const CONTENT_KEYS: &str = "id,name,extension,state,deleted,tags";

/// Galaxy tool used for plain file uploads
const UPLOAD_TOOL_ID: &str = "upload1";

/// Galaxy API client bound to a single login
pub struct GalaxyClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ToolOutputs {
    #[serde(default)]
    outputs: Vec<ToolOutput>,
}

#[derive(Debug, Deserialize)]
struct ToolOutput {
    id: String,
}

#[derive(Debug, Deserialize)]
struct InvocationReport {
    #[serde(default)]
    markdown: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    err_msg: String,
}

impl GalaxyClient {
    /// Create a client for a login without contacting the server
    pub fn new(login: &Login) -> Result<Self> {
        let url = Url::parse(&login.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::General(format!(
                "Galaxy URL must use http or https: {}",
                login.url
            )));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("gxwf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::General(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: login.url.trim_end_matches('/').to_string(),
            api_key: login.api_key.clone(),
        })
    }

    /// Create a client and check that the server accepts its credentials
    ///
    /// Performs one lightweight request (listing histories). Fails with
    /// [`Error::Unreachable`] when the server cannot be reached and
    /// [`Error::Unauthorized`] when the API key is rejected.
    pub async fn open(login: &Login) -> Result<Self> {
        let client = Self::new(login)?;
        tracing::debug!(url = %client.base_url, "checking connection");
        client.list_histories().await?;
        Ok(client)
    }

    /// Base URL of the Galaxy server, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL of an API endpoint
    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.api_url(path);
        tracing::debug!(%method, %url, "galaxy request");
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Send a request and return the body of a successful response
    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Unreachable(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_error(status, &error_body));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Unreachable(format!("Failed to read response: {e}")))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let text = self.send(request).await?;
        serde_json::from_str(&text).map_err(Error::Json)
    }
}

/// Map HTTP status codes to appropriate errors
fn map_error(status: StatusCode, body: &str) -> Error {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::BAD_REQUEST => Error::BadRequest(message),
        _ => Error::RemoteOperationFailed(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

/// Extract Galaxy's `err_msg` from an error body, falling back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.err_msg)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// URL of the workflow editor for a workflow on a Galaxy server
pub fn workflow_editor_url(server_url: &str, workflow_id: &str) -> Result<String> {
    let mut url = Url::parse(&format!(
        "{}/workflow/editor",
        server_url.trim_end_matches('/')
    ))?;
    url.query_pairs_mut().append_pair("id", workflow_id);
    Ok(url.to_string())
}

#[async_trait]
impl GalaxyApi for GalaxyClient {
    async fn list_histories(&self) -> Result<Vec<History>> {
        self.send_json(self.request(Method::GET, "/histories")).await
    }

    async fn create_history(&self, name: &str) -> Result<History> {
        let request = self
            .request(Method::POST, "/histories")
            .json(&json!({ "name": name }));
        self.send_json(request).await
    }

    async fn tag_history(&self, history_id: &str, tag: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &format!("/histories/{history_id}/tags/{tag}"))
            .json(&json!({ "value": tag }));
        self.send(request).await?;
        Ok(())
    }

    async fn delete_history(&self, history_id: &str, purge: bool) -> Result<()> {
        let request = self
            .request(Method::DELETE, &format!("/histories/{history_id}"))
            .json(&json!({ "purge": purge }));
        self.send(request).await?;
        Ok(())
    }

    async fn history_contents(&self, history_id: &str) -> Result<Vec<DatasetSummary>> {
        let request = self
            .request(Method::GET, &format!("/histories/{history_id}/contents"))
            .query(&[("v", "dev"), ("keys", CONTENT_KEYS)]);
        self.send_json(request).await
    }

    async fn tag_dataset(
        &self,
        history_id: &str,
        dataset_id: &str,
        tags: &[String],
    ) -> Result<()> {
        let request = self
            .request(
                Method::PUT,
                &format!("/histories/{history_id}/contents/{dataset_id}"),
            )
            .json(&json!({ "tags": tags }));
        self.send(request).await?;
        Ok(())
    }

    async fn show_dataset(&self, dataset_id: &str) -> Result<DatasetDetails> {
        self.send_json(self.request(Method::GET, &format!("/datasets/{dataset_id}")))
            .await
    }

    async fn upload_file(&self, path: &Path, history_id: &str, file_type: &str) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let inputs = json!({
            "files_0|NAME": file_name,
            "files_0|type": "upload_dataset",
            "file_type": file_type,
            "dbkey": "?",
        });

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(|e| Error::General(format!("Invalid content type: {e}")))?;
        let form = Form::new()
            .text("tool_id", UPLOAD_TOOL_ID)
            .text("history_id", history_id.to_string())
            .text("inputs", inputs.to_string())
            .part("files_0|file_data", part);

        let outputs: ToolOutputs = self
            .send_json(self.request(Method::POST, "/tools").multipart(form))
            .await?;

        outputs
            .outputs
            .into_iter()
            .next()
            .map(|output| output.id)
            .ok_or_else(|| Error::RemoteOperationFailed("upload produced no dataset".into()))
    }

    async fn list_workflows(&self, published: bool) -> Result<Vec<WorkflowSummary>> {
        let request = self
            .request(Method::GET, "/workflows")
            .query(&[("show_published", published)]);
        self.send_json(request).await
    }

    async fn show_workflow(&self, workflow_id: &str) -> Result<WorkflowDetails> {
        self.send_json(self.request(Method::GET, &format!("/workflows/{workflow_id}")))
            .await
    }

    async fn import_workflow(
        &self,
        workflow: serde_json::Value,
        publish: bool,
    ) -> Result<WorkflowSummary> {
        let request = self
            .request(Method::POST, "/workflows")
            .json(&json!({ "workflow": workflow, "publish": publish }));
        self.send_json(request).await
    }

    async fn invoke_workflow(
        &self,
        request: &InvocationRequest,
        history_id: &str,
    ) -> Result<Invocation> {
        let mut payload = json!({ "history": format!("hist_id={history_id}") });
        if !request.inputs.is_empty() {
            payload["inputs"] = serde_json::to_value(&request.inputs)?;
        }
        if !request.params.is_empty() {
            payload["parameters"] = serde_json::to_value(&request.params)?;
        }

        let http_request = self
            .request(
                Method::POST,
                &format!("/workflows/{}/invocations", request.workflow_id),
            )
            .json(&payload);
        self.send_json(http_request).await
    }

    async fn list_invocations(&self) -> Result<Vec<Invocation>> {
        self.send_json(self.request(Method::GET, "/invocations")).await
    }

    async fn workflow_invocations(&self, workflow_id: &str) -> Result<Vec<Invocation>> {
        self.send_json(self.request(
            Method::GET,
            &format!("/workflows/{workflow_id}/invocations"),
        ))
        .await
    }

    async fn invocation_summary(&self, invocation_id: &str) -> Result<InvocationSummary> {
        self.send_json(self.request(
            Method::GET,
            &format!("/invocations/{invocation_id}/jobs_summary"),
        ))
        .await
    }

    async fn invocation_report(&self, invocation_id: &str) -> Result<String> {
        let report: InvocationReport = self
            .send_json(self.request(
                Method::GET,
                &format!("/invocations/{invocation_id}/report"),
            ))
            .await?;
        Ok(report.markdown)
    }
}
