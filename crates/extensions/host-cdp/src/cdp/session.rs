//! A CDP session attached to a single page.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use super::error::CdpError;
use super::protocol::EvaluationResult;
use super::transport::Transport;

/// A session attached to a single page/target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, Some(&self.session_id)).await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Id of the top-level frame.
    pub async fn main_frame_id(&self) -> Result<String, CdpError> {
        let result = self.call("Page.getFrameTree", None).await?;
        result["frameTree"]["frame"]["id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("Missing frame id".to_string()))
    }

    /// Create a named isolated world in the main frame and return its
    /// execution context id.
    pub async fn create_isolated_world(&self, world_name: &str) -> Result<i64, CdpError> {
        let frame_id = self.main_frame_id().await?;
        let result = self
            .call(
                "Page.createIsolatedWorld",
                Some(json!({
                    "frameId": frame_id,
                    "worldName": world_name,
                    "grantUniveralAccess": false,
                })),
            )
            .await?;
        result["executionContextId"]
            .as_i64()
            .ok_or_else(|| CdpError::InvalidResponse("Missing executionContextId".to_string()))
    }

    /// Evaluate an expression in the page's main world and return its
    /// awaited value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;
        Self::unwrap_evaluation(result)
    }

    /// Call a function declaration in the given execution context.
    pub async fn call_function_in_context(
        &self,
        context_id: i64,
        function: &str,
        args: &[Value],
    ) -> Result<Value, CdpError> {
        let arguments: Vec<Value> = args.iter().map(|v| json!({ "value": v })).collect();
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "functionDeclaration": function,
                    "executionContextId": context_id,
                    "arguments": arguments,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;
        Self::unwrap_evaluation(result)
    }

    /// Install a script evaluated in every new document of this page.
    /// Returns the registration identifier.
    pub async fn add_script_on_new_document(
        &self,
        source: &str,
        world_name: Option<&str>,
    ) -> Result<String, CdpError> {
        let mut params = json!({ "source": source });
        if let Some(world) = world_name {
            params["worldName"] = json!(world);
        }
        let result = self
            .call("Page.addScriptToEvaluateOnNewDocument", Some(params))
            .await?;
        result["identifier"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("Missing script identifier".to_string()))
    }

    pub async fn remove_script_on_new_document(&self, identifier: &str) -> Result<(), CdpError> {
        self.call(
            "Page.removeScriptToEvaluateOnNewDocument",
            Some(json!({ "identifier": identifier })),
        )
        .await?;
        Ok(())
    }

    /// Start a reload. Returns once the browser accepted the command.
    pub async fn reload(&self) -> Result<(), CdpError> {
        self.call("Page.reload", Some(json!({ "ignoreCache": false })))
            .await?;
        Ok(())
    }

    fn unwrap_evaluation(result: Value) -> Result<Value, CdpError> {
        let evaluation: EvaluationResult = serde_json::from_value(result)?;
        if let Some(exception) = evaluation.exception_details {
            return Err(CdpError::JavaScript(exception.message()));
        }
        Ok(evaluation.result.value.unwrap_or(Value::Null))
    }
}
