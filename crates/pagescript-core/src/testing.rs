//! Collaborator fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use pagescript_protocols::{
    CloudProvider, CompletionRequest, ExecutionWorld, HostError, InjectionCapabilities,
    ModelAvailability, ModelSession, OnDeviceModel, ProviderError, ProviderKind, RegisteredScript,
    ScriptHost, SessionOptions, TabId, TabInfo, TabQuery,
};

#[derive(Default)]
pub struct ModelState {
    pub responses: Mutex<VecDeque<Result<String, String>>>,
    pub prompts: Mutex<Vec<String>>,
    pub created: AtomicUsize,
    pub destroyed: AtomicUsize,
    pub options: Mutex<Vec<SessionOptions>>,
}

/// On-device model answering from a queue of scripted responses.
pub struct FakeModel {
    pub availability: Mutex<Result<ModelAvailability, String>>,
    pub state: Arc<ModelState>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self {
            availability: Mutex::new(Ok(ModelAvailability::Readily)),
            state: Arc::new(ModelState::default()),
        }
    }

    pub fn with_responses(responses: Vec<Result<&str, &str>>) -> Self {
        let model = Self::new();
        model.push_responses(responses);
        model
    }

    pub fn push_responses(&self, responses: Vec<Result<&str, &str>>) {
        let mut queue = self.state.responses.lock();
        for response in responses {
            queue.push_back(response.map(str::to_string).map_err(str::to_string));
        }
    }

    pub fn created(&self) -> usize {
        self.state.created.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> usize {
        self.state.destroyed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OnDeviceModel for FakeModel {
    async fn availability(&self) -> Result<ModelAvailability, ProviderError> {
        self.availability
            .lock()
            .clone()
            .map_err(ProviderError::Network)
    }

    async fn create_session(
        &self,
        options: SessionOptions,
    ) -> Result<Arc<dyn ModelSession>, ProviderError> {
        self.state.created.fetch_add(1, Ordering::SeqCst);
        self.state.options.lock().push(options);
        Ok(Arc::new(FakeSession {
            state: self.state.clone(),
        }))
    }
}

pub struct FakeSession {
    state: Arc<ModelState>,
}

#[async_trait]
impl ModelSession for FakeSession {
    async fn prompt(&self, input: &str) -> Result<String, ProviderError> {
        self.state.prompts.lock().push(input.to_string());
        match self.state.responses.lock().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::Session(message)),
            None => Err(ProviderError::Session("no scripted response".to_string())),
        }
    }

    async fn destroy(&self) {
        self.state.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Cloud provider returning a fixed response and recording requests.
pub struct FakeCloud {
    pub kind: ProviderKind,
    pub response: Mutex<Result<String, (u16, String)>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCloud {
    pub fn new(kind: ProviderKind, response: &str) -> Self {
        Self {
            kind,
            response: Mutex::new(Ok(response.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CloudProvider for FakeCloud {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request);
        self.response
            .lock()
            .clone()
            .map_err(|(status, message)| ProviderError::from_api_response(status, message))
    }
}

#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub tab_id: TabId,
    pub world: ExecutionWorld,
    pub function: String,
    pub args: Vec<Value>,
}

type CallHandler = Box<dyn Fn(&FunctionCall) -> Result<Value, HostError> + Send + Sync>;

/// Browser host with an in-memory tab list and script registry.
pub struct FakeHost {
    pub tabs: Mutex<Vec<TabInfo>>,
    pub capabilities: InjectionCapabilities,
    pub calls: Mutex<Vec<FunctionCall>>,
    pub registered: Mutex<Vec<RegisteredScript>>,
    pub events: Mutex<Vec<String>>,
    handler: Mutex<CallHandler>,
}

impl FakeHost {
    pub fn new(tabs: Vec<TabInfo>) -> Self {
        Self::with_capabilities(tabs, InjectionCapabilities::all())
    }

    pub fn with_capabilities(tabs: Vec<TabInfo>, capabilities: InjectionCapabilities) -> Self {
        Self {
            tabs: Mutex::new(tabs),
            capabilities,
            calls: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            handler: Mutex::new(Box::new(|_: &FunctionCall| -> Result<Value, HostError> {
                Ok(Value::Null)
            }) as CallHandler),
        }
    }

    /// Decide what every `call_function` returns.
    pub fn on_call(
        &self,
        handler: impl Fn(&FunctionCall) -> Result<Value, HostError> + Send + Sync + 'static,
    ) {
        *self.handler.lock() = Box::new(handler);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn registered_ids(&self) -> Vec<String> {
        self.registered.lock().iter().map(|s| s.id.clone()).collect()
    }
}

#[async_trait]
impl TabQuery for FakeHost {
    async fn active_tab(&self) -> Result<Option<TabInfo>, HostError> {
        Ok(self.tabs.lock().first().cloned())
    }

    async fn get_tab(&self, tab_id: TabId) -> Result<TabInfo, HostError> {
        self.tabs
            .lock()
            .iter()
            .find(|tab| tab.tab_id == tab_id)
            .cloned()
            .ok_or(HostError::TabNotFound(tab_id))
    }
}

#[async_trait]
impl ScriptHost for FakeHost {
    fn capabilities(&self) -> InjectionCapabilities {
        self.capabilities
    }

    async fn call_function(
        &self,
        tab_id: TabId,
        world: ExecutionWorld,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, HostError> {
        let call = FunctionCall {
            tab_id,
            world,
            function: function.to_string(),
            args,
        };
        self.calls.lock().push(call.clone());
        self.events.lock().push(format!("call:{}", tab_id));
        let handler = self.handler.lock();
        (*handler)(&call)
    }

    async fn register_scripts(&self, scripts: Vec<RegisteredScript>) -> Result<(), HostError> {
        let mut registered = self.registered.lock();
        for script in scripts {
            self.events.lock().push(format!("register:{}", script.id));
            registered.push(script);
        }
        Ok(())
    }

    async fn unregister_scripts(&self, ids: &[String]) -> Result<(), HostError> {
        let mut registered = self.registered.lock();
        for id in ids {
            if registered.iter().any(|s| &s.id == id) {
                self.events.lock().push(format!("unregister:{}", id));
            }
        }
        registered.retain(|s| !ids.contains(&s.id));
        Ok(())
    }

    async fn registered_scripts(&self) -> Result<Vec<RegisteredScript>, HostError> {
        Ok(self.registered.lock().clone())
    }

    async fn reload(&self, tab_id: TabId) -> Result<(), HostError> {
        self.events.lock().push(format!("reload:{}", tab_id));
        Ok(())
    }
}
