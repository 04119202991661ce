//! Host hook types

use serde::Serialize;
use serde_json::Value;

use crate::types::HostResult;

/// Hook definition returned by `hooks/list`
#[derive(Serialize, Debug, Clone)]
pub struct HookDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl HookDefinition {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Server information for the `initialize` handshake
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: String, version: String) -> Self {
        Self { name, version }
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self::new(crate::NAME.to_string(), crate::VERSION.to_string())
    }
}

/// A host callback the core subscribes to
///
/// Every hook is registered with the host bridge and invoked by name.
pub trait Hook: Send + Sync {
    fn definition(&self) -> HookDefinition;

    /// Handle one invocation
    fn execute(&self, params: Value) -> HostResult<Value>;

    fn name(&self) -> String {
        self.definition().name
    }
}
