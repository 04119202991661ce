//! Protocol types for host communication
//!
//! JSON-RPC 2.0 envelopes and the hook abstraction the host bridge
//! dispatches to.

mod host;
mod jsonrpc;

pub use host::{Hook, HookDefinition, ServerInfo};
pub use jsonrpc::{ErrorObject, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
