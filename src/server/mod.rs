//! Host bridge
//!
//! Line-delimited JSON-RPC 2.0 between the game host and the tracker. The
//! host delivers callbacks one request at a time; each is dispatched to the
//! registered [`Hook`] of the same name and fully handled before the next
//! line is read.
//!
//! Methods: `initialize`, `ping`, `hooks/list`, `hooks/call`, `shutdown`.
//! Requests without an `id` are notifications and get no response.

mod handlers;

use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::protocol::{HookDefinition, JsonRpcError, JsonRpcRequest, JsonRpcResponse, Hook, ServerInfo};
use crate::types::HostResult;

pub use handlers::*;

/// JSON-RPC host bridge over any line reader/writer pair
pub struct HostBridge<R, W> {
    server_info: ServerInfo,
    hooks: BTreeMap<String, Box<dyn Hook>>,
    reader: R,
    writer: W,
    running: bool,
}

impl HostBridge<BufReader<io::Stdin>, BufWriter<io::Stdout>> {
    /// Bridge on the process's stdin/stdout
    pub fn stdio(info: ServerInfo) -> Self {
        Self::with_io(info, BufReader::new(io::stdin()), BufWriter::new(io::stdout()))
    }
}

impl<R: BufRead, W: Write> HostBridge<R, W> {
    pub fn with_io(info: ServerInfo, reader: R, writer: W) -> Self {
        Self {
            server_info: info,
            hooks: BTreeMap::new(),
            reader,
            writer,
            running: true,
        }
    }

    /// Subscribe a hook; a later hook with the same name replaces the earlier one
    pub fn register_hook(&mut self, hook: Box<dyn Hook>) -> &mut Self {
        let name = hook.name();
        self.hooks.insert(name, hook);
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Serve until `shutdown` is received or the input closes
    ///
    /// A line that is not valid UTF-8 is answered with a parse error and the
    /// loop keeps reading.
    pub fn run(&mut self) -> HostResult<()> {
        let mut buf = Vec::new();
        while self.running && self.reader.read_until(b'\n', &mut buf)? > 0 {
            match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        self.handle_request(trimmed)?;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "host sent a line that is not UTF-8");
                    self.send(&JsonRpcError::parse_error(e.to_string()))?;
                }
            }
            buf.clear();
        }
        info!("host bridge stopped");
        Ok(())
    }

    /// Consume the bridge and return the writer (used by tests)
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn handle_request(&mut self, request_str: &str) -> HostResult<()> {
        let request: JsonRpcRequest = match serde_json::from_str(request_str) {
            Ok(req) => req,
            Err(e) => return self.send(&JsonRpcError::parse_error(e.to_string())),
        };

        let notification = request.is_notification();
        let id = request.id.clone().unwrap_or(Value::Null);

        if !request.is_valid() {
            return self.send(&JsonRpcError::invalid_request(id, "jsonrpc must be '2.0'"));
        }

        debug!(method = %request.method, "host request");

        match request.method.as_str() {
            "initialize" => {
                let result = json!({
                    "serverInfo": {
                        "name": self.server_info.name,
                        "version": self.server_info.version
                    },
                    "capabilities": { "hooks": {} }
                });
                self.reply(notification, JsonRpcResponse::new(id, result))
            }
            "ping" => self.reply(notification, JsonRpcResponse::new(id, json!({}))),
            "hooks/list" => {
                let hooks: Vec<HookDefinition> = self.hooks.values().map(|h| h.definition()).collect();
                self.reply(notification, JsonRpcResponse::new(id, json!({ "hooks": hooks })))
            }
            "hooks/call" => self.handle_hook_call(id, notification, request.params),
            "shutdown" => {
                self.running = false;
                self.reply(notification, JsonRpcResponse::new(id, json!({})))
            }
            other => self.reply(notification, JsonRpcError::method_not_found(id, other)),
        }
    }

    fn handle_hook_call(&mut self, id: Value, notification: bool, params: Option<Value>) -> HostResult<()> {
        let params = match params {
            Some(params) => params,
            None => return self.reply(notification, JsonRpcError::invalid_params(id, "missing parameters")),
        };
        let hook_name = match extract_hook_name(&params) {
            Some(name) => name.to_string(),
            None => return self.reply(notification, JsonRpcError::invalid_params(id, "missing hook name")),
        };

        let hook = match self.hooks.get(&hook_name) {
            Some(hook) => hook,
            None => return self.reply(notification, JsonRpcError::unknown_hook(id, &hook_name)),
        };

        let outcome = hook.execute(extract_arguments(&params));
        match outcome {
            Ok(result) => self.reply(notification, JsonRpcResponse::new(id, result)),
            Err(e) => self.reply(notification, JsonRpcError::hook_failed(id, e.to_string())),
        }
    }

    fn reply<T: Serialize>(&mut self, notification: bool, message: T) -> HostResult<()> {
        if notification {
            return Ok(());
        }
        self.send(&message)
    }

    fn send<T: Serialize>(&mut self, message: &T) -> HostResult<()> {
        let json = serde_json::to_string(message)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }
}
