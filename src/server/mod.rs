mod handlers;
mod tools;

pub use tools::{ToolDescriptor, ToolName, catalog};

use crate::llm::Refiner;
use crate::rpc::{self, Request, Response};
use crate::storage::Storage;
use anyhow::Context;
use serde_json::{Value, json};
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Stdio JSON-RPC tool server: one request per input line, one envelope
/// per output line, processed strictly sequentially.
pub struct RefinerServer {
    storage: Storage,
    refiner: Refiner,
}

impl RefinerServer {
    pub fn new(storage: Storage, refiner: Refiner) -> Self {
        Self { storage, refiner }
    }

    /// Run the request loop until stdin closes.
    pub async fn run(&self) -> crate::Result<()> {
        info!(tier = %self.storage.tier(), "prompt-refiner ready");

        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("read request line")? {
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line).await;
            let payload = serde_json::to_string(&response).context("serialize response")?;
            println!("{payload}");
        }

        Ok(())
    }

    /// Handle one raw input line. Malformed JSON yields a parse-error
    /// envelope so the transport stays alive.
    pub async fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(_) => Response::error(None, rpc::PARSE_ERROR, "Parse error"),
        }
    }

    pub async fn handle_request(&self, request: Request) -> Response {
        let Request {
            id, method, params, ..
        } = request;

        match method.as_str() {
            "initialize" => Response::success(id, initialize_result()),
            "tools/list" => Response::success(id, json!({ "tools": catalog() })),
            "tools/call" => {
                self.handle_tool_call(id, params.unwrap_or_else(|| json!({})))
                    .await
            }
            other => Response::error(
                id,
                rpc::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Value) -> Response {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return Response::error(id, rpc::INVALID_PARAMS, "Missing tool name");
        };
        let Ok(tool) = ToolName::from_str(name) else {
            return Response::error(id, rpc::INVALID_PARAMS, format!("Unknown tool: {name}"));
        };
        let args = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));
        debug!(tool = %tool, "dispatching tool call");

        let result = match tool {
            ToolName::RefinePrompt => {
                handlers::refine_prompt(&self.storage, &self.refiner, &args).await
            }
            ToolName::SaveVariant => handlers::save_variant(&self.storage, &args).await,
            ToolName::GetDiff => handlers::get_diff(&self.storage, &args).await,
            ToolName::AcceptVariant => handlers::accept_variant(&self.storage, &args).await,
            ToolName::GetHistory => handlers::get_history(&self.storage, &args).await,
            ToolName::ShowVariants => handlers::show_variants(&self.storage, &args).await,
        };

        match result {
            Ok(value) => {
                let text = match serde_json::to_string_pretty(&value) {
                    Ok(text) => text,
                    Err(err) => return Response::error(id, rpc::INTERNAL_ERROR, err.to_string()),
                };
                Response::success(id, json!({ "content": [{ "type": "text", "text": text }] }))
            }
            Err(err) => Response::error(id, rpc::INTERNAL_ERROR, err.to_string()),
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": "prompt-refiner",
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}
