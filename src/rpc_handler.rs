//! RPC method handler for the Linkboard JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches JSON-RPC method calls to the board service.

use serde::Serialize;
use serde_json::{json, Value};

use crate::services::board_service::{BoardService, BoardServiceTrait};
use crate::types::errors::BoardError;

/// Structured error returned to RPC clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcError {
    pub code: &'static str,
    pub message: String,
}

impl RpcError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_params",
            message: message.into(),
        }
    }
}

impl From<BoardError> for RpcError {
    fn from(err: BoardError) -> Self {
        Self {
            code: err.kind().as_str(),
            message: err.to_string(),
        }
    }
}

fn id_param(params: &Value, key: &str) -> Result<i64, RpcError> {
    params
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| RpcError::invalid_params(format!("missing {}", key)))
}

fn str_param<'p>(params: &'p Value, key: &str) -> Result<&'p str, RpcError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::invalid_params(format!("missing {}", key)))
}

fn opt_str<'p>(params: &'p Value, key: &str) -> Option<&'p str> {
    params.get(key).and_then(Value::as_str)
}

fn ordered_ids(params: &Value) -> &[Value] {
    params
        .get("ordered_ids")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Dispatch a JSON-RPC method call to the board service.
///
/// Returns `Ok(Value)` on success or a structured `RpcError`.
pub fn handle_method(board: &BoardService, method: &str, params: &Value) -> Result<Value, RpcError> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Sections ───
        "section.list" => Ok(json!(board.list_sections()?)),
        "section.get" => {
            let id = id_param(params, "id")?;
            Ok(json!(board.get_section(id)?))
        }
        "section.create" => {
            let name = str_param(params, "name")?;
            let section = board.create_section(name, opt_str(params, "color"))?;
            Ok(json!(section))
        }
        "section.update" => {
            let id = id_param(params, "id")?;
            board.update_section(id, opt_str(params, "name"), opt_str(params, "color"))?;
            Ok(json!({"ok": true}))
        }
        "section.delete" => {
            let id = id_param(params, "id")?;
            board.delete_section(id)?;
            Ok(json!({"ok": true}))
        }
        "section.reorder" => {
            let count = board.reorder_sections(ordered_ids(params))?;
            Ok(json!({"ok": true, "count": count}))
        }

        // ─── Links ───
        "link.get" => {
            let id = id_param(params, "id")?;
            Ok(json!(board.get_link(id)?))
        }
        "link.add" => {
            let section_id = id_param(params, "section_id")?;
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            let link = board.add_link(section_id, title, url, opt_str(params, "notes"))?;
            Ok(json!(link))
        }
        "link.update" => {
            let id = id_param(params, "id")?;
            board.update_link(
                id,
                opt_str(params, "title"),
                opt_str(params, "url"),
                opt_str(params, "notes"),
            )?;
            Ok(json!({"ok": true}))
        }
        "link.delete" => {
            let id = id_param(params, "id")?;
            board.delete_link(id)?;
            Ok(json!({"ok": true}))
        }
        "link.reorder" => {
            let section_id = id_param(params, "section_id")?;
            let count = board.reorder_links(section_id, ordered_ids(params))?;
            Ok(json!({"ok": true, "count": count}))
        }

        // ─── Maintenance ───
        "order.repair" => {
            let count = board.repair_order()?;
            Ok(json!({"ok": true, "count": count}))
        }

        _ => Err(RpcError {
            code: "unknown_method",
            message: format!("unknown method: {}", method),
        }),
    }
}
