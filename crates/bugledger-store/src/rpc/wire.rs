//! JSON-RPC 2.0 envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    /// Message with the revert reason appended when the node supplies one.
    pub fn describe(&self) -> String {
        match self.data.as_ref() {
            Some(Value::String(s)) => format!("{} ({s})", self.message),
            Some(Value::Object(obj)) => match obj.get("reason").and_then(Value::as_str) {
                Some(reason) => format!("{} ({reason})", self.message),
                None => self.message.clone(),
            },
            _ => self.message.clone(),
        }
    }
}

/// Call object shared by `eth_call` and `eth_sendTransaction`.
#[derive(Debug, Serialize)]
pub struct CallObject {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    pub data: String,
}

/// The fields of a transaction receipt this client looks at.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<String>,
}
