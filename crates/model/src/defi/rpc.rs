// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A JSON-RPC 2.0 request sent to a blockchain node over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct RpcNodeHttpRequest<'a> {
    /// JSON-RPC version identifier, always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Request identifier echoed back by the server.
    pub id: u64,
    /// Name of the RPC method to call.
    pub method: &'a str,
    /// Positional parameters.
    pub params: serde_json::Value,
}

impl<'a> RpcNodeHttpRequest<'a> {
    /// Creates a new [`RpcNodeHttpRequest`].
    #[must_use]
    pub const fn new(id: u64, method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// A response structure received from an HTTP JSON-RPC blockchain node request.
///
/// Exactly one of `result` or `error` is set by a conforming node.
#[derive(Debug, Deserialize)]
pub struct RpcNodeHttpResponse<T>
where
    T: DeserializeOwned,
{
    /// JSON-RPC version identifier.
    pub jsonrpc: String,
    /// Request identifier returned by the server.
    pub id: u64,
    /// Deserialized result.
    #[serde(default = "Option::default", bound(deserialize = ""))]
    pub result: Option<T>,
    /// Error object, when the call failed.
    #[serde(default)]
    pub error: Option<RpcNodeError>,
}

/// The error object of a failed JSON-RPC call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcNodeError {
    /// Numeric error code. Code 3 signals an execution revert.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional additional data, such as ABI-encoded revert data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn test_request_serialization() {
        let request = RpcNodeHttpRequest::new(7, "eth_gasPrice", json!([]));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 7, "method": "eth_gasPrice", "params": []})
        );
    }

    #[rstest]
    fn test_response_with_result() {
        let response: RpcNodeHttpResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#).unwrap();
        assert_eq!(response.id, 1);
        assert_eq!(response.result.as_deref(), Some("0x2a"));
        assert!(response.error.is_none());
    }

    #[rstest]
    fn test_response_with_null_result() {
        let response: RpcNodeHttpResponse<String> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(response.result.is_none());
    }

    #[rstest]
    fn test_response_with_revert_error() {
        let response: RpcNodeHttpResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":3,"error":{"code":3,"message":"execution reverted","data":"0x1234"}}"#,
        )
        .unwrap();
        assert!(response.result.is_none());

        let error = response.error.unwrap();
        assert_eq!(error.code, 3);
        assert_eq!(error.message, "execution reverted");
        assert_eq!(error.data, Some(json!("0x1234")));
    }
}
