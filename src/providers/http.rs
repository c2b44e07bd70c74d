//! Request helpers shared by the HTTP provider clients

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::errors::ProviderError;

/// Build the shared client. Every request made through it is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("chain-portfolio/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// Send a request and return the body; non-2xx statuses are transport failures
pub(crate) async fn send_for_text(request: RequestBuilder) -> Result<String, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Transport(format!("HTTP {}", status)));
    }
    Ok(response.text().await?)
}

pub(crate) async fn send_for_json(request: RequestBuilder) -> Result<Value, ProviderError> {
    let body = send_for_text(request).await?;
    Ok(serde_json::from_str(&body)?)
}

/// POST a JSON-RPC 2.0 call and return its `result` member
pub(crate) async fn json_rpc_call(
    client: &Client,
    url: &str,
    method: &str,
    params: Value,
) -> Result<Value, ProviderError> {
    let envelope = RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method,
        params,
    };
    let body = send_for_text(client.post(url).json(&envelope)).await?;
    parse_rpc_result(&body)
}

/// Extract `result` from a JSON-RPC response body. An `error` member is a domain failure.
pub(crate) fn parse_rpc_result(body: &str) -> Result<Value, ProviderError> {
    let mut response: Value = serde_json::from_str(body)?;

    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ProviderError::UpstreamDomain(message));
    }

    match response.get_mut("result") {
        Some(result) if !result.is_null() => Ok(result.take()),
        _ => Err(ProviderError::MalformedResponse(
            "JSON-RPC response has no result".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rpc_result_is_extracted() {
        let result = parse_rpc_result(r#"{"jsonrpc":"2.0","id":1,"result":"0x10"}"#).unwrap();
        assert_eq!(result, json!("0x10"));
    }

    #[test]
    fn rpc_error_member_is_domain_failure() {
        let err = parse_rpc_result(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid address"}}"#,
        )
        .unwrap_err();
        assert_eq!(err, ProviderError::UpstreamDomain("invalid address".to_string()));
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = parse_rpc_result(r#"{"jsonrpc":"2.0","id":1}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));

        let err = parse_rpc_result("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }
}
