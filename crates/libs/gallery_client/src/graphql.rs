use gallery_core::error::GatewayError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Thin GraphQL-over-HTTP executor. One POST per operation; the bearer
/// token, when present, is the per-gallery access token.
#[derive(Clone)]
pub(crate) struct GraphqlClient {
    http: Client,
    endpoint: Url,
}

impl GraphqlClient {
    pub(crate) fn new(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub(crate) async fn execute(
        &self,
        document: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&json!({ "query": document, "variables": variables }));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Unauthorized(status.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Remote(format!(
                "server returned {status}: {error_text}"
            )));
        }

        let body: GraphqlResponse = response.json().await.map_err(request_error)?;
        if !body.errors.is_empty() {
            let message = body
                .errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            if looks_unauthorized(&message) {
                return Err(GatewayError::Unauthorized(message));
            }
            return Err(GatewayError::Remote(message));
        }

        body.data
            .ok_or_else(|| GatewayError::Remote("response carried no data".to_string()))
    }
}

pub(crate) fn request_error(error: reqwest::Error) -> GatewayError {
    GatewayError::Remote(error.to_string())
}

/// GraphQL layers report authorization failures as ordinary errors with a
/// 200 status; recognize them by message.
fn looks_unauthorized(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["unauthorized", "forbidden", "401", "403"]
        .iter()
        .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::looks_unauthorized;

    #[test]
    fn recognizes_authorization_failures_by_message() {
        assert!(looks_unauthorized("Unauthorized"));
        assert!(looks_unauthorized("Request failed with status code 403"));
        assert!(looks_unauthorized("FORBIDDEN: gallery is gated"));
        assert!(!looks_unauthorized("gallery not found"));
    }
}
