use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

use crate::settings::SupabaseSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared plumbing for the hosted backend's REST endpoints.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings) -> Result<SupabaseClient> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("could not build HTTP client")?;
        Ok(SupabaseClient {
            client,
            url: settings.url.trim_end_matches('/').to_owned(),
            anon_key: settings.anon_key.clone(),
        })
    }

    /// Authorizes with the user's token when there is one, the anonymous key otherwise.
    pub fn request(&self, method: Method, path: &str, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.client
            .request(method, &format!("{}{}", self.url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    pub fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().context("could not reach the backend")?;
        parse_response(response)
    }
}

fn parse_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    if status.is_success() {
        Ok(value)
    } else {
        Err(anyhow!("{} (status {})", error_message(&value), status.as_u16()))
    }
}

/// Pulls the human readable part out of an error body, whichever service produced it.
pub fn error_message(body: &Value) -> String {
    for field in &["error_description", "msg", "message", "error"] {
        if let Some(message) = body.get(*field).and_then(Value::as_str) {
            return message.to_owned();
        }
    }
    match body {
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        _ => "request failed".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_error_messages() {
        assert_eq!(
            error_message(&json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message(&json!({ "code": "42P01", "message": "relation does not exist" })),
            "relation does not exist"
        );
        assert_eq!(error_message(&json!("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message(&Value::Null), "request failed");
    }
}
