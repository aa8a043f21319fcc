//! CLI Commands

pub mod automations;
pub mod evaluate;
pub mod config;

use serde::de::DeserializeOwned;

/// API client
pub struct ApiClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn get_with_query<T: DeserializeOwned, Q: serde::Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, String> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(self.client.post(self.url(path))).await
    }

    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(self.client.delete(self.url(path))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T, String> {
        let resp = req.send().await.map_err(|e| e.to_string())?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| e.to_string())?;
        decode_body(status.as_u16(), &text)
    }
}

/// Decode a response body; a non-JSON body becomes the error text
fn decode_body<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, String> {
    match serde_json::from_str(text) {
        Ok(json) => unwrap_envelope(status, json),
        Err(_) if text.trim().is_empty() => Err(format!("Empty response (HTTP {})", status)),
        Err(_) => Err(format!("{} (HTTP {})", text.trim(), status)),
    }
}

/// Pull `data` out of the `{success, data, error}` envelope
fn unwrap_envelope<T: DeserializeOwned>(status: u16, json: serde_json::Value) -> Result<T, String> {
    if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
        let message = error.get("message").and_then(|m| m.as_str()).unwrap_or("request failed");
        return Err(format!("{} (HTTP {})", message, status));
    }

    match json.get("data") {
        Some(data) => serde_json::from_value(data.clone()).map_err(|e| e.to_string()),
        None => Err(format!("No data in response (HTTP {})", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_success() {
        let body = json!({"success": true, "data": {"id": 4}, "error": null});
        let id: serde_json::Value = unwrap_envelope(201, body).unwrap();
        assert_eq!(id["id"], 4);
    }

    #[test]
    fn test_unwrap_error() {
        let body = json!({
            "success": false,
            "data": null,
            "error": {"code": "not_found", "message": "automation not found: 9"}
        });
        let err = unwrap_envelope::<serde_json::Value>(404, body).unwrap_err();
        assert_eq!(err, "automation not found: 9 (HTTP 404)");
    }

    #[test]
    fn test_plain_text_body_surfaces_as_error() {
        let err = decode_body::<serde_json::Value>(422, "Failed to deserialize the JSON body\n")
            .unwrap_err();
        assert_eq!(err, "Failed to deserialize the JSON body (HTTP 422)");

        let err = decode_body::<serde_json::Value>(502, "").unwrap_err();
        assert_eq!(err, "Empty response (HTTP 502)");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/v1/");
        assert_eq!(client.url("/automations"), "http://localhost:8080/api/v1/automations");
    }
}
