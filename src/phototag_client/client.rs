//! Blocking HTTP client for the PhotoTag keywords API.

use super::error::FetchError;
use super::payload::{default_payload, form_value, Payload};
use super::PhotoTagger;
use crate::record_store::{base_filename, Document};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_URL: &str = "https://server.phototag.ai/api/keywords";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Deserialize)]
struct KeywordsResponse {
    #[serde(default)]
    data: Option<Document>,
}

pub struct PhotoTagClient {
    client: Client,
    url: String,
    token: String,
    payload: Payload,
}

impl PhotoTagClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `url` - Endpoint of the keywords API
    /// * `token` - Bearer token for the API
    /// * `options` - Payload options overriding the defaults
    /// * `timeout_secs` - Request timeout in seconds
    pub fn new(url: &str, token: &str, options: &Payload, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let mut payload = default_payload();
        payload.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
            payload,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    fn build_form(&self, path: &Path) -> Result<multipart::Form, FetchError> {
        let bytes = fs::read(path)?;
        let file_part = multipart::Part::bytes(bytes).file_name(base_filename(&path.to_string_lossy()));

        let mut form = multipart::Form::new();
        for (key, value) in &self.payload {
            form = form.text(key.clone(), form_value(value));
        }
        Ok(form.part("file", file_part))
    }
}

impl PhotoTagger for PhotoTagClient {
    fn fetch_for_file(&self, path: &Path) -> Result<Option<Document>, FetchError> {
        if !path.is_file() {
            return Err(FetchError::FileNotFound(path.to_path_buf()));
        }

        info!("Requesting keywords for {:?} from {}", path, self.url);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .multipart(self.build_form(path)?)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body: KeywordsResponse = response
            .json()
            .map_err(|err| FetchError::InvalidResponse(err.to_string()))?;

        let Some(mut data) = body.data else {
            debug!("Keywords API returned no data for {:?}", path);
            return Ok(None);
        };

        let name = base_filename(&path.to_string_lossy());
        data.insert("filename".to_string(), Value::String(name.clone()));
        data.insert("id".to_string(), Value::String(name));
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = PhotoTagClient::new(DEFAULT_URL, "token", &Payload::new(), 30).unwrap();
        assert_eq!(client.url(), DEFAULT_URL);
        assert_eq!(client.payload(), &default_payload());
    }

    #[test]
    fn options_override_defaults_without_touching_them() {
        let mut options = Payload::new();
        options.insert("maxKeywords".to_string(), json!(30));
        options.insert("language".to_string(), json!("es"));
        options.insert("requiredKeywords".to_string(), json!(",sky"));

        let custom = PhotoTagClient::new(DEFAULT_URL, "token", &options, 30).unwrap();
        assert_eq!(custom.payload()["maxKeywords"], json!(30));
        assert_eq!(custom.payload()["language"], json!("es"));
        assert_eq!(custom.payload()["requiredKeywords"], json!(",sky"));
        assert!(custom.payload().contains_key("addMetadata"));

        let plain = PhotoTagClient::new(DEFAULT_URL, "token", &Payload::new(), 30).unwrap();
        assert_eq!(plain.payload()["maxKeywords"], json!(20));
    }

    #[test]
    fn missing_file_fails_before_any_request() {
        // Unroutable URL: reaching the network would fail differently.
        let client = PhotoTagClient::new("http://127.0.0.1:9/", "token", &Payload::new(), 1).unwrap();
        let result = client.fetch_for_file(Path::new("/definitely/not/here.jpg"));
        match result {
            Err(FetchError::FileNotFound(path)) => {
                assert_eq!(path, Path::new("/definitely/not/here.jpg"))
            }
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn directories_are_not_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let client = PhotoTagClient::new("http://127.0.0.1:9/", "token", &Payload::new(), 1).unwrap();
        assert!(matches!(
            client.fetch_for_file(dir.path()),
            Err(FetchError::FileNotFound(_))
        ));
    }
}
