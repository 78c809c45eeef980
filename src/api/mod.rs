use crate::config::EnvConfig;
use crate::models::{FetchNotesParams, FetchNotesResponse, Note, NoteFormValues};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("request failed with status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    /// Only transport failures are worth repeating.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Remote notes API seam. [`ApiClient`] talks HTTP; tests substitute fakes.
pub(crate) trait NotesApi {
    async fn fetch_notes(&self, params: &FetchNotesParams) -> ApiResult<FetchNotesResponse>;
    async fn create_note(&self, values: &NoteFormValues) -> ApiResult<Note>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn from_config(cfg: &EnvConfig) -> Self {
        Self {
            base_url: cfg.api_url.clone(),
            token: cfg.api_token.clone(),
        }
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        mut req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        if let Some(header) = self.auth_header() {
            req = req.header("Authorization", header);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::Unauthorized)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::Http { status, body })
        }
    }
}

impl NotesApi for ApiClient {
    async fn fetch_notes(&self, params: &FetchNotesParams) -> ApiResult<FetchNotesResponse> {
        let req = reqwest::Client::new().get(self.url("/notes")).query(params);
        self.send(req).await
    }

    async fn create_note(&self, values: &NoteFormValues) -> ApiResult<Note> {
        let req = reqwest::Client::new().post(self.url("/notes")).json(values);
        self.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_without_token() {
        let client = ApiClient::from_config(&EnvConfig::default());
        assert_eq!(client.base_url, "http://localhost:8080");
        assert!(client.token.is_none());
        assert!(client.auth_header().is_none());
    }

    #[test]
    fn test_api_client_auth_header_from_config() {
        let cfg = EnvConfig {
            api_url: "https://notes.example.com/api".to_string(),
            api_token: Some("secret".to_string()),
            log_level: "info".to_string(),
        };
        let client = ApiClient::from_config(&cfg);
        assert_eq!(client.auth_header().as_deref(), Some("Bearer secret"));
        assert_eq!(client.url("/notes"), "https://notes.example.com/api/notes");
    }

    #[test]
    fn test_fetch_response_contract_deserialize() {
        let json = r#"{
            "notes": [
                {"id": "n1", "title": "Groceries", "content": "milk", "tag": "Shopping",
                 "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"}
            ],
            "totalPages": 4
        }"#;
        let parsed: FetchNotesResponse =
            serde_json::from_str(json).expect("list response should parse");
        assert_eq!(parsed.total_pages, 4);
        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].title, "Groceries");
    }

    #[test]
    fn test_empty_fetch_response() {
        let parsed: FetchNotesResponse =
            serde_json::from_str(r#"{"notes": [], "totalPages": 0}"#).expect("should parse");
        assert!(parsed.notes.is_empty());
        assert_eq!(parsed.total_pages, 0);
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(ApiError::Network("offline".to_string()).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Parse("bad".to_string()).is_retryable());
        assert!(!ApiError::Http {
            status: 500,
            body: String::new(),
        }
        .is_retryable());
    }

    #[test]
    fn test_http_error_message() {
        let e = ApiError::Http {
            status: 400,
            body: "title too short".to_string(),
        };
        assert_eq!(e.to_string(), "request failed with status 400: title too short");
    }
}
