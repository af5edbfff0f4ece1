//! Backend address strategy and the JSON bodies exchanged with the QA backend.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_HOST: &str = "localhost";
pub const DEFAULT_BACKEND_PORT: u16 = 5000;

pub const UPLOAD_PATH: &str = "/upload";
pub const ASK_PATH: &str = "/ask";
pub const DOWNLOAD_SUMMARY_PATH: &str = "/download_summary";

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAddress {
    /// A base URL used as-is, e.g. `http://qa.internal:5000`.
    Fixed(String),
    /// Plain HTTP on `host` at a well-known port.
    HostDerived { host: String, port: u16 },
}

impl Default for BackendAddress {
    fn default() -> Self {
        BackendAddress::HostDerived {
            host: DEFAULT_BACKEND_HOST.into(),
            port: DEFAULT_BACKEND_PORT,
        }
    }
}

impl BackendAddress {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        match self {
            BackendAddress::Fixed(url) => url.trim_end_matches('/').to_string(),
            BackendAddress::HostDerived { host, port } => format!("http://{}:{}", host, port),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

/// Backend → client: upload result.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub doc_id: String,
}

/// Client → backend: question about an uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub doc_id: &'a str,
    pub question: &'a str,
}

/// Backend → client: answer text.
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Client → backend: summary request.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest<'a> {
    pub doc_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_derived_address_uses_plain_http() {
        let addr = BackendAddress::HostDerived {
            host: "10.0.0.7".into(),
            port: 5000,
        };
        assert_eq!(addr.base_url(), "http://10.0.0.7:5000");
        assert_eq!(addr.endpoint(ASK_PATH), "http://10.0.0.7:5000/ask");
    }

    #[test]
    fn fixed_address_drops_trailing_slash() {
        let addr = BackendAddress::Fixed("https://qa.example.com/api/".into());
        assert_eq!(
            addr.endpoint(DOWNLOAD_SUMMARY_PATH),
            "https://qa.example.com/api/download_summary"
        );
    }

    #[test]
    fn default_is_localhost_5000() {
        assert_eq!(BackendAddress::default().base_url(), "http://localhost:5000");
    }

    #[test]
    fn ask_request_serializes_wire_field_names() {
        let body = serde_json::to_value(AskRequest {
            doc_id: "d1",
            question: "What is the topic?",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"doc_id": "d1", "question": "What is the topic?"})
        );
    }
}
