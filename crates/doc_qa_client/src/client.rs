//! HTTP client for the QA backend: upload, ask, download summary.

use reqwest::multipart::{Form, Part};

use crate::backend::{
    AskRequest, AskResponse, BackendAddress, SummaryRequest, UploadResponse, ASK_PATH,
    DOWNLOAD_SUMMARY_PATH, UPLOAD_FIELD, UPLOAD_PATH,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Http { status: u16, body: String },
    /// Transport failure or a body that did not decode.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid backend address {0}")]
    InvalidAddress(String),
}

/// Client bound to one backend address.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    address: BackendAddress,
}

impl Client {
    pub fn new(address: BackendAddress) -> Result<Self, ClientError> {
        let base = address.base_url();
        if let Err(e) = reqwest::Url::parse(&base) {
            return Err(ClientError::InvalidAddress(format!("{}: {}", base, e)));
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, address })
    }

    pub fn address(&self) -> &BackendAddress {
        &self.address
    }

    /// Send the document as multipart field `file`; returns the new document id.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part(UPLOAD_FIELD, part);
        let response = self
            .http
            .post(self.address.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        let result: UploadResponse = ensure_success(response).await?.json().await?;
        Ok(result.doc_id)
    }

    pub async fn ask(&self, doc_id: &str, question: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.address.endpoint(ASK_PATH))
            .json(&AskRequest { doc_id, question })
            .send()
            .await?;
        let result: AskResponse = ensure_success(response).await?.json().await?;
        Ok(result.answer)
    }

    /// Fetch the generated summary as an opaque binary payload.
    pub async fn download_summary(&self, doc_id: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .post(self.address.endpoint(DOWNLOAD_SUMMARY_PATH))
            .json(&SummaryRequest { doc_id })
            .send()
            .await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Pass 2xx responses through; log status and body of anything else.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    log::error!("Response status: {}", status.as_u16());
    log::error!("Response text: {}", body);
    Err(ClientError::Http {
        status: status.as_u16(),
        body,
    })
}
