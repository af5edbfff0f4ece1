//! Document Q&A session: selected file, document id, question, answer and one
//! busy-flag per action. Shared by the terminal binary and the desktop GUI.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::client::{Client, ClientError};

/// Name the downloaded summary is saved under.
pub const SUMMARY_FILE_NAME: &str = "summary.pdf";

/// Where the bytes of a selected file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// A user-chosen document, read only when it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    Ask,
    Download,
}

/// Busy-flag of one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    #[default]
    Idle,
    InFlight,
}

impl ActionState {
    pub fn is_busy(self) -> bool {
        self == ActionState::InFlight
    }
}

/// Everything a front end needs to draw the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub file_name: Option<String>,
    pub document_id: String,
    pub question: String,
    pub answer: String,
    pub uploading: ActionState,
    pub asking: ActionState,
    pub downloading: ActionState,
}

/// Successful outcome worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Uploaded { document_id: String },
    SummarySaved { path: PathBuf },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Uploaded { document_id } => write!(
                f,
                "Document uploaded successfully! Document ID: {}",
                document_id
            ),
            Notice::SummarySaved { path } => write!(f, "Summary saved to {}", path.display()),
        }
    }
}

/// Why an action did not complete. `Display` is the text shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Please select a file first.")]
    NoFileSelected,
    #[error("Please upload a document and enter a question.")]
    MissingDocumentOrQuestion,
    #[error("Please upload a document first.")]
    MissingDocument,
    #[error("Error uploading document. Please try again.")]
    UploadFailed(#[source] ClientError),
    #[error("Error getting answer. Please try again.")]
    AskFailed(#[source] ClientError),
    #[error("Error downloading summary. Please try again.")]
    DownloadFailed(#[source] ClientError),
}

impl ActionError {
    /// True when the action stopped before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ActionError::NoFileSelected
                | ActionError::MissingDocumentOrQuestion
                | ActionError::MissingDocument
        )
    }
}

#[derive(Debug, Default)]
struct SessionState {
    selected_file: Option<SelectedFile>,
    document_id: String,
    question: String,
    answer: String,
    uploading: ActionState,
    asking: ActionState,
    downloading: ActionState,
}

impl SessionState {
    fn flag_mut(&mut self, action: Action) -> &mut ActionState {
        match action {
            Action::Upload => &mut self.uploading,
            Action::Ask => &mut self.asking,
            Action::Download => &mut self.downloading,
        }
    }
}

/// Holds an action's flag at `InFlight`; dropping it returns the flag to `Idle`.
struct BusyGuard<'a> {
    session: &'a Session,
    action: Action,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.session.state().flag_mut(self.action) = ActionState::Idle;
    }
}

/// One user's session against the QA backend. Operations take `&self` and may
/// run concurrently; the state lock is never held across an await.
#[derive(Debug)]
pub struct Session {
    client: Client,
    download_dir: PathBuf,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(client: Client, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, action: Action) -> BusyGuard<'_> {
        *self.state().flag_mut(action) = ActionState::InFlight;
        BusyGuard {
            session: self,
            action,
        }
    }

    pub fn select_file(&self, file: SelectedFile) {
        log::debug!("selected {}", file.name());
        self.state().selected_file = Some(file);
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.state().question = question.into();
    }

    pub fn view(&self) -> SessionView {
        let state = self.state();
        SessionView {
            file_name: state.selected_file.as_ref().map(|f| f.name().to_string()),
            document_id: state.document_id.clone(),
            question: state.question.clone(),
            answer: state.answer.clone(),
            uploading: state.uploading,
            asking: state.asking,
            downloading: state.downloading,
        }
    }

    /// Upload the selected file and remember the document id it was given.
    pub async fn upload_document(&self) -> Result<Notice, ActionError> {
        let file = self
            .state()
            .selected_file
            .clone()
            .ok_or(ActionError::NoFileSelected)?;

        let _busy = self.begin(Action::Upload);
        let result = match file.read().await {
            Ok(bytes) => self.client.upload(file.name(), bytes).await,
            Err(e) => Err(ClientError::from(e)),
        };
        match result {
            Ok(document_id) => {
                log::info!("uploaded {} as {}", file.name(), document_id);
                self.state().document_id = document_id.clone();
                Ok(Notice::Uploaded { document_id })
            }
            Err(e) => {
                log::error!("Error uploading document: {}", e);
                Err(ActionError::UploadFailed(e))
            }
        }
    }

    /// Ask the current question; on success the answer replaces the previous one.
    pub async fn submit_question(&self) -> Result<String, ActionError> {
        let (document_id, question) = {
            let state = self.state();
            (state.document_id.clone(), state.question.clone())
        };
        if document_id.is_empty() || question.is_empty() {
            return Err(ActionError::MissingDocumentOrQuestion);
        }

        let _busy = self.begin(Action::Ask);
        match self.client.ask(&document_id, &question).await {
            Ok(answer) => {
                self.state().answer = answer.clone();
                Ok(answer)
            }
            Err(e) => {
                log::error!("Error getting answer: {}", e);
                Err(ActionError::AskFailed(e))
            }
        }
    }

    /// Download the summary and save it as `summary.pdf` in the download dir.
    pub async fn download_summary(&self) -> Result<Notice, ActionError> {
        let document_id = self.state().document_id.clone();
        if document_id.is_empty() {
            return Err(ActionError::MissingDocument);
        }

        let _busy = self.begin(Action::Download);
        let result = match self.client.download_summary(&document_id).await {
            Ok(bytes) => {
                let dir = self.download_dir.clone();
                tokio::task::spawn_blocking(move || save_summary(&dir, &bytes))
                    .await
                    .unwrap_or_else(|e| Err(std::io::Error::other(e)))
                    .map_err(ClientError::from)
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(path) => {
                log::info!("summary for {} saved to {}", document_id, path.display());
                Ok(Notice::SummarySaved { path })
            }
            Err(e) => {
                log::error!("Error downloading summary: {}", e);
                Err(ActionError::DownloadFailed(e))
            }
        }
    }
}

/// Write `bytes` to `dir/summary.pdf` via a temporary file renamed into place.
pub fn save_summary(dir: &Path, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    let target = dir.join(SUMMARY_FILE_NAME);
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}
