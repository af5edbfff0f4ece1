//! Tauri commands for config load/save and the document Q&A session.
//! The Tauri `#[command]` wrappers delegate to testable plain functions.

use doc_qa_client::config::{self, BackendSection, Config, DownloadSection};
use doc_qa_client::{SelectedFile, Session, SessionView};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

// ── Global session (one per window) ─────────────────────────────────────

static SESSION: RwLock<Option<Arc<Session>>> = RwLock::new(None);

fn current_session() -> Result<Arc<Session>, String> {
    SESSION
        .read()
        .map_err(|e| e.to_string())?
        .clone()
        .ok_or_else(|| "Not configured".into())
}

/// JSON-friendly config form values sent to/from the frontend.
/// An empty `backend_url` selects the host-derived address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigForm {
    pub backend_url: String,
    pub backend_host: String,
    pub backend_port: u16,
    pub download_dir: String,
}

impl Default for ConfigForm {
    fn default() -> Self {
        Config::default().into()
    }
}

impl From<Config> for ConfigForm {
    fn from(c: Config) -> Self {
        let download_dir = c.download_dir().display().to_string();
        Self {
            backend_url: c.backend.url.unwrap_or_default(),
            backend_host: c
                .backend
                .host
                .unwrap_or_else(|| doc_qa_client::backend::DEFAULT_BACKEND_HOST.into()),
            backend_port: c
                .backend
                .port
                .unwrap_or(doc_qa_client::backend::DEFAULT_BACKEND_PORT),
            download_dir,
        }
    }
}

impl From<ConfigForm> for Config {
    fn from(f: ConfigForm) -> Self {
        Config {
            backend: BackendSection {
                url: Some(f.backend_url).filter(|u| !u.is_empty()),
                host: Some(f.backend_host),
                port: Some(f.backend_port),
            },
            download: DownloadSection {
                directory: Some(f.download_dir),
            },
        }
    }
}

/// Resolve config path from optional override, env, or default.
pub fn resolve_config_path(override_path: Option<&str>) -> Result<PathBuf, String> {
    if let Some(p) = override_path {
        return Ok(PathBuf::from(p));
    }
    if let Ok(val) = std::env::var("DOC_QA_CONFIG") {
        return Ok(PathBuf::from(val));
    }
    config::default_config_path().ok_or_else(|| "Cannot determine config path".into())
}

// ── Config ──────────────────────────────────────────────────────────────

pub fn do_load_config(path: &str) -> Result<ConfigForm, String> {
    let cfg = config::load(std::path::Path::new(path)).map_err(|e| e.to_string())?;
    Ok(ConfigForm::from(cfg))
}

/// Save form values to `path` as YAML. Creates parent dirs if needed.
pub fn do_save_config(path: &str, form: &ConfigForm) -> Result<(), String> {
    let cfg: Config = form.clone().into();
    config::save(std::path::Path::new(path), &cfg).map_err(|e| e.to_string())
}

/// Replace the session with a fresh one built from `form`.
pub fn do_configure(form: &ConfigForm) -> Result<SessionView, String> {
    let cfg: Config = form.clone().into();
    let session = doc_qa_client::session_from_config(&cfg).map_err(|e| e.to_string())?;
    log::info!(
        "session configured for {}",
        session.client().address().base_url()
    );
    let view = session.view();
    let mut guard = SESSION.write().map_err(|e| e.to_string())?;
    *guard = Some(Arc::new(session));
    Ok(view)
}

/// Configure from the config file on disk, or defaults when there is none.
pub fn configure_from_disk() -> Result<SessionView, String> {
    let path = resolve_config_path(None)?;
    let cfg = config::load_or_default(&path).map_err(|e| e.to_string())?;
    do_configure(&cfg.into())
}

/// Drop the session (if any). Safe to call when not configured.
pub fn do_reset() {
    if let Ok(mut guard) = SESSION.write() {
        *guard = None;
    }
}

// ── Session ─────────────────────────────────────────────────────────────

pub fn do_select_file(name: String, bytes: Vec<u8>) -> Result<SessionView, String> {
    let session = current_session()?;
    session.select_file(SelectedFile::from_bytes(name, bytes));
    Ok(session.view())
}

pub fn do_set_question(question: String) -> Result<SessionView, String> {
    let session = current_session()?;
    session.set_question(question);
    Ok(session.view())
}

pub fn do_session_view() -> Result<SessionView, String> {
    Ok(current_session()?.view())
}

/// Upload the selected file; `Ok` carries the confirmation to show.
pub async fn do_upload() -> Result<String, String> {
    let session = current_session()?;
    let notice = session.upload_document().await.map_err(|e| e.to_string())?;
    Ok(notice.to_string())
}

/// Ask the current question; `Ok` carries the answer.
pub async fn do_ask() -> Result<String, String> {
    let session = current_session()?;
    session.submit_question().await.map_err(|e| e.to_string())
}

/// Download the summary; `Ok` carries the "saved to" notice.
pub async fn do_download() -> Result<String, String> {
    let session = current_session()?;
    let notice = session.download_summary().await.map_err(|e| e.to_string())?;
    Ok(notice.to_string())
}

// ── Tauri command wrappers ──────────────────────────────────────────────

#[tauri::command]
pub fn get_config_path() -> Result<String, String> {
    let p = resolve_config_path(None)?;
    p.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| "Config path is not valid UTF-8".into())
}

#[tauri::command]
pub fn load_config(path: String) -> Result<ConfigForm, String> {
    do_load_config(&path)
}

#[tauri::command]
pub fn save_config(path: String, form: ConfigForm) -> Result<(), String> {
    do_save_config(&path, &form)
}

#[tauri::command]
pub fn configure(form: ConfigForm) -> Result<SessionView, String> {
    do_configure(&form)
}

#[tauri::command]
pub fn select_file(name: String, bytes: Vec<u8>) -> Result<SessionView, String> {
    do_select_file(name, bytes)
}

#[tauri::command]
pub fn set_question(question: String) -> Result<SessionView, String> {
    do_set_question(question)
}

#[tauri::command]
pub fn session_view() -> Result<SessionView, String> {
    do_session_view()
}

#[tauri::command]
pub async fn upload_document() -> Result<String, String> {
    do_upload().await
}

#[tauri::command]
pub async fn submit_question() -> Result<String, String> {
    do_ask().await
}

#[tauri::command]
pub async fn download_summary() -> Result<String, String> {
    do_download().await
}
