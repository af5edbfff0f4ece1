//! Shared Document Q&A client library (config, backend protocol, session state).
//! Used by the Tauri GUI and the `doc-qa` terminal binary.

pub mod backend;
pub mod client;
pub mod config;
pub mod session;

pub use backend::BackendAddress;
pub use client::{Client, ClientError};
pub use config::{default_config_path, BackendSection, Config, ConfigError, DownloadSection};
pub use session::{
    ActionError, ActionState, Notice, SelectedFile, Session, SessionView, SUMMARY_FILE_NAME,
};

/// Build a session from a loaded config.
pub fn session_from_config(config: &Config) -> Result<Session, ClientError> {
    let client = Client::new(config.backend_address())?;
    Ok(Session::new(client, config.download_dir()))
}
