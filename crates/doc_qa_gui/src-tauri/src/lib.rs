//! Tauri application library: the single-page Document Q&A form.

pub mod commands;

pub fn run() {
    if let Err(e) = commands::configure_from_disk() {
        log::warn!("starting unconfigured: {}", e);
    }

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            commands::get_config_path,
            commands::load_config,
            commands::save_config,
            commands::configure,
            commands::select_file,
            commands::set_question,
            commands::session_view,
            commands::upload_document,
            commands::submit_question,
            commands::download_summary,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
