//! VisionAR: 3D/AR model viewer with an AI assistant.
//!
//! The library core is UI-agnostic:
//! - Preset catalog and current selection (catalog.rs, selection.rs)
//! - File import and session-scoped asset URLs (import.rs, assets.rs)
//! - `<model-viewer>` configuration (viewer.rs)
//! - Assistant transcript and insight state (assistant.rs)
//! - Gemini text generation with fallback replies (llm/)
//! - The application state that owns all of the above (state.rs)
//!
//! With the `desktop` feature this is also the Tauri app shell: command
//! handlers (commands.rs) and the `session-asset` protocol.

pub mod assets;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod import;
pub mod llm;
pub mod selection;
pub mod state;
pub mod viewer;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(feature = "desktop")]
use commands::SessionState;

/// Entry point, called by the Tauri runtime.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::{Manager, WindowEvent};

    if let Err(e) = dotenvy::dotenv() {
        // A missing .env is normal; the key may come from the shell.
        eprintln!("[CONFIG] No .env loaded: {}", e);
    }
    env_logger::init();

    let config = config::AppConfig::from_env();
    log::info!(
        "[CONFIG] Model: {}, timeout: {:?}",
        config.model,
        config.request_timeout
    );

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(SessionState::new(config))
        .register_uri_scheme_protocol(assets::SCHEME, |ctx, request| {
            let session = ctx.app_handle().state::<SessionState>();
            commands::serve_asset(&session, request.uri().path())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_presets,
            commands::current_model,
            commands::select_preset,
            commands::import_model_bytes,
            commands::pick_model_file,
            commands::viewer_config,
            commands::viewer_markup,
            commands::info_panel,
            commands::report_ar_status,
            commands::submit_chat,
            commands::chat_snapshot,
            commands::generate_insight,
            commands::insight_snapshot,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                let session = window.state::<SessionState>();
                match state::lock(&session.app) {
                    Ok(mut app) => app.teardown(),
                    Err(e) => log::error!("[STATE] {}", e),
                }
            }
        })
        .setup(|_app| {
            log::info!("VisionAR starting up");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running VisionAR");
}
