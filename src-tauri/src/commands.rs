//! Tauri command handlers for the webview.
//!
//! Every command is a thin wrapper over an [`AppState`] transition. State
//! changes are also broadcast as events so every view stays in sync:
//! - "model-changed" with the new `ModelDescriptor`
//! - "chat-updated" with a `ChatSnapshot`
//! - "insight-updated" with an `InsightSnapshot`

use crate::assistant::{ChatSnapshot, InsightSnapshot};
use crate::catalog::{self, ModelDescriptor};
use crate::config::AppConfig;
use crate::import::{self, PickedFile, ACCEPTED_EXTENSIONS, FILE_NAME_HEADER};
use crate::llm::GeminiClient;
use crate::state::{self, AppState};
use crate::viewer::{self, ArStatus, InfoPanel, ViewerConfig};
use std::sync::Mutex;
use tauri::http::{header, Response, StatusCode};
use tauri::ipc::{InvokeBody, Request};
use tauri::{AppHandle, Emitter, State};

/// Managed state: the application state plus the remote client.
pub struct SessionState {
    pub app: Mutex<AppState>,
    pub gemini: GeminiClient,
}

impl SessionState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            app: Mutex::new(AppState::new()),
            gemini: GeminiClient::new(config),
        }
    }
}

/// `session-asset` protocol handler: serve uploaded bytes by UUID path.
///
/// Only an `Arc` clone happens under the lock. The protocol wants owned
/// `'static` bytes, so the copy into the body is made after release.
pub fn serve_asset(session: &SessionState, path: &str) -> Response<Vec<u8>> {
    let asset = match state::lock(&session.app) {
        Ok(app) => app.asset_for_path(path),
        Err(e) => {
            log::error!("[ASSETS] {}", e);
            None
        }
    };

    let built = match asset {
        Some(asset) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, asset.content_type)
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .body(asset.bytes.to_vec()),
        None => {
            log::warn!("[ASSETS] No live asset at {}", path);
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
                .body(Vec::new())
        }
    };

    built.unwrap_or_else(|e| {
        log::error!("[ASSETS] Failed to build response: {}", e);
        let mut response = Response::new(Vec::new());
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}

fn emit_model_changed(app: &AppHandle, model: &ModelDescriptor) {
    if let Err(e) = app.emit("model-changed", model) {
        log::warn!("[STATE] Failed to emit model-changed: {}", e);
    }
}

/// Tauri command: preset models for the sidebar.
#[tauri::command]
pub fn list_presets() -> Vec<ModelDescriptor> {
    catalog::preset_descriptors()
}

#[tauri::command]
pub fn current_model(state: State<'_, SessionState>) -> Result<ModelDescriptor, String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    Ok(app.current_model().clone())
}

/// Tauri command: switch to a preset by ID.
#[tauri::command]
pub fn select_preset(
    app: AppHandle,
    state: State<'_, SessionState>,
    id: String,
) -> Result<ModelDescriptor, String> {
    let model = state::lock(&state.app)
        .map_err(|e| e.to_string())?
        .select_preset(&id)
        .map_err(|e| e.to_string())?;
    emit_model_changed(&app, &model);
    Ok(model)
}

/// Tauri command: import a file the webview read from an `<input type=file>`.
///
/// The body is the raw file bytes; the name travels in `x-file-name`.
#[tauri::command]
pub fn import_model_bytes(
    app: AppHandle,
    state: State<'_, SessionState>,
    request: Request<'_>,
) -> Result<ModelDescriptor, String> {
    let InvokeBody::Raw(bytes) = request.body() else {
        return Err("Expected raw file bytes".to_string());
    };
    let name = request
        .headers()
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(import::decode_file_name)
        .ok_or_else(|| format!("Missing {} header", FILE_NAME_HEADER))?;

    let file = PickedFile {
        name,
        bytes: bytes.clone(),
    };
    let model = state::lock(&state.app)
        .map_err(|e| e.to_string())?
        .import_file(file);
    emit_model_changed(&app, &model);
    Ok(model)
}

/// Tauri command: open the native picker and import the chosen model.
///
/// Returns `None` when the user cancels.
#[tauri::command]
pub async fn pick_model_file(
    app: AppHandle,
    state: State<'_, SessionState>,
) -> Result<Option<ModelDescriptor>, String> {
    use tauri_plugin_dialog::DialogExt;

    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("3D models", ACCEPTED_EXTENSIONS)
        .pick_file(move |picked| {
            if tx.send(picked).is_err() {
                log::warn!("[IMPORT] File picker result arrived after the command was dropped");
            }
        });
    let picked = rx.await.map_err(|e| e.to_string())?;

    let file = match picked {
        Some(path) => {
            let path = path.into_path().map_err(|e| e.to_string())?;
            Some(import::read_picked_file(&path).map_err(|e| e.to_string())?)
        }
        None => None,
    };

    let model = state::lock(&state.app)
        .map_err(|e| e.to_string())?
        .import_selection(file);
    if let Some(model) = &model {
        emit_model_changed(&app, model);
    }
    Ok(model)
}

#[tauri::command]
pub fn viewer_config(state: State<'_, SessionState>) -> Result<ViewerConfig, String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    Ok(ViewerConfig::for_model(app.current_model()))
}

/// Tauri command: `<model-viewer>` markup for the current model.
#[tauri::command]
pub fn viewer_markup(state: State<'_, SessionState>) -> Result<String, String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    Ok(ViewerConfig::for_model(app.current_model()).render_element())
}

#[tauri::command]
pub fn info_panel(state: State<'_, SessionState>) -> Result<InfoPanel, String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    Ok(InfoPanel::for_model(app.current_model()))
}

/// Tauri command: forward the viewer's `ar-status` event to the log.
#[tauri::command]
pub fn report_ar_status(state: State<'_, SessionState>, status: String) -> Result<(), String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    viewer::log_ar_status(&app.current_model().id, &ArStatus::parse(&status));
    Ok(())
}

/// Tauri command: submit a chat message and wait for the assistant's reply.
///
/// Emits "chat-updated" as soon as the user message is recorded, then
/// again with the reply.
#[tauri::command]
pub async fn submit_chat(
    app: AppHandle,
    state: State<'_, SessionState>,
    text: String,
) -> Result<ChatSnapshot, String> {
    let notify = |snapshot: &ChatSnapshot| {
        if let Err(e) = app.emit("chat-updated", snapshot) {
            log::warn!("[ASSISTANT] Failed to emit chat-updated: {}", e);
        }
    };
    let snapshot = state::submit_chat(&state.app, &state.gemini, &text, notify)
        .await
        .map_err(|e| e.to_string())?;
    notify(&snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub fn chat_snapshot(state: State<'_, SessionState>) -> Result<ChatSnapshot, String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    Ok(app.assistant().snapshot())
}

/// Tauri command: ask the model for a short marketing blurb.
#[tauri::command]
pub async fn generate_insight(
    app: AppHandle,
    state: State<'_, SessionState>,
) -> Result<InsightSnapshot, String> {
    let notify = |snapshot: &InsightSnapshot| {
        if let Err(e) = app.emit("insight-updated", snapshot) {
            log::warn!("[ASSISTANT] Failed to emit insight-updated: {}", e);
        }
    };
    let snapshot = state::generate_insight(&state.app, &state.gemini, notify)
        .await
        .map_err(|e| e.to_string())?;
    notify(&snapshot);
    Ok(snapshot)
}

#[tauri::command]
pub fn insight_snapshot(state: State<'_, SessionState>) -> Result<InsightSnapshot, String> {
    let app = state::lock(&state.app).map_err(|e| e.to_string())?;
    Ok(app.insight().snapshot())
}
