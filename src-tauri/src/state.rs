//! Application state: the single owner of everything the UI mutates.
//!
//! All changes go through the named transitions on [`AppState`]. The async
//! helpers at the bottom hold the lock only around those transitions, never
//! across the remote call.

use crate::assets::{AssetStore, SessionAsset};
use crate::assistant::{
    AssistantPanel, ChatSnapshot, InsightPanel, InsightSnapshot, PendingChat, RequestToken,
    SubmitOutcome,
};
use crate::catalog::{self, ModelDescriptor};
use crate::import::{self, PickedFile};
use crate::llm::{self, TextGenerator};
use crate::selection::SelectionState;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Application state lock poisoned")]
    LockPoisoned,
}

/// A chat turn that has been recorded and now needs a remote reply.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub pending: PendingChat,
    pub model_name: String,
}

#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub token: RequestToken,
    pub model_name: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct AppState {
    selection: SelectionState,
    assets: AssetStore,
    assistant: AssistantPanel,
    insight: InsightPanel,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_model(&self) -> &ModelDescriptor {
        self.selection.current()
    }

    pub fn assistant(&self) -> &AssistantPanel {
        &self.assistant
    }

    pub fn insight(&self) -> &InsightPanel {
        &self.insight
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Make `descriptor` current.
    ///
    /// The chat transcript survives a model switch; the insight belongs to
    /// the old model and is cleared. A superseded upload's bytes are
    /// released.
    pub fn select_model(&mut self, descriptor: ModelDescriptor) {
        let previous = self.selection.select(descriptor);
        let current = self.selection.current();
        if previous.id != current.id {
            self.insight.clear();
        }
        if previous.url != current.url {
            self.assets.revoke(&previous.url);
        }
    }

    pub fn select_preset(&mut self, id: &str) -> Result<ModelDescriptor, StateError> {
        let preset = catalog::find_preset(id).ok_or_else(|| StateError::UnknownModel(id.to_string()))?;
        let descriptor = preset.descriptor();
        self.select_model(descriptor.clone());
        Ok(descriptor)
    }

    /// Import an uploaded file and make it current.
    pub fn import_file(&mut self, file: PickedFile) -> ModelDescriptor {
        let descriptor = import::build_descriptor(file, &mut self.assets);
        self.select_model(descriptor.clone());
        descriptor
    }

    /// File-input change handler: no file selected is a no-op.
    pub fn import_selection(&mut self, file: Option<PickedFile>) -> Option<ModelDescriptor> {
        match file {
            Some(file) => Some(self.import_file(file)),
            None => {
                log::info!("[IMPORT] No file selected");
                None
            }
        }
    }

    /// Put `text` in the input field and submit it.
    pub fn begin_chat(&mut self, text: &str) -> Option<ChatRequest> {
        self.assistant.set_input(text);
        match self.assistant.submit_input() {
            SubmitOutcome::Sent(pending) => Some(ChatRequest {
                pending,
                model_name: self.selection.current().name.clone(),
            }),
            SubmitOutcome::Empty | SubmitOutcome::Busy => None,
        }
    }

    pub fn finish_chat(&mut self, token: RequestToken, reply: String) -> bool {
        self.assistant.complete_reply(token, reply)
    }

    pub fn begin_insight(&mut self) -> InsightRequest {
        let current = self.selection.current();
        InsightRequest {
            token: self.insight.begin(),
            model_name: current.name.clone(),
            description: current.description.clone(),
        }
    }

    pub fn finish_insight(&mut self, token: RequestToken, text: String) -> bool {
        self.insight.complete(token, text)
    }

    /// Panel teardown: outstanding replies must not land afterwards and
    /// no upload bytes outlive the session.
    pub fn teardown(&mut self) {
        self.assistant.cancel_pending();
        self.insight.clear();
        self.assets.revoke_all();
    }

    /// Look up uploaded bytes for the `session-asset` protocol.
    pub fn asset_for_path(&self, path: &str) -> Option<SessionAsset> {
        self.assets.resolve_path(path).cloned()
    }
}

pub fn lock(state: &Mutex<AppState>) -> Result<MutexGuard<'_, AppState>, StateError> {
    state.lock().map_err(|_| StateError::LockPoisoned)
}

/// Full chat turn: record the user message, await the reply without the
/// lock held, then append it.
///
/// `notify` sees the snapshot once the user message is recorded (thinking
/// indicator on) so the UI can render it before the reply arrives.
/// Returns the transcript as it stands afterwards. Empty input and
/// submissions while busy return the unchanged snapshot without calling
/// the generator.
pub async fn submit_chat<G: TextGenerator>(
    state: &Mutex<AppState>,
    generator: &G,
    text: &str,
    notify: impl Fn(&ChatSnapshot) + Send,
) -> Result<ChatSnapshot, StateError> {
    let (request, snapshot) = {
        let mut app = lock(state)?;
        match app.begin_chat(text) {
            Some(request) => (request, app.assistant().snapshot()),
            None => return Ok(app.assistant().snapshot()),
        }
    };
    notify(&snapshot);

    let start = std::time::Instant::now();
    let reply = llm::chat_reply(generator, &request.pending.message, &request.model_name).await;
    log::info!("[ASSISTANT] Reply settled in {}ms", start.elapsed().as_millis());

    let mut app = lock(state)?;
    app.finish_chat(request.pending.token, reply);
    Ok(app.assistant().snapshot())
}

/// Generate the marketing insight for whatever model is current now.
pub async fn generate_insight<G: TextGenerator>(
    state: &Mutex<AppState>,
    generator: &G,
    notify: impl Fn(&InsightSnapshot) + Send,
) -> Result<InsightSnapshot, StateError> {
    let (request, snapshot) = {
        let mut app = lock(state)?;
        let request = app.begin_insight();
        (request, app.insight().snapshot())
    };
    notify(&snapshot);

    let text = llm::describe(generator, &request.model_name, &request.description).await;

    let mut app = lock(state)?;
    app.finish_insight(request.token, text);
    Ok(app.insight().snapshot())
}
