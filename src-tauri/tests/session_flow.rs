//! End-to-end flows through `AppState` with a scripted text generator.
//!
//! Covers model selection, upload import, and full chat/insight turns
//! without a webview or network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vision_ar_lib::assistant::ChatMessage;
use vision_ar_lib::catalog;
use vision_ar_lib::import::PickedFile;
use vision_ar_lib::llm::prompts::{CHAT_EMPTY_FALLBACK, CHAT_ERROR_FALLBACK, INSIGHT_ERROR_FALLBACK};
use vision_ar_lib::llm::{GenerationError, TextGenerator};
use vision_ar_lib::state::{self, AppState};
use vision_ar_lib::viewer::ViewerConfig;

enum Script {
    Reply(&'static str),
    Empty,
    Fail,
}

struct MockGenerator {
    script: Script,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script {
            Script::Reply(text) => Ok(text.to_string()),
            Script::Empty => Err(GenerationError::EmptyResponse),
            Script::Fail => Err(GenerationError::Other("network unreachable".to_string())),
        }
    }
}

fn upload(name: &str) -> PickedFile {
    PickedFile {
        name: name.to_string(),
        bytes: b"glTF\x02\x00\x00\x00".to_vec(),
    }
}

// ── Selection & Import ───────────────────────────────────────────────

#[test]
fn select_preset_then_upload_statue() {
    let mut app = AppState::new();
    assert_eq!(catalog::presets().len(), 3);

    let second = &catalog::presets()[1];
    app.select_preset(second.id).unwrap();
    assert_eq!(app.current_model().id, second.id);

    app.import_selection(Some(upload("statue.glb")));
    let current = app.current_model();
    assert_eq!(current.name, "statue");
    assert!(
        catalog::presets().iter().all(|p| p.id != current.id),
        "upload id {} collides with a preset",
        current.id
    );
}

#[test]
fn every_upload_gets_a_fresh_url() {
    let mut app = AppState::new();
    let mut urls = Vec::new();
    for _ in 0..5 {
        urls.push(app.import_file(upload("statue.glb")).url);
    }
    let mut deduped = urls.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), urls.len());
    assert_eq!(app.assets().len(), 1, "superseded uploads should be released");
}

#[test]
fn viewer_follows_current_model() {
    let mut app = AppState::new();
    let model = app.import_file(upload("statue.glb"));
    let config = ViewerConfig::for_model(app.current_model());
    assert_eq!(config.src, model.url);
    assert_eq!(config.overlay.name, "statue");
    assert!(config.render_element().contains(&model.id));
}

// ── Chat ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn whitespace_submission_is_a_no_op() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Reply("unused"));

    let snapshot = state::submit_chat(&state, &generator, "   ", |_| {}).await.unwrap();
    assert!(snapshot.messages.is_empty());
    assert!(!snapshot.thinking);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn chat_turn_appends_user_then_assistant() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Reply("AR overlays digital content on the real world."));

    let snapshot = state::submit_chat(&state, &generator, "What is AR?", |_| {})
        .await
        .unwrap();

    let tail = &snapshot.messages[snapshot.messages.len() - 2..];
    assert_eq!(
        tail,
        &[
            ChatMessage::user("What is AR?"),
            ChatMessage::assistant("AR overlays digital content on the real world."),
        ]
    );
    assert!(!snapshot.thinking);
    assert_eq!(snapshot.input, "");

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("Geometric Cube"), "prompt should name the current model");
}

#[tokio::test]
async fn failed_reply_uses_fallback_and_clears_thinking() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Fail);

    let snapshot = state::submit_chat(&state, &generator, "Hello", |_| {}).await.unwrap();
    assert_eq!(snapshot.messages.last().unwrap(), &ChatMessage::assistant(CHAT_ERROR_FALLBACK));
    assert!(!snapshot.thinking);
    assert!(!state.lock().unwrap().assistant().is_awaiting());
}

#[tokio::test]
async fn empty_reply_uses_fallback() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Empty);

    let snapshot = state::submit_chat(&state, &generator, "Hello", |_| {}).await.unwrap();
    assert_eq!(snapshot.messages.last().unwrap().content, CHAT_EMPTY_FALLBACK);
}

#[tokio::test]
async fn notify_sees_user_message_while_thinking() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Reply("Hi!"));
    let seen = Mutex::new(Vec::new());

    state::submit_chat(&state, &generator, "Hello", |snapshot| {
        seen.lock().unwrap().push(snapshot.clone());
    })
    .await
    .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].messages, vec![ChatMessage::user("Hello")]);
    assert!(seen[0].thinking);
}

/// Looks at the shared state from inside the remote call.
struct Observing {
    state: Arc<Mutex<AppState>>,
    seen: Mutex<Option<(Vec<ChatMessage>, bool)>>,
}

impl TextGenerator for Observing {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        let observed = {
            let app = self.state.lock().unwrap();
            (app.assistant().transcript().to_vec(), app.assistant().is_awaiting())
        };
        *self.seen.lock().unwrap() = Some(observed);
        Ok("Hi!".to_string())
    }
}

#[tokio::test]
async fn user_message_is_recorded_before_the_request_is_issued() {
    let state = Arc::new(Mutex::new(AppState::new()));
    let generator = Observing {
        state: state.clone(),
        seen: Mutex::new(None),
    };

    state::submit_chat(&state, &generator, "Hello", |_| {}).await.unwrap();

    let (transcript, awaiting) = generator.seen.lock().unwrap().clone().unwrap();
    assert_eq!(transcript, vec![ChatMessage::user("Hello")]);
    assert!(awaiting);
}

#[tokio::test]
async fn transcript_survives_model_switch() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Reply("Sure."));

    state::submit_chat(&state, &generator, "Tell me about it", |_| {}).await.unwrap();
    state.lock().unwrap().select_preset("cylinder").unwrap();
    let snapshot = state::submit_chat(&state, &generator, "And this one?", |_| {}).await.unwrap();

    assert_eq!(snapshot.messages.len(), 4);
    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[1].contains("Industrial Cylinder"));
}

// ── Insight ──────────────────────────────────────────────────────────

#[tokio::test]
async fn insight_for_current_model() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Reply("Bold. Cubic."));

    let snapshot = state::generate_insight(&state, &generator, |_| {}).await.unwrap();
    assert_eq!(snapshot.text.as_deref(), Some("Bold. Cubic."));
    assert!(!snapshot.loading);
    assert!(generator.prompts.lock().unwrap()[0].contains("\"Geometric Cube\""));
}

#[tokio::test]
async fn insight_failure_uses_fallback() {
    let state = Mutex::new(AppState::new());
    let generator = MockGenerator::new(Script::Fail);

    let snapshot = state::generate_insight(&state, &generator, |_| {}).await.unwrap();
    assert_eq!(snapshot.text.as_deref(), Some(INSIGHT_ERROR_FALLBACK));
}
