//! Assistant panel state: chat transcript and the AI insight card.
//!
//! Both follow the same two-phase shape: `begin_*` records the request and
//! hands back a [`RequestToken`], the caller awaits the remote service
//! without holding any lock, then `complete_*` applies the reply only if
//! that token is still the outstanding one. Replies for cancelled or
//! superseded requests are dropped.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Identifies one outstanding remote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
struct TokenSource {
    next: u64,
}

impl TokenSource {
    fn issue(&mut self) -> RequestToken {
        self.next += 1;
        RequestToken(self.next)
    }
}

/// A chat request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChat {
    pub token: RequestToken,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty or whitespace; nothing happened.
    Empty,
    /// A reply is still outstanding; the input was left untouched.
    Busy,
    Sent(PendingChat),
}

/// What the webview renders for the chat section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub thinking: bool,
}

#[derive(Debug, Default)]
pub struct AssistantPanel {
    transcript: Vec<ChatMessage>,
    input: String,
    pending: Option<RequestToken>,
    tokens: TokenSource,
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// True while a reply is outstanding ("Assistant is thinking...").
    pub fn is_awaiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> SubmitOutcome {
        let text = self.input.clone();
        self.begin_submit(&text)
    }

    /// Record a user turn and move to awaiting-reply.
    ///
    /// The message is appended verbatim (untrimmed) before any request is
    /// issued, and the input buffer is cleared.
    pub fn begin_submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.pending.is_some() {
            log::info!("[ASSISTANT] Submission ignored, reply still outstanding");
            return SubmitOutcome::Busy;
        }

        self.transcript.push(ChatMessage::user(text));
        self.input.clear();
        let token = self.tokens.issue();
        self.pending = Some(token);

        SubmitOutcome::Sent(PendingChat {
            token,
            message: text.to_string(),
        })
    }

    /// Append the assistant's reply and return to idle.
    ///
    /// Returns false (and changes nothing) when `token` is stale.
    pub fn complete_reply(&mut self, token: RequestToken, reply: String) -> bool {
        if self.pending != Some(token) {
            log::warn!("[ASSISTANT] Dropping stale reply for {:?}", token);
            return false;
        }
        self.transcript.push(ChatMessage::assistant(reply));
        self.pending = None;
        true
    }

    /// Forget the outstanding request, if any; its reply will be dropped.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            log::info!("[ASSISTANT] Cancelled outstanding request {:?}", token);
        }
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.transcript.clone(),
            input: self.input.clone(),
            thinking: self.is_awaiting(),
        }
    }
}

/// Generated marketing text for the current model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSnapshot {
    pub text: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Default)]
pub struct InsightPanel {
    text: Option<String>,
    pending: Option<RequestToken>,
    tokens: TokenSource,
}

impl InsightPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a new insight request. Any earlier one is superseded.
    pub fn begin(&mut self) -> RequestToken {
        let token = self.tokens.issue();
        self.pending = Some(token);
        token
    }

    pub fn complete(&mut self, token: RequestToken, text: String) -> bool {
        if self.pending != Some(token) {
            log::warn!("[ASSISTANT] Dropping stale insight for {:?}", token);
            return false;
        }
        self.text = Some(text);
        self.pending = None;
        true
    }

    /// Drop the current text and invalidate any outstanding request.
    pub fn clear(&mut self) {
        self.text = None;
        self.pending = None;
    }

    pub fn snapshot(&self) -> InsightSnapshot {
        InsightSnapshot {
            text: self.text.clone(),
            loading: self.is_loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(outcome: SubmitOutcome) -> PendingChat {
        match outcome {
            SubmitOutcome::Sent(p) => p,
            other => panic!("expected Sent, got {:?}", other),
        }
    }

    #[test]
    fn empty_and_whitespace_input_is_a_no_op() {
        let mut panel = AssistantPanel::new();
        assert_eq!(panel.begin_submit(""), SubmitOutcome::Empty);
        assert_eq!(panel.begin_submit("  \t\n"), SubmitOutcome::Empty);
        assert!(panel.transcript().is_empty());
        assert!(!panel.is_awaiting());
    }

    #[test]
    fn submit_appends_user_message_before_reply() {
        let mut panel = AssistantPanel::new();
        panel.set_input("Hello");
        let pending = sent(panel.submit_input());
        assert_eq!(pending.message, "Hello");
        assert_eq!(panel.transcript(), &[ChatMessage::user("Hello")]);
        assert_eq!(panel.input(), "");
        assert!(panel.is_awaiting());
    }

    #[test]
    fn user_message_is_kept_verbatim() {
        let mut panel = AssistantPanel::new();
        sent(panel.begin_submit("  spaced  "));
        assert_eq!(panel.transcript()[0].content, "  spaced  ");
    }

    #[test]
    fn reply_completes_the_turn() {
        let mut panel = AssistantPanel::new();
        let pending = sent(panel.begin_submit("What is AR?"));
        assert!(panel.complete_reply(pending.token, "An overlay.".into()));
        assert_eq!(
            panel.transcript(),
            &[ChatMessage::user("What is AR?"), ChatMessage::assistant("An overlay.")]
        );
        assert!(!panel.snapshot().thinking);
    }

    #[test]
    fn second_submit_while_awaiting_is_busy() {
        let mut panel = AssistantPanel::new();
        sent(panel.begin_submit("first"));
        panel.set_input("second");
        assert_eq!(panel.submit_input(), SubmitOutcome::Busy);
        assert_eq!(panel.input(), "second");
        assert_eq!(panel.transcript().len(), 1);
    }

    #[test]
    fn draft_typed_while_awaiting_survives_the_reply() {
        let mut panel = AssistantPanel::new();
        let pending = sent(panel.begin_submit("first"));
        panel.set_input("next question");
        assert!(panel.complete_reply(pending.token, "answer".into()));
        assert_eq!(panel.input(), "next question");
        assert_eq!(panel.snapshot().input, "next question");
    }

    #[test]
    fn cancelled_reply_is_dropped() {
        let mut panel = AssistantPanel::new();
        let pending = sent(panel.begin_submit("hi"));
        panel.cancel_pending();
        assert!(!panel.is_awaiting());
        assert!(!panel.complete_reply(pending.token, "late".into()));
        assert_eq!(panel.transcript().len(), 1);
    }

    #[test]
    fn tokens_are_not_reused() {
        let mut panel = AssistantPanel::new();
        let first = sent(panel.begin_submit("one"));
        panel.cancel_pending();
        let second = sent(panel.begin_submit("two"));
        assert_ne!(first.token, second.token);
        assert!(!panel.complete_reply(first.token, "stale".into()));
        assert!(panel.complete_reply(second.token, "fresh".into()));
        assert_eq!(panel.transcript().last().unwrap().content, "fresh");
    }

    #[test]
    fn insight_supersedes_and_clears() {
        let mut insight = InsightPanel::new();
        let first = insight.begin();
        let second = insight.begin();
        assert!(!insight.complete(first, "old".into()));
        assert!(insight.complete(second, "new".into()));
        assert_eq!(insight.text(), Some("new"));

        let third = insight.begin();
        insight.clear();
        assert!(!insight.complete(third, "after clear".into()));
        assert_eq!(insight.snapshot(), InsightSnapshot { text: None, loading: false });
    }

    #[test]
    fn chat_snapshot_serializes_roles_lowercase() {
        let mut panel = AssistantPanel::new();
        sent(panel.begin_submit("hi"));
        let json = serde_json::to_value(panel.snapshot()).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["thinking"], true);
    }
}
