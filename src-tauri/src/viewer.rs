//! Viewer surface: configuration bridge to the `<model-viewer>` element.
//!
//! Rendering, asset loading and AR session negotiation all belong to the
//! web component. This module only decides what to hand it and logs the
//! AR status events it emits.

use crate::catalog::ModelDescriptor;
use serde::Serialize;

pub const AR_BUTTON_LABEL: &str = "View in Your Space";

/// AR presentation modes, in the order the component should try them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArMode {
    Webxr,
    SceneViewer,
    QuickLook,
}

impl ArMode {
    pub fn as_attr(self) -> &'static str {
        match self {
            ArMode::Webxr => "webxr",
            ArMode::SceneViewer => "scene-viewer",
            ArMode::QuickLook => "quick-look",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub name: String,
    pub id: String,
}

/// Everything the `<model-viewer>` element is configured with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    pub src: String,
    pub ar: bool,
    pub ar_modes: Vec<ArMode>,
    pub camera_controls: bool,
    pub auto_rotate: bool,
    pub poster: String,
    pub shadow_intensity: f32,
    pub exposure: f32,
    pub touch_action: &'static str,
    pub alt: String,
    pub ar_button_label: &'static str,
    pub overlay: Overlay,
}

impl ViewerConfig {
    pub fn for_model(model: &ModelDescriptor) -> Self {
        Self {
            src: model.url.clone(),
            ar: true,
            ar_modes: vec![ArMode::Webxr, ArMode::SceneViewer, ArMode::QuickLook],
            camera_controls: true,
            auto_rotate: true,
            poster: model.thumbnail.clone(),
            shadow_intensity: 1.0,
            exposure: 1.0,
            touch_action: "pan-y",
            alt: format!("A 3D model of {}", model.name),
            ar_button_label: AR_BUTTON_LABEL,
            overlay: Overlay {
                name: model.name.clone(),
                id: model.id.clone(),
            },
        }
    }

    pub fn ar_modes_attr(&self) -> String {
        self.ar_modes
            .iter()
            .map(|m| m.as_attr())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the element markup, AR button slot and overlay included.
    ///
    /// Every interpolated value is escaped; names and URLs of uploads come
    /// straight from the user's filesystem.
    pub fn render_element(&self) -> String {
        let mut flags = Vec::new();
        if self.ar {
            flags.push("ar");
        }
        if self.camera_controls {
            flags.push("camera-controls");
        }
        if self.auto_rotate {
            flags.push("auto-rotate");
        }

        format!(
            concat!(
                "<model-viewer id=\"viewer\" src=\"{src}\" ar-modes=\"{modes}\" poster=\"{poster}\" ",
                "shadow-intensity=\"{shadow}\" exposure=\"{exposure}\" touch-action=\"{touch}\" ",
                "alt=\"{alt}\" {flags}>\n",
                "  <button slot=\"ar-button\" class=\"ar-button\">{button}</button>\n",
                "  <div class=\"viewer-overlay\">\n",
                "    <h2>{name}</h2>\n",
                "    <p>Model ID: {id}</p>\n",
                "  </div>\n",
                "</model-viewer>"
            ),
            src = escape_html(&self.src),
            modes = self.ar_modes_attr(),
            poster = escape_html(&self.poster),
            shadow = self.shadow_intensity,
            exposure = self.exposure,
            touch = self.touch_action,
            alt = escape_html(&self.alt),
            flags = flags.join(" "),
            button = escape_html(self.ar_button_label),
            name = escape_html(&self.overlay.name),
            id = escape_html(&self.overlay.id),
        )
    }
}

/// Info card below the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoPanel {
    pub name: String,
    pub description: String,
    pub badges: Vec<&'static str>,
}

impl InfoPanel {
    pub fn for_model(model: &ModelDescriptor) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
            badges: vec!["AR Compatible", "WebGL 2.0"],
        }
    }
}

/// Status reported by the component's `ar-status` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArStatus {
    NotPresenting,
    SessionStarted,
    ObjectPlaced,
    Failed,
    Other(String),
}

impl ArStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "not-presenting" => ArStatus::NotPresenting,
            "session-started" => ArStatus::SessionStarted,
            "object-placed" => ArStatus::ObjectPlaced,
            "failed" => ArStatus::Failed,
            other => ArStatus::Other(other.to_string()),
        }
    }
}

/// Diagnostic only: nothing in the application reacts to AR status.
pub fn log_ar_status(model_id: &str, status: &ArStatus) {
    match status {
        ArStatus::Failed => log::warn!("[VIEWER] AR session failed for {}", model_id),
        ArStatus::Other(raw) => log::info!("[VIEWER] AR status for {}: {}", model_id, raw),
        known => log::info!("[VIEWER] AR status for {}: {:?}", model_id, known),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
