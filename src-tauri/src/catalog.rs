//! Preset model catalog: static registry of the bundled 3D models.
//!
//! Presets are created once at process start, never mutated and never
//! destroyed. Uploaded models are not part of the catalog; they are built
//! by the import adapter and only ever live as the current selection.

use serde::{Deserialize, Serialize};

/// Application title shown in the header.
pub const APP_TITLE: &str = "VisionAR";

/// Describes one viewable 3D asset.
///
/// Serialized in camelCase for the webview. All fields are owned so that
/// presets and synthesized upload descriptors share one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub url: String,
    pub thumbnail: String,
    pub description: String,
}

/// Compile-time preset entry. Converted to a [`ModelDescriptor`] on demand.
#[derive(Debug, Clone, Copy)]
pub struct PresetModel {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub thumbnail: &'static str,
    pub description: &'static str,
}

impl PresetModel {
    pub fn descriptor(&self) -> ModelDescriptor {
        ModelDescriptor {
            id: self.id.to_string(),
            name: self.name.to_string(),
            url: self.url.to_string(),
            thumbnail: self.thumbnail.to_string(),
            description: self.description.to_string(),
        }
    }
}

static PRESETS: &[PresetModel] = &[
    PresetModel {
        id: "cube",
        name: "Geometric Cube",
        url: "https://modelviewer.dev/shared-assets/models/box_with_materials.glb",
        thumbnail: "https://picsum.photos/seed/cube1/200/200",
        description: "A standard 3D cube with basic material properties, ideal for testing spatial dimensions.",
    },
    PresetModel {
        id: "sphere",
        name: "Abstract Sphere",
        url: "https://modelviewer.dev/shared-assets/models/glTF-Sample-Assets/Models/DamagedHelmet/glTF-Binary/DamagedHelmet.glb",
        thumbnail: "https://picsum.photos/seed/sphere1/200/200",
        description: "A detailed spherical model demonstrating complex textures and PBR materials.",
    },
    PresetModel {
        id: "cylinder",
        name: "Industrial Cylinder",
        url: "https://modelviewer.dev/shared-assets/models/glTF-Sample-Assets/Models/ToyCar/glTF-Binary/ToyCar.glb",
        thumbnail: "https://picsum.photos/seed/car1/200/200",
        description: "A high-fidelity mechanical model used to demonstrate complex 3D geometry in AR.",
    },
];

/// All preset models, in display order.
pub fn presets() -> &'static [PresetModel] {
    PRESETS
}

/// The model shown at startup.
pub fn default_preset() -> &'static PresetModel {
    &PRESETS[0] // cube
}

/// Look up a preset by ID.
pub fn find_preset(id: &str) -> Option<&'static PresetModel> {
    PRESETS.iter().find(|m| m.id == id)
}

/// Preset descriptors as owned values, for the frontend list.
pub fn preset_descriptors() -> Vec<ModelDescriptor> {
    PRESETS.iter().map(PresetModel::descriptor).collect()
}
