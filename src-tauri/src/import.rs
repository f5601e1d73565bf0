//! File import adapter: turns a user-picked local file into a model
//! descriptor backed by a transient session URL.
//!
//! Content is not validated here. The format is sniffed only to pick the
//! Content-Type the asset is served with; anything unrecognized is still
//! accepted and left for the viewer component to reject.

use crate::assets::AssetStore;
use crate::catalog::ModelDescriptor;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use uuid::Uuid;

pub const UPLOAD_THUMBNAIL: &str = "https://picsum.photos/seed/custom/200/200";
pub const UPLOAD_DESCRIPTION: &str = "Your own custom-uploaded 3D model.";

/// Extensions offered by the file picker. A hint, not a check.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["glb", "gltf"];

/// Header carrying the percent-encoded filename of a raw upload.
pub const FILE_NAME_HEADER: &str = "x-file-name";

const GLB_MAGIC: &[u8] = b"glTF";

static FINAL_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("extension pattern is valid"));

/// A file chosen by the user: its name and raw bytes.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Glb,
    GltfJson,
    Unknown,
}

impl ModelFormat {
    pub fn sniff(filename: &str, bytes: &[u8]) -> Self {
        if bytes.starts_with(GLB_MAGIC) {
            return ModelFormat::Glb;
        }
        let is_gltf_name = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gltf"));
        let looks_like_json = bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'{');
        if is_gltf_name || looks_like_json {
            ModelFormat::GltfJson
        } else {
            ModelFormat::Unknown
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ModelFormat::Glb => "model/gltf-binary",
            ModelFormat::GltfJson => "model/gltf+json",
            ModelFormat::Unknown => "application/octet-stream",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Picked path has no file name: {0}")]
    NoFileName(String),
}

/// Display name for an upload: the filename without its final extension.
pub fn display_name(filename: &str) -> String {
    FINAL_EXTENSION.replace(filename, "").into_owned()
}

/// Decode the `x-file-name` header value. Malformed escapes leave the raw
/// value in place rather than failing the upload.
pub fn decode_file_name(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|name| name.into_owned())
        .unwrap_or_else(|e| {
            log::warn!("[IMPORT] Undecodable file name {:?}: {}", raw, e);
            raw.to_string()
        })
}

/// Build the descriptor for an upload, registering its bytes with `assets`.
///
/// Always succeeds. Every call yields a fresh id and a fresh URL.
pub fn build_descriptor(file: PickedFile, assets: &mut AssetStore) -> ModelDescriptor {
    let format = ModelFormat::sniff(&file.name, &file.bytes);
    if format == ModelFormat::Unknown {
        log::warn!(
            "[IMPORT] {} is neither GLB nor glTF JSON: passing it to the viewer anyway",
            file.name
        );
    }

    let name = display_name(&file.name);
    let url = assets.create(file.bytes, format.content_type(), &file.name);
    let id = format!("custom-{}", Uuid::new_v4());

    log::info!("[IMPORT] Imported {} as {} ({:?})", file.name, id, format);

    ModelDescriptor {
        id,
        name,
        url,
        thumbnail: UPLOAD_THUMBNAIL.to_string(),
        description: UPLOAD_DESCRIPTION.to_string(),
    }
}

/// Read a file chosen through the native picker.
pub fn read_picked_file(path: &Path) -> Result<PickedFile, ImportError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ImportError::NoFileName(path.display().to_string()))?
        .to_string();
    let bytes = std::fs::read(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(PickedFile { name, bytes })
}
