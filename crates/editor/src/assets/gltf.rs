//! glTF container inspection. Decoding geometry is the renderer's
//! job; the resolver only needs to know the file is a usable glTF 2.0 asset
//! and which sub-meshes it contains.

use crate::error::AssetError;

/// Required extensions the external renderer handles without an extra decoder
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "KHR_materials_unlit",
    "KHR_texture_transform",
    "KHR_mesh_quantization",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Glb,
    Gltf,
    /// Decoded by the host; only mesh names are known
    Host,
}

/// What the resolver learns from a model file
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub format: ModelFormat,
    pub mesh_names: Vec<String>,
}

impl ModelInfo {
    pub fn from_host(mesh_names: Vec<String>) -> Self {
        Self {
            format: ModelFormat::Host,
            mesh_names,
        }
    }
}

fn decode_err(path: &str, reason: impl Into<String>) -> AssetError {
    AssetError::Decode {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Inspect a `.glb` or `.gltf` file.
pub fn inspect(path: &str, bytes: &[u8]) -> Result<ModelInfo, AssetError> {
    let format = if bytes.starts_with(b"glTF") {
        ModelFormat::Glb
    } else {
        ModelFormat::Gltf
    };

    // Unsupported required extensions are reported as MissingDecoder below
    let root = ::gltf::Gltf::from_slice_without_validation(bytes)
        .map_err(|e| decode_err(path, e.to_string()))?
        .document
        .into_json();

    if !root.asset.version.starts_with('2') {
        return Err(decode_err(
            path,
            format!("unsupported glTF version {}", root.asset.version),
        ));
    }

    if let Some(ext) = root
        .extensions_required
        .iter()
        .find(|e| !SUPPORTED_EXTENSIONS.contains(&e.as_str()))
    {
        return Err(AssetError::MissingDecoder {
            path: path.to_string(),
            extension: ext.clone(),
        });
    }

    let mesh_names = root
        .meshes
        .iter()
        .enumerate()
        .map(|(i, m)| m.name.clone().unwrap_or_else(|| format!("mesh_{i}")))
        .collect();

    Ok(ModelInfo { format, mesh_names })
}

#[cfg(test)]
pub(crate) fn make_glb(json: &str) -> Vec<u8> {
    const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
    const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
    const GLB_HEADER_LEN: usize = 12;
    const CHUNK_HEADER_LEN: usize = 8;

    let mut chunk = json.as_bytes().to_vec();
    while chunk.len() % 4 != 0 {
        chunk.push(b' ');
    }
    let total = GLB_HEADER_LEN + CHUNK_HEADER_LEN + chunk.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&chunk);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"asset":{"version":"2.0"},"meshes":[{"name":"frame","primitives":[]},{"primitives":[]}]}"#;

    #[test]
    fn inspects_glb() {
        let info = inspect("bed.glb", &make_glb(DOC)).unwrap();
        assert_eq!(info.format, ModelFormat::Glb);
        assert_eq!(info.mesh_names, vec!["frame".to_string(), "mesh_1".to_string()]);
    }

    #[test]
    fn inspects_plain_gltf() {
        let info = inspect("bed.gltf", DOC.as_bytes()).unwrap();
        assert_eq!(info.format, ModelFormat::Gltf);
        assert_eq!(info.mesh_names.len(), 2);
    }

    #[test]
    fn draco_requires_decoder() {
        let doc = r#"{"asset":{"version":"2.0"},"extensionsRequired":["KHR_draco_mesh_compression"]}"#;
        let err = inspect("sofa.glb", &make_glb(doc)).unwrap_err();
        assert!(matches!(err, AssetError::MissingDecoder { ref extension, .. } if extension == "KHR_draco_mesh_compression"));
    }

    #[test]
    fn garbage_is_decode_error() {
        let err = inspect("x.glb", b"\x00\x01\x02\x03not a model").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn truncated_glb() {
        let mut bytes = make_glb(DOC);
        bytes.truncate(16);
        assert!(matches!(inspect("x.glb", &bytes), Err(AssetError::Decode { .. })));
    }

    #[test]
    fn wrong_version() {
        let doc = r#"{"asset":{"version":"1.0"}}"#;
        assert!(matches!(inspect("x.gltf", doc.as_bytes()), Err(AssetError::Decode { .. })));
    }
}
