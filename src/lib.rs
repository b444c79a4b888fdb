//! # aim-decoder
//!
//! A Rust library for decoding a legacy 3D engine's asset containers into
//! renderer-agnostic data.
//!
//! ## Overview
//!
//! Two independent decoders and a small classification helper:
//!
//! - the **model parser** reads a `.model` file into a sequence of submesh
//!   records (geometry, material parameters, texture references);
//! - the **texture codec** reads a `.TM` block-compressed texture into an
//!   RGBA8 pixel buffer, decoding the DXT-style 4x4 blocks from first
//!   principles;
//! - the **classifier** maps submesh display names to visibility and
//!   level-of-detail answers for import policy.
//!
//! The decoders never call each other and hold no shared state: every call
//! borrows one byte buffer and returns a fully owned result, so decodes may
//! run in parallel over distinct buffers without coordination.
//!
//! ## Quick Start
//!
//! ```ignore
//! use aim_decoder::{load_model, decode_texture, DirectoryTextureSource, TextureSource};
//!
//! let model = load_model("data/MOD_BARN.model")?;
//! let textures = DirectoryTextureSource::new("data/textures");
//!
//! for submesh in model.renderable_submeshes() {
//!     if let Some(bytes) = textures.load(&submesh.texture_refs.albedo)? {
//!         let texture = decode_texture(&bytes)?;
//!         println!("{}: {}x{}", submesh.name, texture.width, texture.height);
//!     }
//! }
//! ```

pub mod classify;
pub mod error;
pub mod import;
pub mod model;
pub mod reader;
pub mod source;
pub mod texture;

// Re-export main types for convenience
pub use classify::{classify, Classification};
pub use error::{DecodeError, Result};
pub use import::{DefaultProcessor, ImportProcessor, ProcessorRegistry};
pub use model::{
    parse_model, Geometry, ImportFlags, MaterialParams, MaterialType, Model, SubMesh, SubMeshKind,
    TextureRefs,
};
pub use source::{DirectoryTextureSource, TextureSource};
pub use texture::normal::derive_normal_map;
pub use texture::{decode_texture, DecodedTexture};

use std::path::Path;

/// Load and parse a model file from a path.
///
/// The model name is the file's base name, trimmed.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;
    parse_model(name, &bytes)
}

/// Load and decode a compressed texture file from a path.
pub fn load_texture<P: AsRef<Path>>(path: P) -> Result<DecodedTexture> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_texture(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_model_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MOD_TEST.model");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 0x40]);
        std::fs::write(&path, &bytes).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.name, "MOD_TEST");
        assert!(model.submeshes.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_model("/nonexistent/NOPE.model").unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }

    /// Full pipeline: parse a model, apply import policy, resolve and decode
    /// the albedo texture of every renderable submesh.
    #[test]
    fn test_model_to_texture_pipeline() {
        use crate::model::testutil as model_bytes_util;
        use crate::texture::testutil::{solid_block, texture_bytes};

        let dir = tempfile::tempdir().unwrap();

        // A 4x4 solid white texture referenced by the record below.
        std::fs::write(
            dir.path().join("WOOD01.TM"),
            texture_bytes(4, 4, &[solid_block(0xFFFF)]),
        )
        .unwrap();

        // One renderable submesh (single degenerate triangle) and one
        // collision shape without geometry.
        let mut body = model_bytes_util::body_prefix(0, 1);
        body.extend_from_slice(&1u32.to_le_bytes());
        body.extend_from_slice(&3u32.to_le_bytes());
        model_bytes_util::push_vertex(
            &mut body,
            &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        );
        for index in [0u16, 0, 0] {
            body.extend_from_slice(&index.to_le_bytes());
        }

        let visible = model_bytes_util::RecordBuilder::new("BODY")
            .albedo("WOOD01")
            .body(body)
            .build();
        let shape = model_bytes_util::RecordBuilder::new("SHAPE")
            .kind(1)
            .body(model_bytes_util::body_prefix(0, 0))
            .build();
        let bytes = model_bytes_util::model_bytes(&[visible, shape]);

        let mut model = parse_model("MOD_TEST", &bytes).unwrap();

        let registry = ProcessorRegistry::with_default();
        assert!(registry.apply("default", &mut model.submeshes));
        assert_eq!(model.submeshes[0].import_flags, ImportFlags::VISUAL);
        assert!(model.submeshes[1].import_flags.is_empty());

        let textures = DirectoryTextureSource::new(dir.path());
        let mut decoded = 0;
        for submesh in model.renderable_submeshes() {
            let bytes = textures
                .load(&submesh.texture_refs.albedo)
                .unwrap()
                .expect("texture present");
            let texture = decode_texture(&bytes).unwrap();
            assert_eq!((texture.width, texture.height), (4, 4));
            assert!(!texture.has_alpha);
            decoded += 1;
        }
        assert_eq!(decoded, 1);
    }
}
