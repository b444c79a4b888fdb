//! Model file parsing.
//!
//! A model file is a submesh count, a reserved 64-byte header block, and
//! then that many submesh records back to back. Records carry no offsets,
//! so they must be read strictly in order; an error partway through aborts
//! the whole parse.

mod submesh;

pub use submesh::{
    Geometry, ImportFlags, MaterialParams, MaterialType, SubMesh, SubMeshKind, TextureRefs,
};

use serde::Serialize;

use crate::error::Result;
use crate::reader::Reader;

/// Byte length of the reserved header block after the submesh count.
const HEADER_RESERVED: usize = 0x40;

/// Minimum encoded size of one submesh record (fixed fields, empty body).
const MIN_RECORD_SIZE: usize = 228;

/// A decoded model file: an ordered sequence of submeshes.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    /// Model name, derived from the source file's base name.
    pub name: String,
    pub submeshes: Vec<SubMesh>,
}

impl Model {
    /// Submeshes that carry geometry.
    pub fn renderable_submeshes(&self) -> impl Iterator<Item = &SubMesh> {
        self.submeshes.iter().filter(|s| s.geometry.is_some())
    }
}

/// Parse a model file from bytes.
///
/// `name` becomes the model's display name; when loading from a path, pass
/// the file stem. The input buffer is only borrowed for the duration of the
/// call; the returned model owns all of its data.
pub fn parse_model(name: impl Into<String>, bytes: &[u8]) -> Result<Model> {
    let mut reader = Reader::new(bytes);

    let submesh_count = reader.read_u32()? as usize;
    reader.skip(HEADER_RESERVED)?;

    // Cap the reservation by what the buffer can hold so a bogus count
    // fails on a read instead of an allocation.
    let mut submeshes =
        Vec::with_capacity(submesh_count.min(reader.remaining() / MIN_RECORD_SIZE + 1));
    for _ in 0..submesh_count {
        submeshes.push(SubMesh::read(&mut reader)?);
    }

    Ok(Model {
        name: name.into(),
        submeshes,
    })
}
