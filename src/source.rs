//! Texture byte lookup.
//!
//! Model records reference textures by base name only; where the bytes come
//! from (a directory, an archive, a cache) is the host's concern. The
//! decoder core takes names, a [`TextureSource`] resolves them.

use std::path::PathBuf;

use crate::error::Result;

/// Maps a texture base name to raw file bytes.
pub trait TextureSource {
    /// Fetch the bytes for `base_name`, or `Ok(None)` if the texture does
    /// not exist in this source.
    fn load(&self, base_name: &str) -> Result<Option<Vec<u8>>>;
}

/// A source reading `<root>/<base_name>.TM` from disk.
#[derive(Debug, Clone)]
pub struct DirectoryTextureSource {
    root: PathBuf,
}

impl DirectoryTextureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextureSource for DirectoryTextureSource {
    fn load(&self, base_name: &str) -> Result<Option<Vec<u8>>> {
        if base_name.is_empty() {
            return Ok(None);
        }
        let path = self.root.join(format!("{base_name}.TM"));
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_source_reads_tm_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("WOOD01.TM"), [1, 2, 3]).unwrap();

        let source = DirectoryTextureSource::new(dir.path());
        assert_eq!(source.load("WOOD01").unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(source.load("MISSING").unwrap(), None);
        assert_eq!(source.load("").unwrap(), None);
    }
}
