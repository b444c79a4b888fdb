//! Little-endian byte cursor shared by the model parser and texture codec.
//!
//! Both file formats are sequences of fixed-width little-endian fields with
//! no self-describing framing, so everything is built on a plain cursor over
//! a borrowed byte slice. A failed read reports the absolute offset and is
//! fatal to the whole decode call; there is no resynchronization.

use crate::error::{DecodeError, Result};

/// Sequential reader over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Consume `count` bytes and return them as a slice.
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(DecodeError::TruncatedInput {
                offset: self.pos,
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Consume and discard `count` bytes (reserved fields).
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a fixed-width NUL-padded ASCII field.
    ///
    /// The value is the substring up to the first zero byte, or the full
    /// field if none is found. Non-ASCII bytes are replaced rather than
    /// rejected; name fields in shipped files are plain ASCII.
    pub fn read_fixed_str(&mut self, width: usize) -> Result<String> {
        let raw = self.take(width)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    /// Read four consecutive f32 values as an RGBA color.
    pub fn read_rgba_f32(&mut self) -> Result<[f32; 4]> {
        Ok([
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_str_nul_terminated() {
        let mut field = vec![0u8; 32];
        field[..3].copy_from_slice(b"ABC");
        let mut reader = Reader::new(&field);
        assert_eq!(reader.read_fixed_str(32).unwrap(), "ABC");
        assert_eq!(reader.position(), 32);
    }

    #[test]
    fn test_read_fixed_str_full_width() {
        let field = [b'X'; 32];
        let mut reader = Reader::new(&field);
        assert_eq!(reader.read_fixed_str(32).unwrap(), "X".repeat(32));
    }

    #[test]
    fn test_scalar_reads_little_endian() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3F];
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 1);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncated_read_reports_offset() {
        let bytes = [0u8; 6];
        let mut reader = Reader::new(&bytes);
        reader.skip(4).unwrap();
        let err = reader.read_u32().unwrap_err();
        match err {
            crate::DecodeError::TruncatedInput {
                offset,
                needed,
                remaining,
            } => {
                assert_eq!(offset, 4);
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_rgba_f32() {
        let mut bytes = Vec::new();
        for v in [1.0f32, 0.5, 0.25, 0.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_rgba_f32().unwrap(), [1.0, 0.5, 0.25, 0.0]);
    }
}
