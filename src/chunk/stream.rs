//! Position-tracked binary streams and chunk header framing.
//!
//! Every framed payload in a scene stream is preceded by a 12-byte chunk
//! header carrying a type tag, the payload size in bytes (the header itself
//! is never counted), and a library stamp. [`IStream::find_chunk`] walks
//! forward over chunks it does not care about by their declared size, which
//! is why declared sizes must exactly match the bytes written.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::format::LIBRARY_STAMP;
use crate::util::{Error, Result};

/// A parsed chunk header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Semantic kind of the payload.
    pub type_tag: u32,
    /// Payload size in bytes, excluding this header.
    pub size: u32,
    /// Library stamp. Written as [`LIBRARY_STAMP`], ignored on read.
    pub stamp: u32,
}

/// Input stream for reading chunked scene data.
pub struct IStream<'a> {
    inner: &'a mut dyn Read,
    pos: u64,
}

impl<'a> IStream<'a> {
    /// Wrap a byte source.
    pub fn new(inner: &'a mut dyn Read) -> Self {
        Self { inner, pos: 0 }
    }

    /// Current read position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    fn map_eof(&self, e: io::Error) -> Error {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof(self.pos)
        } else {
            Error::Io(e)
        }
    }

    /// Read an i32 value (little-endian).
    pub fn read_i32(&mut self) -> Result<i32> {
        let v = self
            .inner
            .read_i32::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.pos += 4;
        Ok(v)
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        let v = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.pos += 4;
        Ok(v)
    }

    /// Read an f32 value (little-endian).
    pub fn read_f32(&mut self) -> Result<f32> {
        let v = self
            .inner
            .read_f32::<LittleEndian>()
            .map_err(|e| self.map_eof(e))?;
        self.pos += 4;
        Ok(v)
    }

    /// Fill `buf` exactly.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(|e| self.map_eof(e))?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    /// Discard `n` bytes.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let copied = io::copy(&mut (&mut *self.inner).take(n), &mut io::sink())?;
        self.pos += copied;
        if copied < n {
            return Err(Error::UnexpectedEof(self.pos));
        }
        Ok(())
    }

    /// Read the chunk header at the current position.
    pub fn read_chunk_header(&mut self) -> Result<ChunkHeader> {
        Ok(ChunkHeader {
            type_tag: self.read_u32()?,
            size: self.read_u32()?,
            stamp: self.read_u32()?,
        })
    }

    /// Scan forward for a chunk with the given type tag, skipping any other
    /// chunks by their declared size. Running out of stream is reported as
    /// [`Error::ChunkNotFound`], the normal "chunk absent" outcome.
    pub fn find_chunk(&mut self, type_tag: u32) -> Result<ChunkHeader> {
        loop {
            let header = match self.read_chunk_header() {
                Ok(h) => h,
                Err(Error::UnexpectedEof(_)) => {
                    return Err(Error::ChunkNotFound { expected: type_tag })
                }
                Err(e) => return Err(e),
            };
            if header.type_tag == type_tag {
                return Ok(header);
            }
            self.skip(u64::from(header.size))?;
        }
    }
}

/// Output stream for writing chunked scene data.
pub struct OStream<'a> {
    inner: &'a mut dyn Write,
    pos: u64,
}

impl<'a> OStream<'a> {
    /// Wrap a byte sink.
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner, pos: 0 }
    }

    /// Current write position.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Write an i32 value (little-endian).
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.inner.write_i32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.inner.write_u32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write an f32 value (little-endian).
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.inner.write_f32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    /// Write a chunk header announcing `size` payload bytes.
    pub fn write_chunk_header(&mut self, type_tag: u32, size: u32) -> Result<()> {
        self.write_u32(type_tag)?;
        self.write_u32(size)?;
        self.write_u32(LIBRARY_STAMP)?;
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
