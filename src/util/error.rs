//! Error types for the animstream library.

use thiserror::Error;

/// Main error type for animation stream operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Expected chunk type tag absent at the current stream position
    #[error("Chunk not found: expected type tag 0x{expected:X}")]
    ChunkNotFound { expected: u32 },

    /// Animation version marker did not match the current format.
    /// Callers probe for this to fall back to the legacy reader.
    #[error("Unsupported animation version: 0x{0:X}")]
    UnsupportedVersion(i32),

    /// Animation type tag not present in the interpolator registry
    #[error("Unknown animation format: type tag 0x{0:X}")]
    UnknownFormat(i32),

    /// Type tag already registered
    #[error("Duplicate animation format registration: type tag 0x{0:X}")]
    DuplicateFormat(i32),

    /// Stored predecessor index outside the keyframe array
    #[error("Keyframe {frame}: predecessor index {index} out of bounds (frames: {num_frames})")]
    InvalidPrevIndex {
        frame: i32,
        index: i32,
        num_frames: i32,
    },

    /// Negative or otherwise unusable frame count in a stream header
    #[error("Invalid keyframe count: {0}")]
    InvalidFrameCount(i32),

    /// Operation requires a different keyframe format
    #[error("Wrong keyframe format: expected {expected}, got type tag 0x{actual:X}")]
    WrongFormat { expected: &'static str, actual: i32 },

    /// Stream is truncated or corrupted
    #[error("Unexpected end of stream at position {0}")]
    UnexpectedEof(u64),

    /// Invalid data structure in the stream
    #[error("Invalid stream structure: {0}")]
    InvalidStructure(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for animation stream operations.
pub type Result<T> = std::result::Result<T, Error>;
