//! Chunk format constants.

/// Size of a chunk header in bytes: type tag + payload size + stamp.
pub const CHUNK_HEADER_SIZE: u32 = 12;

/// Struct sub-chunk: raw fields of the enclosing object.
pub const ID_STRUCT: u32 = 0x0001;

/// Extension chunk: framed plugin sub-chunks trailing an object.
pub const ID_EXTENSION: u32 = 0x0003;

/// A single framed animation asset.
pub const ID_ANIM_ANIMATION: u32 = 0x001B;

/// A named dictionary of animation assets.
pub const ID_UV_ANIM_DICT: u32 = 0x002B;

/// Per-material UV animation extension data.
pub const ID_UV_ANIMATION: u32 = 0x0135;

/// Version marker opening every current-format animation payload.
/// Legacy streams carry no marker; a mismatch here is how they are detected.
pub const ANIM_VERSION: i32 = 0x100;

/// Library stamp written into the third header field. Ignored on read.
pub const LIBRARY_STAMP: u32 = 0x0001_0000;

/// Fixed header contribution of an animation payload:
/// version, type tag, frame count, flags, duration.
pub const ANIM_HEADER_SIZE: u32 = 20;
