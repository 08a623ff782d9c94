//! # animstream
//!
//! Chunked binary keyframe-animation assets for 3D scene streams.
//!
//! The crate covers the animation side of a chunk-framed scene format:
//! registering keyframe formats by on-disk type tag, packing keyframes and
//! format custom data into single-allocation [`anim::Animation`] containers,
//! sharing named assets across materials through an
//! [`anim::UvAnimDictionary`], and attaching 8-slot UV interpolator state to
//! material instances via a generic extension mechanism.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (names, errors)
//! - [`chunk`] - Chunk header framing and typed little-endian streams
//! - [`anim`] - Format registry, animation containers, dictionaries
//! - [`material`] - Material hosts and the UV animation extension
//!
//! ## Example
//!
//! ```ignore
//! use animstream::prelude::*;
//! use std::io::Cursor;
//!
//! let registry = InterpolatorRegistry::with_builtin_formats();
//! let mut cursor = Cursor::new(bytes);
//! let mut stream = IStream::new(&mut cursor);
//!
//! stream.find_chunk(ID_UV_ANIM_DICT)?;
//! let dict = UvAnimDictionary::stream_read(&mut stream, &registry)?;
//! if let Some(anim) = dict.find("wave") {
//!     println!("{} frames", anim.num_frames());
//! }
//! ```

pub mod anim;
pub mod chunk;
pub mod material;
pub mod util;

// Re-export commonly used types
pub use anim::{AnimInterpolator, Animation, InterpolatorRegistry, LoadContext, UvAnimDictionary};
pub use util::{AnimName, Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::anim::{
        AnimInterpolator, Animation, HierKeyFrame, InterpolatorInfo, InterpolatorRegistry,
        KeyframeFormat, LoadContext, UvAnimDictionary, UvCustomData, UvKeyFrame,
        TAG_HIERARCHICAL, TAG_UV_LINEAR, TAG_UV_PARAM, UV_CHANNELS,
    };
    pub use crate::chunk::{
        ChunkHeader, IStream, OStream, ID_ANIM_ANIMATION, ID_EXTENSION, ID_STRUCT,
        ID_UV_ANIMATION, ID_UV_ANIM_DICT,
    };
    pub use crate::material::{Material, MaterialPlugins, Plugin, PluginRegistry, UvAnim, UvAnimPlugin};
    pub use crate::util::{AnimName, Error, Result};
}
