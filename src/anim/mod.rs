//! Animation assets: format registry, packed containers, dictionaries.
//!
//! The layers build bottom-up:
//! - [`registry`] - type tags and the closed set of keyframe formats
//! - [`animation`] - the packed [`Animation`] container and stream protocol
//! - [`uv`] / [`hierarchy`] - the concrete format codecs
//! - [`dictionary`] - named sharing of assets across owners

mod animation;
mod dictionary;
pub mod hierarchy;
mod registry;
pub mod uv;

pub use animation::{AnimInterpolator, Animation};
pub use dictionary::{LoadContext, UvAnimDictionary};
pub use hierarchy::HierKeyFrame;
pub use registry::{
    InterpolatorInfo, InterpolatorRegistry, KeyframeFormat, TAG_HIERARCHICAL, TAG_UV_LINEAR,
    TAG_UV_PARAM,
};
pub use uv::{UvCustomData, UvKeyFrame, UV_CHANNELS};
