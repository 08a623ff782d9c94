//! Keyframe format registry.
//!
//! Every animation chunk opens with a type tag identifying its keyframe
//! format. The registry maps tags to format descriptors; stream readers
//! consult it before touching any payload bytes. Registration happens once
//! at setup, before the first read that references a tag.

use smallvec::SmallVec;

use crate::anim::{hierarchy, uv, Animation};
use crate::chunk::{IStream, OStream};
use crate::util::{Error, Result};

/// Type tag of the hierarchical (skeletal) keyframe format. Legacy streams
/// carry no tag and are always read as this format.
pub const TAG_HIERARCHICAL: i32 = 1;

/// Type tag of the linearly interpolated UV-channel format.
pub const TAG_UV_LINEAR: i32 = 0x1C0;

/// Type tag of the parametrized UV-channel format. Shares the linear
/// format's layout and codec; the tags differ only in semantics.
pub const TAG_UV_PARAM: i32 = 0x1C1;

/// The closed set of keyframe interpolation formats.
///
/// Each variant defines its packed keyframe layout and the codec for the
/// data region of an animation payload. Adding a format means adding a
/// variant here and registering a tag for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyframeFormat {
    /// UV-channel offsets: 32-byte keyframes plus named custom data.
    Uv,
    /// Skeletal rotation/translation: 36-byte keyframes, no custom data.
    Hierarchical,
}

impl KeyframeFormat {
    /// Size of one packed keyframe in bytes.
    #[inline]
    pub const fn keyframe_size(self) -> usize {
        match self {
            Self::Uv => std::mem::size_of::<uv::UvKeyFrame>(),
            Self::Hierarchical => std::mem::size_of::<hierarchy::HierKeyFrame>(),
        }
    }

    /// Size of the format's custom-data region in bytes.
    #[inline]
    pub const fn custom_data_size(self) -> usize {
        match self {
            Self::Uv => std::mem::size_of::<uv::UvCustomData>(),
            Self::Hierarchical => 0,
        }
    }

    /// Human-readable format name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uv => "uv",
            Self::Hierarchical => "hierarchical",
        }
    }

    /// Populate `anim`'s keyframe and custom-data regions from the stream.
    pub fn read_data(self, stream: &mut IStream<'_>, anim: &mut Animation) -> Result<()> {
        match self {
            Self::Uv => uv::read_data(stream, anim),
            Self::Hierarchical => hierarchy::read_data(stream, anim),
        }
    }

    /// Write `anim`'s keyframe and custom-data regions to the stream.
    pub fn write_data(self, stream: &mut OStream<'_>, anim: &Animation) -> Result<()> {
        match self {
            Self::Uv => uv::write_data(stream, anim),
            Self::Hierarchical => hierarchy::write_data(stream, anim),
        }
    }

    /// Exact byte count `write_data` will produce for `anim`.
    pub fn data_size(self, anim: &Animation) -> u32 {
        match self {
            Self::Uv => uv::data_size(anim),
            Self::Hierarchical => hierarchy::data_size(anim),
        }
    }
}

/// A registered keyframe format: on-disk type tag plus format descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpolatorInfo {
    /// On-disk type tag.
    pub type_tag: i32,
    /// Keyframe format selected by the tag.
    pub format: KeyframeFormat,
}

impl InterpolatorInfo {
    /// Size of one packed keyframe in bytes.
    #[inline]
    pub const fn keyframe_size(&self) -> usize {
        self.format.keyframe_size()
    }

    /// Size of the custom-data region in bytes.
    #[inline]
    pub const fn custom_data_size(&self) -> usize {
        self.format.custom_data_size()
    }
}

/// Table of registered keyframe formats, looked up by type tag.
#[derive(Clone, Debug, Default)]
pub struct InterpolatorRegistry {
    entries: SmallVec<[InterpolatorInfo; 10]>,
}

impl InterpolatorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in formats: hierarchical plus
    /// both UV tags.
    pub fn with_builtin_formats() -> Self {
        Self {
            entries: SmallVec::from_slice(&[
                InterpolatorInfo {
                    type_tag: TAG_HIERARCHICAL,
                    format: KeyframeFormat::Hierarchical,
                },
                InterpolatorInfo {
                    type_tag: TAG_UV_LINEAR,
                    format: KeyframeFormat::Uv,
                },
                InterpolatorInfo {
                    type_tag: TAG_UV_PARAM,
                    format: KeyframeFormat::Uv,
                },
            ]),
        }
    }

    /// Register a format. Re-registering a tag is a configuration error.
    pub fn register(&mut self, info: InterpolatorInfo) -> Result<()> {
        if self.find(info.type_tag).is_some() {
            return Err(Error::DuplicateFormat(info.type_tag));
        }
        self.entries.push(info);
        Ok(())
    }

    /// Look up a format by type tag. Absence is the normal outcome for an
    /// unknown or unsupported animation type.
    pub fn find(&self, type_tag: i32) -> Option<&InterpolatorInfo> {
        self.entries.iter().find(|e| e.type_tag == type_tag)
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = InterpolatorRegistry::with_builtin_formats();
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.find(TAG_HIERARCHICAL).unwrap().format,
            KeyframeFormat::Hierarchical
        );
        assert_eq!(registry.find(TAG_UV_LINEAR).unwrap().format, KeyframeFormat::Uv);
        assert_eq!(registry.find(TAG_UV_PARAM).unwrap().format, KeyframeFormat::Uv);
        assert!(registry.find(0x1C2).is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = InterpolatorRegistry::with_builtin_formats();
        let err = registry
            .register(InterpolatorInfo {
                type_tag: TAG_UV_LINEAR,
                format: KeyframeFormat::Uv,
            })
            .unwrap_err();
        assert!(matches!(err, crate::util::Error::DuplicateFormat(t) if t == TAG_UV_LINEAR));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(KeyframeFormat::Uv.keyframe_size(), 32);
        assert_eq!(KeyframeFormat::Uv.custom_data_size(), 64);
        assert_eq!(KeyframeFormat::Hierarchical.keyframe_size(), 36);
        assert_eq!(KeyframeFormat::Hierarchical.custom_data_size(), 0);
    }
}
