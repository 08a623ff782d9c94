//! Generic animation container and its stream protocol.
//!
//! An [`Animation`] owns a single packed allocation holding the keyframe
//! array followed immediately by the format's custom data. The container
//! itself only knows the region split; reading and writing the regions is
//! delegated to the keyframe format selected by the type tag.

use std::fmt;
use std::rc::Rc;

use crate::anim::hierarchy::{self, HierKeyFrame};
use crate::anim::registry::{InterpolatorInfo, InterpolatorRegistry, KeyframeFormat, TAG_HIERARCHICAL};
use crate::anim::uv::{UvCustomData, UvKeyFrame};
use crate::chunk::{IStream, OStream, ANIM_HEADER_SIZE, ANIM_VERSION, ID_ANIM_ANIMATION};
use crate::util::{AnimName, Error, Result};

/// A keyframe animation asset.
///
/// Keyframes and custom data share one allocation; the custom-data region
/// begins exactly at `num_frames * keyframe_size` bytes. The allocation is
/// owned exclusively by the container and released once, on drop. Sharing
/// between owners goes through [`Rc<Animation>`] handles.
pub struct Animation {
    info: InterpolatorInfo,
    num_frames: i32,
    flags: i32,
    duration: f32,
    // Word-sized backing keeps both packed regions 4-byte aligned for the
    // POD casts; every region size in the format is a multiple of 4.
    data: Box<[u32]>,
}

impl Animation {
    /// Allocate a container for `num_frames` keyframes of the given format.
    ///
    /// Both regions start zeroed; populating them is the format codec's
    /// responsibility.
    pub fn new(info: InterpolatorInfo, num_frames: i32, flags: i32, duration: f32) -> Result<Self> {
        if num_frames < 0 {
            return Err(Error::InvalidFrameCount(num_frames));
        }
        let bytes = num_frames as usize * info.keyframe_size() + info.custom_data_size();
        debug_assert_eq!(bytes % 4, 0);
        Ok(Self {
            info,
            num_frames,
            flags,
            duration,
            data: vec![0u32; bytes / 4].into_boxed_slice(),
        })
    }

    /// The registered format descriptor this animation was built with.
    #[inline]
    pub fn info(&self) -> &InterpolatorInfo {
        &self.info
    }

    /// On-disk type tag.
    #[inline]
    pub fn type_tag(&self) -> i32 {
        self.info.type_tag
    }

    /// Keyframe format.
    #[inline]
    pub fn format(&self) -> KeyframeFormat {
        self.info.format
    }

    /// Number of keyframes.
    #[inline]
    pub fn num_frames(&self) -> i32 {
        self.num_frames
    }

    /// Format-specific flag bits.
    #[inline]
    pub fn flags(&self) -> i32 {
        self.flags
    }

    /// Total animation duration in seconds.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    fn keyframe_len(&self) -> usize {
        self.num_frames as usize * self.info.keyframe_size()
    }

    /// The packed keyframe region.
    pub fn keyframe_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.data)[..self.keyframe_len()]
    }

    /// The custom-data region, beginning right after the last keyframe.
    pub fn custom_data_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.data)[self.keyframe_len()..]
    }

    /// Both regions, mutably.
    pub(crate) fn regions_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        let split = self.keyframe_len();
        bytemuck::cast_slice_mut(&mut self.data).split_at_mut(split)
    }

    /// UV keyframes, if this is a UV-format animation.
    pub fn uv_frames(&self) -> Option<&[UvKeyFrame]> {
        match self.info.format {
            KeyframeFormat::Uv => Some(bytemuck::cast_slice(self.keyframe_bytes())),
            _ => None,
        }
    }

    /// Mutable UV keyframes, if this is a UV-format animation.
    pub fn uv_frames_mut(&mut self) -> Option<&mut [UvKeyFrame]> {
        match self.info.format {
            KeyframeFormat::Uv => Some(bytemuck::cast_slice_mut(self.regions_mut().0)),
            _ => None,
        }
    }

    /// UV custom data, if this is a UV-format animation.
    pub fn uv_custom(&self) -> Option<&UvCustomData> {
        match self.info.format {
            KeyframeFormat::Uv => Some(bytemuck::from_bytes(self.custom_data_bytes())),
            _ => None,
        }
    }

    /// Mutable UV custom data, if this is a UV-format animation.
    pub fn uv_custom_mut(&mut self) -> Option<&mut UvCustomData> {
        match self.info.format {
            KeyframeFormat::Uv => Some(bytemuck::from_bytes_mut(self.regions_mut().1)),
            _ => None,
        }
    }

    /// Hierarchical keyframes, if this is a skeletal animation.
    pub fn hier_frames(&self) -> Option<&[HierKeyFrame]> {
        match self.info.format {
            KeyframeFormat::Hierarchical => Some(bytemuck::cast_slice(self.keyframe_bytes())),
            _ => None,
        }
    }

    /// Mutable hierarchical keyframes, if this is a skeletal animation.
    pub fn hier_frames_mut(&mut self) -> Option<&mut [HierKeyFrame]> {
        match self.info.format {
            KeyframeFormat::Hierarchical => {
                Some(bytemuck::cast_slice_mut(self.regions_mut().0))
            }
            _ => None,
        }
    }

    /// The asset name, for formats that carry one in their custom data.
    pub fn name(&self) -> Option<AnimName> {
        self.uv_custom().map(|c| c.name)
    }

    /// Read a current-format animation. The caller has already consumed the
    /// enclosing chunk header.
    ///
    /// A version-marker mismatch fails with [`Error::UnsupportedVersion`],
    /// which callers probe for to fall back to [`Self::stream_read_legacy`].
    pub fn stream_read(
        stream: &mut IStream<'_>,
        registry: &InterpolatorRegistry,
    ) -> Result<Animation> {
        let version = stream.read_i32()?;
        if version != ANIM_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }
        let type_tag = stream.read_i32()?;
        let info = *registry
            .find(type_tag)
            .ok_or(Error::UnknownFormat(type_tag))?;
        let num_frames = stream.read_i32()?;
        let flags = stream.read_i32()?;
        let duration = stream.read_f32()?;
        let mut anim = Animation::new(info, num_frames, flags, duration)?;
        info.format.read_data(stream, &mut anim)?;
        Ok(anim)
    }

    /// Read a legacy animation: no version marker, no type tag, always the
    /// hierarchical format.
    pub fn stream_read_legacy(
        stream: &mut IStream<'_>,
        registry: &InterpolatorRegistry,
    ) -> Result<Animation> {
        let info = *registry
            .find(TAG_HIERARCHICAL)
            .ok_or(Error::UnknownFormat(TAG_HIERARCHICAL))?;
        if info.format != KeyframeFormat::Hierarchical {
            return Err(Error::WrongFormat {
                expected: "hierarchical",
                actual: info.type_tag,
            });
        }
        let num_frames = stream.read_i32()?;
        let flags = stream.read_i32()?;
        let duration = stream.read_f32()?;
        let mut anim = Animation::new(info, num_frames, flags, duration)?;
        hierarchy::read_data(stream, &mut anim)?;
        Ok(anim)
    }

    /// Write the animation as a framed chunk. The declared size is exactly
    /// the payload [`Self::stream_size`] produces.
    pub fn stream_write(&self, stream: &mut OStream<'_>) -> Result<()> {
        stream.write_chunk_header(ID_ANIM_ANIMATION, self.stream_size())?;
        stream.write_i32(ANIM_VERSION)?;
        stream.write_i32(self.info.type_tag)?;
        stream.write_i32(self.num_frames)?;
        stream.write_i32(self.flags)?;
        stream.write_f32(self.duration)?;
        self.info.format.write_data(stream, self)
    }

    /// Write the animation in the legacy encoding: header fields and fixed
    /// hierarchical records, no chunk framing, marker, or tag.
    pub fn stream_write_legacy(&self, stream: &mut OStream<'_>) -> Result<()> {
        if self.info.format != KeyframeFormat::Hierarchical {
            return Err(Error::WrongFormat {
                expected: "hierarchical",
                actual: self.info.type_tag,
            });
        }
        stream.write_i32(self.num_frames)?;
        stream.write_i32(self.flags)?;
        stream.write_f32(self.duration)?;
        hierarchy::write_data(stream, self)
    }

    /// Exact payload byte count of [`Self::stream_write`].
    pub fn stream_size(&self) -> u32 {
        ANIM_HEADER_SIZE + self.info.format.data_size(self)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("type_tag", &self.info.type_tag)
            .field("format", &self.info.format)
            .field("num_frames", &self.num_frames)
            .field("flags", &self.flags)
            .field("duration", &self.duration)
            .field("name", &self.name())
            .finish()
    }
}

/// A lightweight handle to a shared animation asset.
///
/// Cloning the handle is the reference-count increment; dropping the last
/// handle destroys the animation exactly once.
#[derive(Clone, Debug)]
pub struct AnimInterpolator {
    anim: Rc<Animation>,
}

impl AnimInterpolator {
    /// Wrap a shared animation.
    pub fn new(anim: Rc<Animation>) -> Self {
        Self { anim }
    }

    /// The referenced animation.
    #[inline]
    pub fn anim(&self) -> &Rc<Animation> {
        &self.anim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::registry::{TAG_UV_LINEAR, TAG_UV_PARAM};
    use std::io::Cursor;

    fn uv_info(registry: &InterpolatorRegistry) -> InterpolatorInfo {
        *registry.find(TAG_UV_LINEAR).unwrap()
    }

    #[test]
    fn test_packed_region_split() {
        let registry = InterpolatorRegistry::with_builtin_formats();
        let anim = Animation::new(uv_info(&registry), 3, 0, 1.0).unwrap();

        assert_eq!(anim.keyframe_bytes().len(), 3 * 32);
        assert_eq!(anim.custom_data_bytes().len(), 64);

        // Custom data begins immediately after the keyframe region.
        let kf_end = anim.keyframe_bytes().as_ptr() as usize + anim.keyframe_bytes().len();
        assert_eq!(anim.custom_data_bytes().as_ptr() as usize, kf_end);
    }

    #[test]
    fn test_negative_frame_count() {
        let registry = InterpolatorRegistry::with_builtin_formats();
        let err = Animation::new(uv_info(&registry), -1, 0, 1.0).unwrap_err();
        assert!(matches!(err, Error::InvalidFrameCount(-1)));
    }

    #[test]
    fn test_version_mismatch() {
        let mut buf = Vec::new();
        {
            let mut out = OStream::new(&mut buf);
            out.write_i32(0x99).unwrap();
        }
        let registry = InterpolatorRegistry::with_builtin_formats();
        let mut cur = Cursor::new(buf);
        let mut input = IStream::new(&mut cur);
        let err = Animation::stream_read(&mut input, &registry).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(0x99)));
    }

    #[test]
    fn test_unknown_type_tag() {
        let mut buf = Vec::new();
        {
            let mut out = OStream::new(&mut buf);
            out.write_i32(ANIM_VERSION).unwrap();
            out.write_i32(0x1C2).unwrap();
        }
        let registry = InterpolatorRegistry::with_builtin_formats();
        let mut cur = Cursor::new(buf);
        let mut input = IStream::new(&mut cur);
        let err = Animation::stream_read(&mut input, &registry).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(0x1C2)));
    }

    #[test]
    fn test_legacy_write_rejects_uv() {
        let registry = InterpolatorRegistry::with_builtin_formats();
        let anim = Animation::new(*registry.find(TAG_UV_PARAM).unwrap(), 1, 0, 1.0).unwrap();
        let mut buf = Vec::new();
        let mut out = OStream::new(&mut buf);
        let err = anim.stream_write_legacy(&mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongFormat { actual, .. } if actual == TAG_UV_PARAM
        ));
    }

    #[test]
    fn test_handle_sharing() {
        let registry = InterpolatorRegistry::with_builtin_formats();
        let anim = Rc::new(Animation::new(uv_info(&registry), 2, 0, 1.0).unwrap());

        let a = AnimInterpolator::new(Rc::clone(&anim));
        let b = a.clone();
        assert_eq!(Rc::strong_count(&anim), 3);
        assert!(Rc::ptr_eq(a.anim(), b.anim()));

        drop(a);
        drop(b);
        assert_eq!(Rc::strong_count(&anim), 1);
    }
}
