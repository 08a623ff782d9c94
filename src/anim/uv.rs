//! UV-channel keyframe format.
//!
//! One layout serves both UV type tags (linear and param): named custom
//! data with a node-to-channel mapping, then per frame a time, six UV
//! offset floats, and a predecessor index into the same keyframe array.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};

use crate::anim::animation::Animation;
use crate::anim::registry::{InterpolatorRegistry, TAG_UV_LINEAR};
use crate::chunk::{IStream, OStream};
use crate::util::{AnimName, Error, Result, NAME_LEN};

/// Number of UV channels addressable per material.
pub const UV_CHANNELS: usize = 8;

/// A single UV keyframe. 32 bytes, matching the wire layout.
///
/// `prev` indexes an earlier frame in the same array as the interpolation
/// predecessor; index 0 on frame 0 is the "no predecessor" sentinel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct UvKeyFrame {
    /// Sample time in seconds.
    pub time: f32,
    /// UV offsets for the animated channels.
    pub uv: [f32; 6],
    /// Predecessor frame index within the same keyframe array.
    pub prev: i32,
}

/// Custom data stored alongside UV keyframes in the same allocation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct UvCustomData {
    /// Asset name used for dictionary lookup and material cross-references.
    pub name: AnimName,
    /// Which UV channel each animated node drives.
    pub node_to_channel: [i32; UV_CHANNELS],
}

/// Read the UV data region: reserved field, custom data, then keyframes.
pub(crate) fn read_data(stream: &mut IStream<'_>, anim: &mut Animation) -> Result<()> {
    let num_frames = anim.num_frames();
    let type_tag = anim.type_tag();

    stream.read_i32()?; // reserved
    let mut name = [0u8; NAME_LEN];
    stream.read_bytes(&mut name)?;
    let mut node_to_channel = [0i32; UV_CHANNELS];
    for channel in node_to_channel.iter_mut() {
        *channel = stream.read_i32()?;
    }

    let custom = anim.uv_custom_mut().ok_or(Error::WrongFormat {
        expected: "uv",
        actual: type_tag,
    })?;
    custom.name = AnimName::from(name);
    custom.node_to_channel = node_to_channel;

    let frames = anim.uv_frames_mut().ok_or(Error::WrongFormat {
        expected: "uv",
        actual: type_tag,
    })?;
    for (i, frame) in frames.iter_mut().enumerate() {
        frame.time = stream.read_f32()?;
        for v in frame.uv.iter_mut() {
            *v = stream.read_f32()?;
        }
        let prev = stream.read_i32()?;
        if prev < 0 || prev >= num_frames {
            return Err(Error::InvalidPrevIndex {
                frame: i as i32,
                index: prev,
                num_frames,
            });
        }
        frame.prev = prev;
    }
    Ok(())
}

/// Write the UV data region, mirroring [`read_data`].
pub(crate) fn write_data(stream: &mut OStream<'_>, anim: &Animation) -> Result<()> {
    let custom = anim.uv_custom().ok_or(Error::WrongFormat {
        expected: "uv",
        actual: anim.type_tag(),
    })?;
    stream.write_i32(0)?; // reserved
    stream.write_bytes(custom.name.as_bytes())?;
    for &channel in &custom.node_to_channel {
        stream.write_i32(channel)?;
    }

    let frames = anim.uv_frames().ok_or(Error::WrongFormat {
        expected: "uv",
        actual: anim.type_tag(),
    })?;
    for frame in frames {
        stream.write_f32(frame.time)?;
        for &v in &frame.uv {
            stream.write_f32(v)?;
        }
        stream.write_i32(frame.prev)?;
    }
    Ok(())
}

/// Exact byte count of the UV data region.
pub(crate) fn data_size(anim: &Animation) -> u32 {
    (4 + NAME_LEN
        + UV_CHANNELS * 4
        + anim.num_frames() as usize * std::mem::size_of::<UvKeyFrame>()) as u32
}

/// Synthesize a minimal named animation for an unresolved reference:
/// two zero-offset keyframes spanning a one second duration.
pub fn placeholder(
    registry: &InterpolatorRegistry,
    name: impl Into<AnimName>,
) -> Result<Rc<Animation>> {
    let info = *registry
        .find(TAG_UV_LINEAR)
        .ok_or(Error::UnknownFormat(TAG_UV_LINEAR))?;
    let mut anim = Animation::new(info, 2, 0, 1.0)?;
    let duration = anim.duration();

    if let Some(custom) = anim.uv_custom_mut() {
        custom.name = name.into();
        custom.node_to_channel = [0; UV_CHANNELS];
    }
    if let Some(frames) = anim.uv_frames_mut() {
        frames[0] = UvKeyFrame {
            time: 0.0,
            uv: [0.0; 6],
            prev: 0,
        };
        frames[1] = UvKeyFrame {
            time: duration,
            uv: [0.0; 6],
            prev: 0,
        };
    }
    Ok(Rc::new(anim))
}
