//! Hierarchical (skeletal) keyframe format.
//!
//! The original format for node hierarchies: per frame a rotation
//! quaternion, a translation, a time, and a predecessor index. This is the
//! only format legacy streams can carry, so its record layout doubles as
//! the legacy wire format.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::anim::animation::Animation;
use crate::chunk::{IStream, OStream};
use crate::util::{Error, Result};

/// A single skeletal keyframe. 36 bytes, matching the wire layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct HierKeyFrame {
    /// Rotation quaternion, stored x, y, z, w.
    pub rotation: [f32; 4],
    /// Node translation.
    pub translation: [f32; 3],
    /// Sample time in seconds.
    pub time: f32,
    /// Predecessor frame index within the same keyframe array.
    pub prev: i32,
}

impl HierKeyFrame {
    /// Build a keyframe from math types.
    pub fn new(time: f32, rotation: Quat, translation: Vec3, prev: i32) -> Self {
        Self {
            rotation: rotation.to_array(),
            translation: translation.to_array(),
            time,
            prev,
        }
    }

    /// Rotation as a quaternion.
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.rotation)
    }

    /// Translation as a vector.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.translation)
    }
}

/// Read the hierarchical data region: fixed per-frame records.
pub(crate) fn read_data(stream: &mut IStream<'_>, anim: &mut Animation) -> Result<()> {
    let num_frames = anim.num_frames();
    let type_tag = anim.type_tag();

    let frames = anim.hier_frames_mut().ok_or(Error::WrongFormat {
        expected: "hierarchical",
        actual: type_tag,
    })?;
    for (i, frame) in frames.iter_mut().enumerate() {
        for v in frame.rotation.iter_mut() {
            *v = stream.read_f32()?;
        }
        for v in frame.translation.iter_mut() {
            *v = stream.read_f32()?;
        }
        frame.time = stream.read_f32()?;
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

/// Write the hierarchical data region, mirroring [`read_data`].
pub(crate) fn write_data(stream: &mut OStream<'_>, anim: &Animation) -> Result<()> {
    let frames = anim.hier_frames().ok_or(Error::WrongFormat {
        expected: "hierarchical",
        actual: anim.type_tag(),
    })?;
    for frame in frames {
        for &v in &frame.rotation {
            stream.write_f32(v)?;
        }
        for &v in &frame.translation {
            stream.write_f32(v)?;
        }
        stream.write_f32(frame.time)?;
        stream.write_i32(frame.prev)?;
    }
    Ok(())
}

/// Exact byte count of the hierarchical data region.
pub(crate) fn data_size(anim: &Animation) -> u32 {
    (anim.num_frames() as usize * std::mem::size_of::<HierKeyFrame>()) as u32
}
