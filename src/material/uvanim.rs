//! Per-material UV animation extension.
//!
//! Each material carries 8 interpolator slots, one per UV channel. On the
//! wire the extension is a bitmask of active slots followed by one 32-byte
//! animation name per set bit; names resolve against the load context's
//! dictionary, synthesizing placeholders for anything unknown.

use std::rc::Rc;

use tracing::warn;

use crate::anim::uv;
use crate::anim::{AnimInterpolator, LoadContext, UV_CHANNELS};
use crate::chunk::{IStream, OStream, CHUNK_HEADER_SIZE, ID_STRUCT, ID_UV_ANIMATION};
use crate::util::{AnimName, Error, Result, NAME_LEN};

use super::{Material, Plugin, PluginRegistry};

/// Fixed per-material array of animation interpolator slots.
#[derive(Clone, Debug, Default)]
pub struct UvAnim {
    slots: [Option<AnimInterpolator>; UV_CHANNELS],
}

impl UvAnim {
    /// The interpolator in slot `index`, if any.
    pub fn slot(&self, index: usize) -> Option<&AnimInterpolator> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Install or clear a slot.
    pub fn set_slot(&mut self, index: usize, interp: Option<AnimInterpolator>) {
        self.slots[index] = interp;
    }

    /// Iterate all 8 slots in order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&AnimInterpolator>> {
        self.slots.iter().map(|s| s.as_ref())
    }

    /// Bitmask of occupied slots.
    pub fn active_mask(&self) -> u32 {
        let mut mask = 0u32;
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.is_some() {
                mask |= 1 << i;
            }
        }
        mask
    }

    /// Number of occupied slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// The UV animation extension, registered against material hosts.
pub struct UvAnimPlugin;

impl Plugin<Material> for UvAnimPlugin {
    fn chunk_id(&self) -> u32 {
        ID_UV_ANIMATION
    }

    fn construct(&self, host: &mut Material) {
        host.extensions_mut().insert(UvAnim::default());
    }

    fn copy(&self, dst: &mut Material, src: &Material) {
        // Slots are shared, never deep-copied: each occupied slot becomes a
        // new handle to the same animation.
        let Some(src_uv) = src.extensions().get::<UvAnim>() else {
            return;
        };
        let shared = src_uv.clone();
        match dst.extensions_mut().get_mut::<UvAnim>() {
            Some(dst_uv) => *dst_uv = shared,
            None => dst.extensions_mut().insert(shared),
        }
    }

    fn stream_read(
        &self,
        stream: &mut IStream<'_>,
        host: &mut Material,
        ctx: &mut LoadContext<'_>,
    ) -> Result<()> {
        stream.find_chunk(ID_STRUCT)?;
        let mask = stream.read_u32()?;

        let mut slots: [Option<AnimInterpolator>; UV_CHANNELS] = Default::default();
        for (i, slot) in slots.iter_mut().enumerate() {
            if mask & (1 << i) == 0 {
                continue;
            }
            let mut name_bytes = [0u8; NAME_LEN];
            stream.read_bytes(&mut name_bytes)?;
            let name = AnimName::from(name_bytes);

            let anim = match ctx.dictionary.as_deref_mut().and_then(|d| d.find_name(&name)) {
                Some(anim) => anim,
                None => {
                    warn!(%name, slot = i, "animation not in dictionary, synthesizing placeholder");
                    let anim = uv::placeholder(ctx.registry, name)?;
                    if let Some(dict) = ctx.dictionary.as_deref_mut() {
                        dict.add(Rc::clone(&anim));
                    }
                    anim
                }
            };
            *slot = Some(AnimInterpolator::new(anim));
        }

        let uvanim = host
            .extensions_mut()
            .get_mut::<UvAnim>()
            .ok_or_else(|| Error::invalid("material has no UV animation extension"))?;
        uvanim.slots = slots;
        Ok(())
    }

    fn stream_write(&self, stream: &mut OStream<'_>, host: &Material) -> Result<()> {
        let uvanim = host
            .extensions()
            .get::<UvAnim>()
            .ok_or_else(|| Error::invalid("material has no UV animation extension"))?;
        let names_size = uvanim.active_count() as u32 * NAME_LEN as u32;
        stream.write_chunk_header(ID_STRUCT, 4 + names_size)?;
        stream.write_u32(uvanim.active_mask())?;
        for slot in uvanim.slots.iter().flatten() {
            let name = slot
                .anim()
                .name()
                .ok_or_else(|| Error::invalid("slot animation carries no name"))?;
            stream.write_bytes(name.as_bytes())?;
        }
        Ok(())
    }

    fn stream_size(&self, host: &Material) -> u32 {
        let Some(uvanim) = host.extensions().get::<UvAnim>() else {
            return 0;
        };
        let active = uvanim.active_count() as u32;
        if active == 0 {
            0
        } else {
            CHUNK_HEADER_SIZE + 4 + active * NAME_LEN as u32
        }
    }
}

impl PluginRegistry<Material> {
    /// Registry with the UV animation plugin registered.
    pub fn with_uv_anim() -> Self {
        let mut plugins = Self::new();
        plugins.register(UvAnimPlugin);
        plugins
    }
}

impl Material {
    /// The material's UV animation slots, once constructed with the UV
    /// animation plugin registered.
    pub fn uv_anim(&self) -> Option<&UvAnim> {
        self.extensions().get()
    }

    /// Mutable UV animation slots.
    pub fn uv_anim_mut(&mut self) -> Option<&mut UvAnim> {
        self.extensions_mut().get_mut()
    }
}
