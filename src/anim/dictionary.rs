//! Named animation dictionaries.
//!
//! A dictionary owns an ordered collection of shared animation assets and
//! resolves by-name references from material chunks read later in the same
//! stream. Lookup is case-insensitive over the fixed 32-byte name.

use std::rc::Rc;

use tracing::debug;

use crate::anim::animation::Animation;
use crate::anim::registry::InterpolatorRegistry;
use crate::chunk::{IStream, OStream, CHUNK_HEADER_SIZE, ID_ANIM_ANIMATION, ID_STRUCT, ID_UV_ANIM_DICT};
use crate::util::{AnimName, Error, Result};

/// Context threaded through stream reads that resolve animation names.
///
/// Callers set the dictionary before loading material chunks; references are
/// resolved in stream order against whatever it contains at that point.
pub struct LoadContext<'a> {
    /// Formats available for animation payloads.
    pub registry: &'a InterpolatorRegistry,
    /// Dictionary consulted for by-name resolution, if any.
    pub dictionary: Option<&'a mut UvAnimDictionary>,
}

impl<'a> LoadContext<'a> {
    /// Context with a dictionary for name resolution.
    pub fn new(registry: &'a InterpolatorRegistry, dictionary: &'a mut UvAnimDictionary) -> Self {
        Self {
            registry,
            dictionary: Some(dictionary),
        }
    }

    /// Context without a dictionary; every reference synthesizes a fresh
    /// placeholder.
    pub fn without_dictionary(registry: &'a InterpolatorRegistry) -> Self {
        Self {
            registry,
            dictionary: None,
        }
    }
}

/// An ordered, name-addressable collection of shared animation assets.
#[derive(Debug, Default)]
pub struct UvAnimDictionary {
    animations: Vec<Rc<Animation>>,
}

impl UvAnimDictionary {
    /// Empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether the dictionary holds no animations.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Iterate animations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Animation>> {
        self.animations.iter()
    }

    /// Append an animation, taking a counted reference.
    pub fn add(&mut self, anim: Rc<Animation>) {
        self.animations.push(anim);
    }

    /// First animation whose name matches, by insertion order. Entries
    /// without named custom data are skipped.
    pub fn find(&self, name: &str) -> Option<Rc<Animation>> {
        self.find_name(&AnimName::new(name))
    }

    /// [`Self::find`] over an already-packed 32-byte name.
    pub fn find_name(&self, name: &AnimName) -> Option<Rc<Animation>> {
        self.animations
            .iter()
            .find(|anim| anim.uv_custom().is_some_and(|c| c.name == *name))
            .cloned()
    }

    /// Read a dictionary. The caller has already consumed the outer
    /// dictionary chunk header.
    ///
    /// Any missing chunk or failed animation read aborts, dropping the
    /// partially built dictionary.
    pub fn stream_read(
        stream: &mut IStream<'_>,
        registry: &InterpolatorRegistry,
    ) -> Result<UvAnimDictionary> {
        stream.find_chunk(ID_STRUCT)?;
        let count = stream.read_i32()?;
        if count < 0 {
            return Err(Error::invalid(format!("negative dictionary count: {count}")));
        }
        debug!(count, "reading animation dictionary");

        let mut dict = UvAnimDictionary::new();
        for _ in 0..count {
            stream.find_chunk(ID_ANIM_ANIMATION)?;
            let anim = Animation::stream_read(stream, registry)?;
            dict.add(Rc::new(anim));
        }
        Ok(dict)
    }

    /// Write the dictionary as a framed chunk: outer header, struct chunk
    /// with the count, then each member as its own framed animation chunk.
    pub fn stream_write(&self, stream: &mut OStream<'_>) -> Result<()> {
        stream.write_chunk_header(ID_UV_ANIM_DICT, self.stream_size())?;
        stream.write_chunk_header(ID_STRUCT, 4)?;
        stream.write_i32(self.animations.len() as i32)?;
        for anim in &self.animations {
            anim.stream_write(stream)?;
        }
        Ok(())
    }

    /// Exact payload byte count of [`Self::stream_write`].
    pub fn stream_size(&self) -> u32 {
        let mut size = CHUNK_HEADER_SIZE + 4;
        for anim in &self.animations {
            size += CHUNK_HEADER_SIZE + anim.stream_size();
        }
        size
    }
}
