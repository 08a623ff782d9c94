//! Generic per-object extension mechanism.
//!
//! A plugin attaches a side-structure to every instance of a host object
//! type and participates in the host's lifecycle: construction, copying,
//! and the extension chunk that trails the host on the wire. Side-structure
//! teardown rides on `Drop` of the host's extension data.
//!
//! On the wire, the extension chunk wraps one sub-chunk per plugin with a
//! non-empty payload, keyed by the plugin's chunk id. Unregistered ids are
//! skipped by declared size.

use tracing::debug;

use crate::anim::LoadContext;
use crate::chunk::{IStream, OStream, CHUNK_HEADER_SIZE, ID_EXTENSION};
use crate::util::{Error, Result};

/// Lifecycle and stream hooks for one extension of host type `H`.
pub trait Plugin<H> {
    /// Chunk id the plugin's extension data travels under.
    fn chunk_id(&self) -> u32;

    /// Initialize the plugin's side-structure on a fresh host.
    fn construct(&self, host: &mut H);

    /// Mirror the plugin's side-structure from `src` onto `dst`.
    /// `dst` has already been through [`Self::construct`].
    fn copy(&self, dst: &mut H, src: &H);

    /// Parse the plugin's extension payload. Must consume exactly the
    /// declared sub-chunk size.
    fn stream_read(
        &self,
        stream: &mut IStream<'_>,
        host: &mut H,
        ctx: &mut LoadContext<'_>,
    ) -> Result<()>;

    /// Write the plugin's extension payload.
    fn stream_write(&self, stream: &mut OStream<'_>, host: &H) -> Result<()>;

    /// Exact payload byte count [`Self::stream_write`] will produce, or 0
    /// to omit the plugin's sub-chunk entirely.
    fn stream_size(&self, host: &H) -> u32;
}

/// Registered plugins for one host object type.
#[derive(Default)]
pub struct PluginRegistry<H> {
    plugins: Vec<Box<dyn Plugin<H>>>,
}

impl<H> PluginRegistry<H> {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin. Later registrations are dispatched after earlier
    /// ones in every lifecycle pass.
    pub fn register(&mut self, plugin: impl Plugin<H> + 'static) {
        self.plugins.push(Box::new(plugin));
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every construct hook on a fresh host.
    pub fn construct(&self, host: &mut H) {
        for plugin in &self.plugins {
            plugin.construct(host);
        }
    }

    /// Run every copy hook. `dst` must already be constructed.
    pub fn copy(&self, dst: &mut H, src: &H) {
        for plugin in &self.plugins {
            plugin.copy(dst, src);
        }
    }

    /// Read the host's extension chunk, dispatching sub-chunks to plugins
    /// by chunk id and skipping unregistered ids by declared size.
    pub fn read_extension(
        &self,
        stream: &mut IStream<'_>,
        host: &mut H,
        ctx: &mut LoadContext<'_>,
    ) -> Result<()> {
        let extension = stream.find_chunk(ID_EXTENSION)?;
        let mut remaining = u64::from(extension.size);
        while remaining > 0 {
            if remaining < u64::from(CHUNK_HEADER_SIZE) {
                return Err(Error::invalid(format!(
                    "extension chunk truncated: {remaining} trailing bytes"
                )));
            }
            let sub = stream.read_chunk_header()?;
            remaining -= u64::from(CHUNK_HEADER_SIZE);
            if u64::from(sub.size) > remaining {
                return Err(Error::invalid(format!(
                    "extension sub-chunk 0x{:X} overruns its container",
                    sub.type_tag
                )));
            }

            match self.plugins.iter().find(|p| p.chunk_id() == sub.type_tag) {
                Some(plugin) => {
                    let start = stream.pos();
                    plugin.stream_read(stream, host, ctx)?;
                    let consumed = stream.pos() - start;
                    if consumed != u64::from(sub.size) {
                        return Err(Error::invalid(format!(
                            "extension plugin 0x{:X} consumed {consumed} of {} declared bytes",
                            sub.type_tag, sub.size
                        )));
                    }
                }
                None => {
                    debug!(type_tag = sub.type_tag, size = sub.size, "skipping unregistered extension chunk");
                    stream.skip(u64::from(sub.size))?;
                }
            }
            remaining -= u64::from(sub.size);
        }
        Ok(())
    }

    /// Write the host's extension chunk: one framed sub-chunk per plugin
    /// with a non-empty payload. The chunk is written even when empty so
    /// readers can always navigate past it.
    pub fn write_extension(&self, stream: &mut OStream<'_>, host: &H) -> Result<()> {
        let mut total = 0u32;
        for plugin in &self.plugins {
            let size = plugin.stream_size(host);
            if size > 0 {
                total += CHUNK_HEADER_SIZE + size;
            }
        }
        stream.write_chunk_header(ID_EXTENSION, total)?;
        for plugin in &self.plugins {
            let size = plugin.stream_size(host);
            if size > 0 {
                stream.write_chunk_header(plugin.chunk_id(), size)?;
                plugin.stream_write(stream, host)?;
            }
        }
        Ok(())
    }

    /// Exact byte count of [`Self::write_extension`], including the outer
    /// extension chunk header.
    pub fn extension_size(&self, host: &H) -> u32 {
        let mut total = CHUNK_HEADER_SIZE;
        for plugin in &self.plugins {
            let size = plugin.stream_size(host);
            if size > 0 {
                total += CHUNK_HEADER_SIZE + size;
            }
        }
        total
    }
}
