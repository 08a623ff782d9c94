//! Fixed-width animation names.
//!
//! Animation assets are cross-referenced by name between dictionary and
//! material chunks. On disk a name is always exactly 32 bytes, NUL-padded,
//! and comparisons are case-insensitive.

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Byte width of a name field on disk.
pub const NAME_LEN: usize = 32;

/// A fixed 32-byte, NUL-padded animation name.
///
/// Lives directly inside packed custom-data regions, so the layout matches
/// the wire format exactly.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(transparent)]
pub struct AnimName([u8; NAME_LEN]);

impl AnimName {
    /// Build a name from a string, truncating to 32 bytes.
    pub fn new(name: &str) -> Self {
        let mut bytes = [0u8; NAME_LEN];
        let n = name.len().min(NAME_LEN);
        bytes[..n].copy_from_slice(&name.as_bytes()[..n]);
        Self(bytes)
    }

    /// The raw 32-byte field.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }

    /// Name bytes up to the first NUL.
    pub fn as_slice(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        &self.0[..end]
    }

    /// Case-insensitive comparison against another name or a plain string.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        let other = other.as_bytes();
        if other.len() > NAME_LEN {
            return false;
        }
        let mut padded = [0u8; NAME_LEN];
        padded[..other.len()].copy_from_slice(other);
        self.0.eq_ignore_ascii_case(&padded)
    }
}

impl From<&str> for AnimName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<[u8; NAME_LEN]> for AnimName {
    fn from(bytes: [u8; NAME_LEN]) -> Self {
        Self(bytes)
    }
}

impl PartialEq for AnimName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for AnimName {}

impl fmt::Display for AnimName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_slice()))
    }
}

impl fmt::Debug for AnimName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimName({:?})", String::from_utf8_lossy(self.as_slice()))
    }
}

impl Default for AnimName {
    fn default() -> Self {
        Self([0u8; NAME_LEN])
    }
}
