//! Material host objects and their extensions.
//!
//! Materials here are only the host side of the extension mechanism: a
//! container for plugin side-structures. Rendering state is owned by the
//! surrounding engine and never crosses this crate's boundary.

use std::any::{Any, TypeId};
use std::collections::HashMap;

mod plugin;
mod uvanim;

pub use plugin::{Plugin, PluginRegistry};
pub use uvanim::{UvAnim, UvAnimPlugin};

/// Plugin registry for [`Material`] hosts.
pub type MaterialPlugins = PluginRegistry<Material>;

/// Typed side-structure storage, one entry per plugin.
#[derive(Default)]
pub struct Extensions {
    map: HashMap<TypeId, Box<dyn Any>>,
}

impl Extensions {
    /// Store a side-structure, replacing any previous one of the same type.
    pub fn insert<T: Any>(&mut self, value: T) {
        self.map.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Borrow a side-structure by type.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// Mutably borrow a side-structure by type.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|b| b.downcast_mut())
    }
}

/// A material instance: host object for per-material extension data.
#[derive(Default)]
pub struct Material {
    extensions: Extensions,
}

impl Material {
    /// Create a material and run every registered construct hook.
    pub fn new(plugins: &MaterialPlugins) -> Self {
        let mut material = Self::default();
        plugins.construct(&mut material);
        material
    }

    /// Duplicate the material: construct a fresh instance, then run every
    /// copy hook so plugin data is shared or cloned per plugin policy.
    pub fn duplicate(&self, plugins: &MaterialPlugins) -> Self {
        let mut copy = Self::new(plugins);
        plugins.copy(&mut copy, self);
        copy
    }

    /// Extension side-structures.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Mutable extension side-structures.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}
