//! Import policy hooks.
//!
//! What happens to a decoded submesh (rendered, turned into a collider,
//! dropped) is a host decision, not a decoder one. The hook is a capability
//! trait with implementations held in an explicit registry: hosts register
//! the processors they ship and select one by name. There is no runtime
//! discovery.

use crate::classify::classify;
use crate::model::{ImportFlags, SubMesh};

/// Per-game import policy for decoded submeshes.
pub trait ImportProcessor {
    /// Human-readable processor name; also the registry key.
    fn name(&self) -> &str;

    /// Uniform scale applied to model geometry on import.
    fn model_scale(&self) -> f32;

    /// Whether a bump map should be derived from the albedo texture.
    fn use_bump_map(&self) -> bool {
        false
    }

    /// Strength for bump-map derivation, in [0, 1].
    fn bump_map_strength(&self) -> f32 {
        0.0
    }

    /// Decide how a submesh is imported.
    fn import_flags(&self, submesh: &SubMesh) -> ImportFlags;
}

/// The stock import policy.
///
/// Visible geometry at the highest detail tier is imported as visual;
/// reserved names and lower detail tiers are dropped. Model units are
/// inches, hence the scale.
#[derive(Debug, Default)]
pub struct DefaultProcessor;

impl ImportProcessor for DefaultProcessor {
    fn name(&self) -> &str {
        "default"
    }

    fn model_scale(&self) -> f32 {
        0.0254
    }

    fn import_flags(&self, submesh: &SubMesh) -> ImportFlags {
        let classification = classify(&submesh.name);
        if !classification.is_visual || classification.lod_index > 0 {
            return ImportFlags::NONE;
        }
        ImportFlags::VISUAL
    }
}

/// Explicit list of available import processors.
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn ImportProcessor>>,
}

impl ProcessorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// A registry holding only the default processor.
    pub fn with_default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DefaultProcessor));
        registry
    }

    /// Add a processor. Later registrations shadow earlier ones with the
    /// same name.
    pub fn register(&mut self, processor: Box<dyn ImportProcessor>) {
        self.processors.push(processor);
    }

    /// Look up a processor by name.
    pub fn get(&self, name: &str) -> Option<&dyn ImportProcessor> {
        self.processors
            .iter()
            .rev()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Registered processor names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.processors.iter().map(|p| p.name())
    }

    /// Apply a processor's policy to every submesh of a model.
    pub fn apply(&self, name: &str, submeshes: &mut [SubMesh]) -> bool {
        let Some(processor) = self.get(name) else {
            return false;
        };
        for submesh in submeshes {
            submesh.import_flags = processor.import_flags(submesh);
        }
        true
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_default()
    }
}
