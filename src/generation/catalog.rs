//! Model catalog seam.
//!
//! The asset collaborator loads external models on its own schedule; the
//! generator only polls readiness and, when a model is granted, reads the
//! AABB it needs to register a standable volume. Not-ready is a valid steady
//! state, never an error; generation degrades to plain boxes.

use serde::{Deserialize, Serialize};

/// The slice of an instantiated model the generator cares about: a display
/// name the renderer can resolve and the horizontal extents of its computed
/// bounding box. The standable top comes from the generation cursor, so the
/// vertical extent never reaches the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVolume {
    pub name: String,
    pub half_x: f32,
    pub half_z: f32,
}

/// Asset collaborator interface, polled by the generator
pub trait ModelCatalog {
    /// True once the external model set has finished loading
    fn is_ready(&self) -> bool;

    /// Number of distinct models available for placement
    fn model_count(&self) -> usize;

    /// Instantiate model `index`. Returns `None` for a model that failed to
    /// load; the caller falls back to a plain box and does not retry.
    fn instantiate(&mut self, index: usize) -> Option<ModelVolume>;
}

/// Catalog that never becomes ready, for headless runs and benches
#[derive(Debug, Default)]
pub struct NullCatalog;

impl ModelCatalog for NullCatalog {
    fn is_ready(&self) -> bool {
        false
    }

    fn model_count(&self) -> usize {
        0
    }

    fn instantiate(&mut self, _index: usize) -> Option<ModelVolume> {
        None
    }
}

/// Fixed in-memory catalog with a toggleable ready flag. Test double and
/// demo stand-in for the async asset loader.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    pub models: Vec<ModelVolume>,
    pub ready: bool,
}

impl StaticCatalog {
    pub fn sample() -> Self {
        Self {
            models: vec![
                ModelVolume {
                    name: "rock_slab".into(),
                    half_x: 2.2,
                    half_z: 1.8,
                },
                ModelVolume {
                    name: "broken_pillar".into(),
                    half_x: 1.4,
                    half_z: 1.4,
                },
                ModelVolume {
                    name: "wooden_crate".into(),
                    half_x: 1.0,
                    half_z: 1.0,
                },
            ],
            ready: true,
        }
    }
}

impl ModelCatalog for StaticCatalog {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn model_count(&self) -> usize {
        self.models.len()
    }

    fn instantiate(&mut self, index: usize) -> Option<ModelVolume> {
        self.models.get(index).cloned()
    }
}
