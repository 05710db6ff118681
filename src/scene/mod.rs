//! Scene collaborator seam.
//!
//! The core never queries the renderer; it only pushes volume lifetimes
//! through this sink as platforms and pickups are created and pruned.

use serde::{Deserialize, Serialize};

use crate::pickups::PickupId;
use crate::registry::PlatformId;

/// Opaque handle the renderer can map to a mesh / node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeHandle {
    Platform(PlatformId),
    Pickup(PickupId),
    Checkpoint(u32),
}

/// Renderer-facing sink. Implementations are thin bindings over whatever
/// scene graph hosts the game; the core treats them as pure side effects.
pub trait SceneSink {
    fn add_volume(&mut self, handle: VolumeHandle);
    fn remove_volume(&mut self, handle: VolumeHandle);
}

/// Drops every notification, for headless simulation and benches
#[derive(Debug, Default)]
pub struct NullSink;

impl SceneSink for NullSink {
    fn add_volume(&mut self, _handle: VolumeHandle) {}
    fn remove_volume(&mut self, _handle: VolumeHandle) {}
}

/// Records every notification in order, for tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub added: Vec<VolumeHandle>,
    pub removed: Vec<VolumeHandle>,
}

impl SceneSink for RecordingSink {
    fn add_volume(&mut self, handle: VolumeHandle) {
        self.added.push(handle);
    }

    fn remove_volume(&mut self, handle: VolumeHandle) {
        self.removed.push(handle);
    }
}
