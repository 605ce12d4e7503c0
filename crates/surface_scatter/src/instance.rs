//! Instance tracking: ownership of spawned prefab copies across runs.
//!
//! The [`InstanceManager`] tracks exactly the instances it created through a
//! [`PrefabHost`]. Placement is additive until [`InstanceManager::clear_all`]
//! despawns the tracked set; unrelated host content is never touched.
use std::collections::HashMap;

use tracing::warn;

use crate::planner::PlacedTransform;

pub type PrefabId = String;

/// Opaque handle to a spawned instance, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// The scene boundary: spawns and despawns prefab copies.
///
/// Implement this against your engine's scene graph. Spawning must return a
/// handle that stays valid until the matching despawn.
pub trait PrefabHost {
    fn spawn(&mut self, prefab: &PrefabId, transform: &PlacedTransform) -> InstanceId;
    fn despawn(&mut self, instance: InstanceId);
}

/// One spawned prefab copy and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance {
    /// Host handle for the spawned copy.
    pub instance: InstanceId,
    /// Index of the candidate this placement originated from.
    pub candidate_index: usize,
    /// Final transform applied at spawn time.
    pub transform: PlacedTransform,
}

/// Owns the set of instances spawned by placement runs.
#[derive(Default)]
#[non_exhaustive]
pub struct InstanceManager {
    tracked: Vec<PlacedInstance>,
}

impl InstanceManager {
    /// Creates a new, empty [`InstanceManager`].
    pub fn new() -> Self {
        Self {
            tracked: Vec::new(),
        }
    }

    /// Returns the number of tracked instances.
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// All instances tracked across runs, in placement order.
    pub fn tracked(&self) -> &[PlacedInstance] {
        &self.tracked
    }

    /// Spawns one instance per planned transform and tracks them.
    ///
    /// Additive: previously tracked instances are kept. Returns the slice of
    /// instances created by this call.
    pub fn place_all(
        &mut self,
        host: &mut dyn PrefabHost,
        prefab: &PrefabId,
        planned: &[(usize, PlacedTransform)],
    ) -> &[PlacedInstance] {
        let start = self.tracked.len();
        self.tracked.reserve(planned.len());
        for (candidate_index, transform) in planned {
            let instance = host.spawn(prefab, transform);
            self.tracked.push(PlacedInstance {
                instance,
                candidate_index: *candidate_index,
                transform: *transform,
            });
        }
        &self.tracked[start..]
    }

    /// Despawns exactly the tracked set and forgets it. A no-op on an empty
    /// set. Returns the number of instances removed.
    pub fn clear_all(&mut self, host: &mut dyn PrefabHost) -> usize {
        let removed = self.tracked.len();
        for placed in self.tracked.drain(..) {
            host.despawn(placed.instance);
        }
        removed
    }
}

/// In-memory host for tests, examples, and headless runs.
#[derive(Default)]
pub struct InMemoryHost {
    next_id: u64,
    alive: HashMap<InstanceId, (PrefabId, PlacedTransform)>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently alive instances.
    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub fn contains(&self, instance: InstanceId) -> bool {
        self.alive.contains_key(&instance)
    }

    /// Transform of an alive instance, if any.
    pub fn transform(&self, instance: InstanceId) -> Option<&PlacedTransform> {
        self.alive.get(&instance).map(|(_, transform)| transform)
    }

    /// Alive instances in id order, for deterministic assertions.
    pub fn sorted_ids(&self) -> Vec<InstanceId> {
        let mut ids: Vec<_> = self.alive.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl PrefabHost for InMemoryHost {
    fn spawn(&mut self, prefab: &PrefabId, transform: &PlacedTransform) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.alive.insert(id, (prefab.clone(), *transform));
        id
    }

    fn despawn(&mut self, instance: InstanceId) {
        if self.alive.remove(&instance).is_none() {
            warn!("Despawn of unknown instance {:?}.", instance);
        }
    }
}
