#![forbid(unsafe_code)]
//! surface_scatter: texture-color-driven prefab placement on mesh surfaces.
//!
//! Modules:
//! - texture: texture sources, materials, auto/manual binding resolution
//! - color: sampled-color match criteria (tolerance and range modes)
//! - sampling: deterministic candidate generation over triangle meshes
//! - planner: seeded transform planning (offsets, jitter, rotation, scale)
//! - instance: ownership of spawned instances across runs
//! - placer: the host-facing generate/match/plan/place cycle, with events
//!
//! For examples and docs, see README and docs.rs.
pub mod color;
pub mod error;
pub mod events;
pub mod instance;
pub mod placer;
pub mod planner;
pub mod sampling;
pub mod surface;
pub mod texture;

/// Convenient re-exports for common types. Import with `use surface_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::color::{ColorCriterion, MatchMode, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, PlacerEvent, PlacerEventKind, VecSink};
    pub use crate::instance::{
        InMemoryHost, InstanceId, InstanceManager, PlacedInstance, PrefabHost, PrefabId,
    };
    pub use crate::placer::{RunResult, SurfacePlacer};
    pub use crate::planner::{plan_transform, PlacedTransform, PlacementConfig};
    pub use crate::sampling::{BarycentricGridSampling, SurfaceSampling, TriangleCentroidSampling};
    pub use crate::surface::{SurfaceDescriptor, SurfacePoint};
    pub use crate::texture::{
        ImageTexture, Material, Texture, TextureBinding, DEFAULT_TEXTURE_PROPERTIES,
    };
}
