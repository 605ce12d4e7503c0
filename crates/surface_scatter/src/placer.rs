//! High-level placer orchestrating generate, match, plan, and place.
//!
//! [`SurfacePlacer`] is the host-facing surface: bind a mesh, material,
//! prefab, criterion, and configuration, then call
//! [`SurfacePlacer::place_prefabs`] or
//! [`SurfacePlacer::clear_placed_prefabs`]. Precondition failures reject the
//! run before any instance is created; runs are additive until cleared.
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::color::{ColorCriterion, Rgba};
use crate::error::{Error, Result};
use crate::events::{EventSink, PlacerEvent, PlacerEventKind};
use crate::instance::{InstanceManager, PlacedInstance, PrefabHost, PrefabId};
use crate::planner::{plan_transform, PlacedTransform, PlacementConfig};
use crate::sampling::{BarycentricGridSampling, SurfaceSampling};
use crate::surface::SurfaceDescriptor;
use crate::texture::{Material, TextureBinding};

/// Result of one placement run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Instances created by this run, in candidate order.
    pub placements: Vec<PlacedInstance>,
    /// Total candidates evaluated.
    pub candidates_evaluated: usize,
    /// Candidates whose sampled color did not match.
    pub candidates_rejected: usize,
}

/// Texture-color-driven prefab placer for one configured surface.
///
/// Exclusive ownership of the tracked instance set lives here; at most one
/// run can be active at a time because both entry points take `&mut self`.
#[non_exhaustive]
pub struct SurfacePlacer {
    surface: Option<SurfaceDescriptor>,
    material: Material,
    binding: TextureBinding,
    prefab: Option<PrefabId>,
    criterion: ColorCriterion,
    config: PlacementConfig,
    sampling: Box<dyn SurfaceSampling>,
    instances: InstanceManager,
}

impl Default for SurfacePlacer {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfacePlacer {
    /// Creates an unbound placer with default criterion, configuration, and
    /// barycentric-grid sampling.
    pub fn new() -> Self {
        Self {
            surface: None,
            material: Material::new(),
            binding: TextureBinding::auto(),
            prefab: None,
            criterion: ColorCriterion::default(),
            config: PlacementConfig::default(),
            sampling: Box::new(BarycentricGridSampling::default()),
            instances: InstanceManager::new(),
        }
    }

    /// Binds the target surface.
    pub fn with_surface(mut self, surface: SurfaceDescriptor) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Binds the material whose texture is sampled.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Sets how the sampled texture is resolved.
    pub fn with_texture_binding(mut self, binding: TextureBinding) -> Self {
        self.binding = binding;
        self
    }

    /// Binds the prefab to place.
    pub fn with_prefab(mut self, prefab: impl Into<PrefabId>) -> Self {
        self.prefab = Some(prefab.into());
        self
    }

    /// Sets the color criterion.
    pub fn with_criterion(mut self, criterion: ColorCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Sets the placement configuration.
    pub fn with_config(mut self, config: PlacementConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the candidate sampling strategy.
    pub fn with_sampling<S: SurfaceSampling + 'static>(mut self, sampling: S) -> Self {
        self.sampling = Box::new(sampling);
        self
    }

    // Read-only queries, the display surface for host tooling.

    pub fn target_color(&self) -> Rgba {
        self.criterion.target
    }

    pub fn color_tolerance(&self) -> f32 {
        self.criterion.tolerance
    }

    pub fn placement_density(&self) -> f32 {
        self.config.density
    }

    pub fn position_randomness(&self) -> f32 {
        self.config.position_randomness
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn criterion(&self) -> &ColorCriterion {
        &self.criterion
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&SurfaceDescriptor> {
        self.surface.as_ref()
    }

    pub fn prefab(&self) -> Option<&PrefabId> {
        self.prefab.as_ref()
    }

    /// The tracked instance set.
    pub fn instances(&self) -> &InstanceManager {
        &self.instances
    }

    /// Whether the bindings required for a run are present. Mirrors what a
    /// host would use to enable its place action.
    pub fn can_place(&self) -> bool {
        self.surface.is_some() && self.prefab.is_some()
    }

    /// Runs one full generate, match, plan, place cycle.
    ///
    /// Additive: instances from prior runs stay tracked. Fails before any
    /// instance is created when a binding is missing or a configuration
    /// invariant is violated.
    pub fn place_prefabs(&mut self, host: &mut dyn PrefabHost) -> Result<RunResult> {
        self.place_prefabs_with_events(host, &mut ())
    }

    /// Like [`SurfacePlacer::place_prefabs`], forwarding events to `sink`.
    pub fn place_prefabs_with_events(
        &mut self,
        host: &mut dyn PrefabHost,
        sink: &mut dyn EventSink,
    ) -> Result<RunResult> {
        let surface = self.surface.as_ref().ok_or(Error::NoSurfaceBound)?;
        surface.validate()?;
        let prefab = self.prefab.clone().ok_or(Error::NoPrefabBound)?;
        self.criterion.validate()?;
        self.config.validate()?;
        let texture = self.binding.resolve(&self.material)?;

        let candidates = self.sampling.generate(surface, self.config.density);
        info!(
            "Placement run: {} candidates at density {:.2}, seed {}.",
            candidates.len(),
            self.config.density,
            self.config.seed
        );
        if candidates.is_empty() {
            warn!("Candidate generation produced no points; nothing to place.");
            if sink.wants(PlacerEventKind::Warning) {
                sink.send(PlacerEvent::Warning {
                    context: "sampling".into(),
                    message: "Candidate generation produced no points".into(),
                });
            }
        }
        if sink.wants(PlacerEventKind::RunStarted) {
            sink.send(PlacerEvent::RunStarted {
                candidate_count: candidates.len(),
                seed: self.config.seed,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut planned: Vec<(usize, PlacedTransform)> = Vec::new();
        for point in &candidates {
            let color = texture.sample(point.uv.into());
            let matched = self.criterion.matches(color);
            if sink.wants(PlacerEventKind::CandidateEvaluated) {
                sink.send(PlacerEvent::CandidateEvaluated {
                    index: point.index,
                    uv: point.uv,
                    color,
                    matched,
                });
            }
            if !matched {
                continue;
            }
            planned.push((point.index, plan_transform(point, &self.config, &mut rng)));
        }

        // All evaluation happened above; nothing can fail past this point, so
        // either the whole set is placed or none of it was.
        let new = self.instances.place_all(host, &prefab, &planned);
        if sink.wants(PlacerEventKind::PlacementMade) {
            for placed in new {
                sink.send(PlacerEvent::PlacementMade {
                    candidate_index: placed.candidate_index,
                    transform: placed.transform,
                });
            }
        }

        let result = RunResult {
            placements: new.to_vec(),
            candidates_evaluated: candidates.len(),
            candidates_rejected: candidates.len() - planned.len(),
        };
        info!(
            "Placement run finished: {} placed, {} rejected.",
            result.placements.len(),
            result.candidates_rejected
        );
        if sink.wants(PlacerEventKind::RunFinished) {
            sink.send(PlacerEvent::RunFinished {
                result: result.clone(),
            });
        }

        Ok(result)
    }

    /// Despawns every tracked instance. A no-op when nothing is tracked.
    /// Returns the number of instances removed.
    pub fn clear_placed_prefabs(&mut self, host: &mut dyn PrefabHost) -> usize {
        self.clear_placed_prefabs_with_events(host, &mut ())
    }

    /// Like [`SurfacePlacer::clear_placed_prefabs`], forwarding events to
    /// `sink`.
    pub fn clear_placed_prefabs_with_events(
        &mut self,
        host: &mut dyn PrefabHost,
        sink: &mut dyn EventSink,
    ) -> usize {
        let removed = self.instances.clear_all(host);
        if removed > 0 {
            info!("Cleared {} placed instances.", removed);
        }
        if sink.wants(PlacerEventKind::Cleared) {
            sink.send(PlacerEvent::Cleared { removed });
        }
        removed
    }
}
