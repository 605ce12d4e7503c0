use glam::{Vec2, Vec3};
use surface_scatter::prelude::*;
use surface_scatter_examples::{init_tracing, render_placements_to_png, RenderConfig};

/// Range-mode matching against a horizontal gradient on a hand-built ramp
/// mesh: only the mid-gray band of the texture receives placements.
fn main() -> anyhow::Result<()> {
    init_tracing();

    // A unit quad tilted into a ramp rising along +X.
    let ramp = SurfaceDescriptor::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
            Vec3::new(1.0, 0.5, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
        vec![[0, 2, 1], [0, 3, 2]],
    );

    let size = 64;
    let pixels = (0..size * size)
        .map(|i| {
            let x = i % size;
            let value = x as f32 / (size - 1) as f32;
            Rgba::rgb(value, value, value)
        })
        .collect();
    let gradient = ImageTexture::try_new(size, size, pixels)?;

    let mut placer = SurfacePlacer::new()
        .with_surface(ramp)
        .with_material(Material::new().with_main(gradient))
        .with_prefab("shrub")
        .with_criterion(ColorCriterion::range(
            Rgba::rgb(0.35, 0.35, 0.35),
            Rgba::rgb(0.65, 0.65, 0.65),
        ))
        .with_config(PlacementConfig::default().with_density(0.6).with_seed(7))
        .with_sampling(BarycentricGridSampling::new(32));

    let mut host = InMemoryHost::new();
    let result = placer.place_prefabs(&mut host)?;
    println!(
        "band placements: {} (rejected {})",
        result.placements.len(),
        result.candidates_rejected
    );

    render_placements_to_png(
        &result.placements,
        &RenderConfig::unit((800, 800)).with_marker([40, 160, 60], 2),
        "color-range-mask.png",
    )?;

    Ok(())
}
