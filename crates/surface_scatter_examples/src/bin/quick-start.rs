use surface_scatter::prelude::*;
use surface_scatter_examples::{
    checkerboard_texture, init_tracing, render_placements_to_png, RenderConfig,
};

/// Scatter rocks on the red squares of a checkerboard texture and render the
/// result top-down to a PNG.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let texture = checkerboard_texture(64, 8, Rgba::RED, Rgba::BLUE);

    let mut placer = SurfacePlacer::new()
        .with_surface(SurfaceDescriptor::unit_quad())
        .with_material(Material::new().with_main(texture))
        .with_prefab("rock")
        .with_criterion(ColorCriterion::tolerance(Rgba::RED, 0.1))
        .with_config(
            PlacementConfig::default()
                .with_density(1.0)
                .with_position_randomness(0.01)
                .with_rotation_randomness(180.0)
                .with_seed(42),
        )
        .with_sampling(BarycentricGridSampling::new(24));

    let mut host = InMemoryHost::new();
    let result = placer.place_prefabs(&mut host)?;
    println!(
        "placed {} of {} candidates",
        result.placements.len(),
        result.candidates_evaluated
    );

    render_placements_to_png(
        &result.placements,
        &RenderConfig::unit((800, 800)).with_marker([200, 40, 40], 3),
        "quick-start.png",
    )?;

    Ok(())
}
