use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use surface_scatter::prelude::{
    BarycentricGridSampling, ColorCriterion, ImageTexture, InMemoryHost, Material,
    PlacementConfig, Rgba, SurfaceDescriptor, SurfacePlacer,
};

fn build_placer(resolution: usize) -> SurfacePlacer {
    let texture = ImageTexture::try_new(
        64,
        64,
        (0..64 * 64)
            .map(|i| {
                if (i / 64 + i % 64) % 2 == 0 {
                    Rgba::RED
                } else {
                    Rgba::BLUE
                }
            })
            .collect(),
    )
    .expect("texture data matches dimensions");

    SurfacePlacer::new()
        .with_surface(SurfaceDescriptor::unit_quad())
        .with_material(Material::new().with_main(texture))
        .with_prefab("bench")
        .with_criterion(ColorCriterion::tolerance(Rgba::RED, 0.1))
        .with_config(
            PlacementConfig::default()
                .with_density(1.0)
                .with_position_randomness(0.2)
                .with_rotation_randomness(45.0)
                .with_scale_variation(0.25)
                .with_seed(42),
        )
        .with_sampling(BarycentricGridSampling::new(resolution))
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_prefabs");
    for resolution in [16usize, 64] {
        group.bench_function(format!("checker_res_{resolution}"), |b| {
            b.iter_batched(
                || (build_placer(resolution), InMemoryHost::new()),
                |(mut placer, mut host)| {
                    let result = placer.place_prefabs(&mut host).expect("run succeeds");
                    black_box(result.placements.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_clear(c: &mut Criterion) {
    c.bench_function("clear_placed_prefabs", |b| {
        b.iter_batched(
            || {
                let mut placer = build_placer(32);
                let mut host = InMemoryHost::new();
                placer.place_prefabs(&mut host).expect("run succeeds");
                (placer, host)
            },
            |(mut placer, mut host)| black_box(placer.clear_placed_prefabs(&mut host)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_place, bench_clear);
criterion_main!(benches);
