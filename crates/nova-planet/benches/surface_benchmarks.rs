use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use nova_planet::{SurfaceMesh, SurfaceStyle, build_surface, recompute_normals};
use nova_terrain::{TerrainField, TrigTerrain};

fn bench_terrain_sample(c: &mut Criterion) {
    let terrain = TrigTerrain::default();
    let dir = black_box(Vec3::new(0.48, 0.6, 0.64));
    c.bench_function("terrain_sample", |bencher| {
        bencher.iter(|| black_box(terrain.sample(dir)))
    });
}

fn bench_build_surface_96(c: &mut Criterion) {
    let terrain = TrigTerrain::default();
    let style = SurfaceStyle::default();
    let template = SurfaceMesh::uv_sphere(style.base_radius, 96, 96);
    c.bench_function("build_surface_96x96", |bencher| {
        bencher.iter(|| {
            let mut mesh = template.clone();
            black_box(build_surface(&mut mesh, &terrain, &style))
        })
    });
}

fn bench_recompute_normals_96(c: &mut Criterion) {
    let mut mesh = SurfaceMesh::uv_sphere(4.0, 96, 96);
    c.bench_function("recompute_normals_96x96", |bencher| {
        bencher.iter(|| {
            recompute_normals(&mesh.positions, &mesh.indices, &mut mesh.normals);
            black_box(mesh.normals[0])
        })
    });
}

criterion_group!(
    benches,
    bench_terrain_sample,
    bench_build_surface_96,
    bench_recompute_normals_96
);
criterion_main!(benches);
