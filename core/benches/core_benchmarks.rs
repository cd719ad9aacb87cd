use criterion::{Criterion, black_box, criterion_group, criterion_main};

use parallax_core::math::{Vec3, mat4_from_quat, quat_from_angle_axis, quat_from_mat4};
use parallax_core::noise::{fractal_noise, noise3};

fn bench_noise_grid(c: &mut Criterion) {
    c.bench_function("noise3_32x32", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..32 {
                for j in 0..32 {
                    acc += noise3(i as f32 * 0.1, j as f32 * 0.1, 0.5, 0);
                }
            }
            black_box(acc)
        });
    });
}

fn bench_fractal_noise(c: &mut Criterion) {
    c.bench_function("fractal_noise_6_octaves", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for i in 0..64 {
                acc += fractal_noise(i as f32 * 0.07, 1.0, 2.0, 2.0, 0.5, 1.0, 6);
            }
            black_box(acc)
        });
    });
}

fn bench_quat_from_mat4(c: &mut Criterion) {
    let m = mat4_from_quat(quat_from_angle_axis(1.1, Vec3::new(0.0, 1.0, 0.0)));
    c.bench_function("quat_from_mat4", |b| {
        b.iter(|| black_box(quat_from_mat4(black_box(&m))));
    });
}

criterion_group!(
    benches,
    bench_noise_grid,
    bench_fractal_noise,
    bench_quat_from_mat4
);
criterion_main!(benches);
