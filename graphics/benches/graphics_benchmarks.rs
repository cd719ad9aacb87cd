use criterion::{Criterion, black_box, criterion_group, criterion_main};

use parallax_graphics::{
    BufferFormat, FieldLayout, FieldType, FormatEntry, LayoutRules, PassState,
};

// ---------------------------------------------------------------------------
// Field layout resolution
// ---------------------------------------------------------------------------

fn bench_resolve_vertex_format(c: &mut Criterion) {
    let format = BufferFormat::List(vec![
        FormatEntry::from(FieldType::F32x3),
        FormatEntry::from(FieldType::F32x3),
        FormatEntry::from(FieldType::F32x2),
        FormatEntry::from(FieldType::F32x4),
        FormatEntry::from(FieldType::U8Nx4),
    ]);
    c.bench_function("resolve_pbr_vertex_format", |b| {
        b.iter(|| {
            let layout = FieldLayout::resolve(black_box(&format), LayoutRules::packed()).unwrap();
            black_box(layout.stride())
        });
    });
}

fn bench_resolve_uniform_block(c: &mut Criterion) {
    let format = BufferFormat::parse("mat4 mat4 vec4 vec4 vec3 f32").unwrap();
    c.bench_function("resolve_camera_uniform_block", |b| {
        b.iter(|| {
            let layout = FieldLayout::resolve(black_box(&format), LayoutRules::uniform()).unwrap();
            black_box(layout.stride())
        });
    });
}

fn bench_parse_format_text(c: &mut Criterion) {
    c.bench_function("parse_format_text", |b| {
        b.iter(|| black_box(BufferFormat::parse(black_box("vec3 vec3 vec2 vec4 color"))));
    });
}

// ---------------------------------------------------------------------------
// Pass state updates
// ---------------------------------------------------------------------------

fn bench_pass_state_churn(c: &mut Criterion) {
    c.bench_function("pass_state_churn", |b| {
        b.iter(|| {
            let mut state = PassState::new();
            for target in 0..4 {
                state.set_blend(target, None).unwrap();
            }
            state.set_depth_test(parallax_graphics::CompareMode::Greater, false);
            state.set_cull_mode(parallax_graphics::CullMode::Back);
            black_box(state)
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_vertex_format,
    bench_resolve_uniform_block,
    bench_parse_format_text,
    bench_pass_state_churn
);
criterion_main!(benches);
