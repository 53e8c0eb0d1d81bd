use criterion::{Criterion, criterion_group, criterion_main};
use std::sync::Arc;

use mdx_particles::{
    CameraFrame, Emitter, EmitterDefinition, EmitterSettings, ModelInstance,
};

fn busy_emitter() -> Emitter {
    // Enough rate and life span to hold a few thousand particles alive
    let definition = Arc::new(
        EmitterDefinition::new(EmitterSettings {
            emission_rate: 2000.0,
            life_span: 2.0,
            speed: 50.0,
            latitude: 30.0,
            gravity: 9.8,
            variation: 5.0,
            ..Default::default()
        })
        .unwrap(),
    );

    Emitter::new(definition)
}

fn bench_frame_update(c: &mut Criterion) {
    let camera = CameraFrame::identity();

    c.bench_function("update_4k_particles", |b| {
        let mut emitter = busy_emitter();
        let mut time_ms = 0.0;

        // Warm up to a steady particle population
        for _ in 0..200 {
            time_ms += 16.0;
            let instance = ModelInstance::at_time(time_ms);
            let _ = emitter.update(0.016, &instance, &camera);
        }

        b.iter(|| {
            time_ms += 16.0;
            let instance = ModelInstance::at_time(time_ms);
            let command = emitter.update(0.016, &instance, &camera).unwrap();
            std::hint::black_box(command.map(|cmd| cmd.vertex_count))
        })
    });
}

criterion_group!(benches, bench_frame_update);
criterion_main!(benches);
